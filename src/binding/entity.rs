use crate::{Document, Entity, Result};

/// A live view of an entity's data.
///
/// Nothing is cached: every read fetches the compartment from the entity and
/// every mutation writes the whole compartment back before returning.
pub struct EntityBinding<'h> {
    entity: &'h dyn Entity,
    full: bool,
}

impl<'h> EntityBinding<'h> {
    /// Binds the persistent-data compartment, or the full native form when
    /// `full` is set.
    pub fn new(entity: &'h dyn Entity, full: bool) -> Self {
        Self { entity, full }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.full
    }

    pub(crate) fn load(&self) -> Result<Document> {
        let data = if self.full {
            self.entity.native_data()?
        } else {
            self.entity.persistent_data()?
        };
        Ok(Document::from(data))
    }

    pub(crate) fn modify<R>(&self, f: impl FnOnce(&mut Document) -> Result<R>) -> Result<R> {
        let mut document = self.load()?;
        let result = f(&mut document)?;
        if self.full {
            self.entity.set_native_data(document.into_root())?;
        } else {
            self.entity.set_persistent_data(document.into_root())?;
        }
        Ok(result)
    }
}
