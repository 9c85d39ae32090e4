//! Document views bound to where their data came from.
//!
//! | kind          | reads from              | writes go to                     |
//! |---------------|-------------------------|----------------------------------|
//! | `Entity`      | the entity, every call  | the entity, on every mutation    |
//! | `BlockEntity` | a working copy          | the tile state, on [`Binding::flush`] |
//! | `Block`       | the block store         | the block store, on every mutation |
//! | `Item`        | a snapshot              | nowhere                          |
//! | `String`      | an owned document       | nowhere                          |
//! | `File`        | an owned document       | the file, on [`Binding::save`]   |

mod block;
mod entity;
mod file;

pub use block::{BlockBinding, BlockEntityBinding};
pub use entity::EntityBinding;
pub use file::{FileBinding, FileFormat};

use crate::{Document, Error, Result, TagPath, TagType, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Entity,
    BlockEntity,
    Block,
    Item,
    String,
    File,
}

impl BindingKind {
    /// Whether the binding is attached to a world object instead of owning
    /// its data.
    #[inline]
    pub fn is_live(self) -> bool {
        matches!(self, BindingKind::Entity | BindingKind::BlockEntity | BindingKind::Block)
    }
}

pub enum Binding<'h> {
    Entity(EntityBinding<'h>),
    BlockEntity(BlockEntityBinding<'h>),
    Block(BlockBinding<'h>),
    Item(Document),
    String(Document),
    File(FileBinding),
}

impl<'h> Binding<'h> {
    pub fn kind(&self) -> BindingKind {
        match self {
            Binding::Entity(_) => BindingKind::Entity,
            Binding::BlockEntity(_) => BindingKind::BlockEntity,
            Binding::Block(_) => BindingKind::Block,
            Binding::Item(_) => BindingKind::Item,
            Binding::String(_) => BindingKind::String,
            Binding::File(_) => BindingKind::File,
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.kind().is_live()
    }

    fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> Result<R> {
        match self {
            Binding::Entity(binding) => binding.load().map(|document| f(&document)),
            Binding::Block(binding) => Ok(f(&binding.load())),
            Binding::BlockEntity(binding) => Ok(f(binding.working_copy())),
            Binding::Item(document) | Binding::String(document) => Ok(f(document)),
            Binding::File(binding) => Ok(f(binding.document())),
        }
    }

    fn write<R>(&mut self, f: impl FnOnce(&mut Document) -> Result<R>) -> Result<R> {
        match self {
            Binding::Entity(binding) => binding.modify(f),
            Binding::Block(binding) => binding.modify(f),
            Binding::BlockEntity(binding) => binding.modify(f),
            Binding::Item(document) | Binding::String(document) => f(document),
            Binding::File(binding) => f(binding.document_mut()),
        }
    }

    /// A copy of the tag at `path`, `None` when nothing is there.
    pub fn get(&self, path: impl Into<TagPath>) -> Result<Option<Value>> {
        let path = path.into();
        self.read(|document| document.get(&path).cloned())
    }

    /// The tag at `path` when it already is of `tag_type`.
    pub fn get_typed(&self, path: impl Into<TagPath>, tag_type: &TagType) -> Result<Option<Value>> {
        let path = path.into();
        self.read(|document| document.get_typed(&path, tag_type))
    }

    pub fn contains(&self, path: impl Into<TagPath>) -> Result<bool> {
        let path = path.into();
        self.read(|document| document.contains(&path))
    }

    /// Sets the tag at `path`, returning the tag it replaced.
    ///
    /// Live bindings have written the change through when this returns; a
    /// failed set writes nothing.
    pub fn set(
        &mut self,
        path: impl Into<TagPath>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let path = path.into();
        let value = value.into();
        self.write(|document| document.set(&path, value))
    }

    pub fn set_typed(
        &mut self,
        path: impl Into<TagPath>,
        tag_type: &TagType,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let value = tag_type.construct(value.into())?;
        self.set(path, value)
    }

    /// Removes the tag at `path`, returning it.
    pub fn take(&mut self, path: impl Into<TagPath>) -> Result<Option<Value>> {
        let path = path.into();
        self.write(|document| Ok(document.take(&path)))
    }

    /// Removes the tag at `path`; `false` when there was nothing to remove.
    pub fn remove(&mut self, path: impl Into<TagPath>) -> Result<bool> {
        self.take(path).map(|removed| removed.is_some())
    }

    /// Top-level keys in insertion order.
    pub fn keys(&self) -> Result<Vec<String>> {
        self.read(|document| document.keys().map(str::to_owned).collect())
    }

    /// Deep-merges `other` into the bound data.
    pub fn merge(&mut self, other: &Document) -> Result<()> {
        self.write(|document| {
            document.merge(other);
            Ok(())
        })
    }

    /// An independent copy of the current data.
    pub fn to_document(&self) -> Result<Document> {
        self.read(Document::clone)
    }

    pub fn to_snbt(&self) -> Result<String> {
        self.read(Document::to_snbt)
    }

    /// Detaches the data from its source.
    pub fn into_document(self) -> Result<Document> {
        match self {
            Binding::Entity(binding) => binding.load(),
            Binding::Block(binding) => Ok(binding.load()),
            Binding::BlockEntity(binding) => Ok(binding.working_copy().clone()),
            Binding::Item(document) | Binding::String(document) => Ok(document),
            Binding::File(binding) => Ok(binding.into_document()),
        }
    }

    /// Writes a block entity's working copy back into the world. Other kinds
    /// have nothing pending and return immediately.
    pub fn flush(&mut self) -> Result<()> {
        match self {
            Binding::BlockEntity(binding) => binding.flush(),
            _ => Ok(()),
        }
    }

    /// Writes a file binding to disk.
    pub fn save(&self) -> Result<()> {
        match self {
            Binding::File(binding) => binding.save(),
            other => Err(Error::unsupported(format!(
                "{:?} bindings cannot be saved",
                other.kind()
            ))),
        }
    }
}

impl From<Document> for Binding<'_> {
    #[inline]
    fn from(document: Document) -> Self {
        Binding::String(document)
    }
}

impl From<FileBinding> for Binding<'_> {
    #[inline]
    fn from(binding: FileBinding) -> Self {
        Binding::File(binding)
    }
}
