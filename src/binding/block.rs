use tracing::debug;

use crate::{BlockLocation, BlockStore, Document, Result, TileState};

/// A working copy of a tile state's data.
///
/// Mutations stay in the copy until [`flush`](Self::flush) writes it back
/// into the world.
pub struct BlockEntityBinding<'h> {
    state: &'h dyn TileState,
    working: Document,
    dirty: bool,
}

impl<'h> BlockEntityBinding<'h> {
    pub fn new(state: &'h dyn TileState) -> Self {
        Self {
            state,
            working: Document::from(state.data()),
            dirty: false,
        }
    }

    #[inline]
    pub fn working_copy(&self) -> &Document {
        &self.working
    }

    pub(crate) fn modify<R>(&mut self, f: impl FnOnce(&mut Document) -> Result<R>) -> Result<R> {
        let result = f(&mut self.working)?;
        self.dirty = true;
        Ok(result)
    }

    /// Whether the working copy changed since it was loaded or last flushed.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the working copy into the tile state. A clean copy writes
    /// nothing, so world changes made since loading survive.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        debug!(entries = self.working.root().len(), "flushing block entity");
        self.state.apply(self.working.root().clone())?;
        self.dirty = false;
        Ok(())
    }

    /// Discards local changes and reloads the working copy from the world.
    pub fn reload(&mut self) {
        self.working = Document::from(self.state.data());
        self.dirty = false;
    }
}

/// Live out-of-band data of a plain block, written through on every mutation.
pub struct BlockBinding<'h> {
    store: &'h dyn BlockStore,
    location: BlockLocation,
}

impl<'h> BlockBinding<'h> {
    pub fn new(store: &'h dyn BlockStore, location: BlockLocation) -> Self {
        Self { store, location }
    }

    #[inline]
    pub fn location(&self) -> &BlockLocation {
        &self.location
    }

    pub(crate) fn load(&self) -> Document {
        Document::from(self.store.load(&self.location))
    }

    pub(crate) fn modify<R>(&self, f: impl FnOnce(&mut Document) -> Result<R>) -> Result<R> {
        let mut document = self.load();
        let result = f(&mut document)?;
        self.store.store(&self.location, document.into_root())?;
        Ok(result)
    }
}
