//! Picks the binding for an arbitrary source object.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::{
    Binding, BlockBinding, BlockEntityBinding, Document, EntityBinding, FileBinding, FileFormat,
    Result,
    host::{Block, Entity, Host, Item, ItemType, Slot},
};

/// Per-call options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ResolveOptions {
    /// Detach the result from its source.
    pub copy: bool,
    /// Bind the complete native form of entities and items instead of their
    /// custom-data compartment.
    pub full: bool,
    /// Treat text sources as file paths.
    pub file: bool,
}

impl ResolveOptions {
    #[inline]
    pub fn copy(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    #[inline]
    pub fn full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }

    #[inline]
    pub fn file(mut self, file: bool) -> Self {
        self.file = file;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ResolverConfig {
    /// Directory relative file paths are resolved against.
    pub root: PathBuf,
    /// Format of files created by a later save, unless the extension implies one.
    pub new_file_format: FileFormat,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            new_file_format: FileFormat::default(),
        }
    }
}

#[derive(Clone, Copy)]
pub enum Source<'h> {
    Block(&'h dyn Block),
    Entity(&'h dyn Entity),
    ItemStack(&'h dyn Item),
    ItemType(&'h dyn ItemType),
    Slot(&'h dyn Slot),
    /// Canonical text, or a file path when [`ResolveOptions::file`] is set.
    Text(&'h str),
}

impl Source<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Source::Block(_) => "block",
            Source::Entity(_) => "entity",
            Source::ItemStack(_) => "item stack",
            Source::ItemType(_) => "item type",
            Source::Slot(_) => "slot",
            Source::Text(_) => "text",
        }
    }
}

pub struct Resolver<'h> {
    host: &'h dyn Host,
    config: ResolverConfig,
}

impl<'h> Resolver<'h> {
    pub fn new(host: &'h dyn Host) -> Self {
        Self {
            host,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Binds `source`, or yields `None` when it carries no tag data.
    ///
    /// Malformed text fails with [`Error::MalformedTag`](crate::Error::MalformedTag)
    /// instead of resolving to `None`.
    pub fn resolve(
        &self,
        source: Source<'h>,
        options: ResolveOptions,
    ) -> Result<Option<Binding<'h>>> {
        let kind = source.kind();
        let Some(binding) = self.dispatch(source, options)? else {
            debug!(source = kind, ?options, "source carries no tag data");
            return Ok(None);
        };
        trace!(source = kind, binding = ?binding.kind(), ?options, "resolved binding");

        if options.copy && binding.kind() != crate::BindingKind::String {
            return binding.into_document().map(|document| Some(Binding::String(document)));
        }
        Ok(Some(binding))
    }

    /// Resolves every source, skipping those without tag data.
    pub fn resolve_all(
        &self,
        sources: impl IntoIterator<Item = Source<'h>>,
        options: ResolveOptions,
    ) -> Result<Vec<Binding<'h>>> {
        let mut bindings = Vec::new();
        for source in sources {
            bindings.extend(self.resolve(source, options)?);
        }
        Ok(bindings)
    }

    fn dispatch(&self, source: Source<'h>, options: ResolveOptions) -> Result<Option<Binding<'h>>> {
        Ok(match source {
            Source::Block(block) => match block.tile_state() {
                Some(state) => Some(Binding::BlockEntity(BlockEntityBinding::new(state))),
                None => self
                    .host
                    .block_store()
                    .map(|store| Binding::Block(BlockBinding::new(store, block.location()))),
            },
            Source::Entity(entity) => {
                Some(Binding::Entity(EntityBinding::new(entity, options.full)))
            }
            Source::ItemStack(item) => item_snapshot(Some(item), options.full),
            Source::ItemType(item_type) => item_snapshot(item_type.representative(), options.full),
            Source::Slot(slot) => item_snapshot(slot.item(), options.full),
            Source::Text(text) if options.file => {
                let path = self.file_path(text);
                Some(Binding::File(FileBinding::open(path, self.config.new_file_format)?))
            }
            Source::Text(text) => Some(Binding::String(Document::parse(text)?)),
        })
    }

    fn file_path(&self, text: &str) -> PathBuf {
        let path = Path::new(text.trim());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config.root.join(path)
        }
    }
}

fn item_snapshot<'h>(item: Option<&dyn Item>, full: bool) -> Option<Binding<'h>> {
    let item = item.filter(|item| !item.is_empty())?;
    let data = if full { item.native_data() } else { item.custom_data() };
    Some(Binding::Item(Document::from(data)))
}
