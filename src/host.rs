//! Capabilities the host game provides.
//!
//! Every method takes `&self`: host objects are handles onto state the game
//! owns, and the game mutates that state through interior mutability on its
//! main thread. Bindings over entities and blocks must only be used from that
//! thread.

use crate::{Compound, Result};

/// Coordinates keying out-of-band block data.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockLocation {
    pub world: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockLocation {
    pub fn new(world: impl Into<String>, x: i32, y: i32, z: i32) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }
}

pub trait Entity {
    /// The namespaced compartment reserved for plugin and script data.
    ///
    /// Entity types that cannot carry it fail with
    /// [`Error::UnsupportedHostOperation`](crate::Error::UnsupportedHostOperation).
    fn persistent_data(&self) -> Result<Compound>;

    fn set_persistent_data(&self, data: Compound) -> Result<()>;

    /// The entity's entire native serialized form.
    fn native_data(&self) -> Result<Compound>;

    fn set_native_data(&self, data: Compound) -> Result<()>;
}

/// The tile (container) state behind a block.
pub trait TileState {
    fn data(&self) -> Compound;

    /// Writes `data` back into the live world state.
    fn apply(&self, data: Compound) -> Result<()>;
}

pub trait Block {
    fn location(&self) -> BlockLocation;

    fn tile_state(&self) -> Option<&dyn TileState>;
}

/// Out-of-band block metadata keyed by location.
pub trait BlockStore {
    /// Stored data, empty when nothing was stored yet.
    fn load(&self, location: &BlockLocation) -> Compound;

    fn store(&self, location: &BlockLocation, data: Compound) -> Result<()>;
}

pub trait Item {
    /// Air or a zero-sized stack.
    fn is_empty(&self) -> bool {
        false
    }

    /// The complete native item representation (id, count, components).
    fn native_data(&self) -> Compound;

    /// Only the custom/persistent data embedded in the item.
    fn custom_data(&self) -> Compound;
}

/// A script-level item type, which may stand for several concrete stacks.
pub trait ItemType {
    /// One concrete stack of this type, if the type names any.
    fn representative(&self) -> Option<&dyn Item>;
}

pub trait Slot {
    fn item(&self) -> Option<&dyn Item>;
}

pub trait Host {
    /// `None` when the host has no out-of-band block metadata.
    fn block_store(&self) -> Option<&dyn BlockStore>;
}
