//! In-memory host objects shared by the binding and resolver tests.

#![allow(dead_code)]

use std::{cell::RefCell, collections::HashMap};

use nbt_compound::{
    Block, BlockLocation, BlockStore, Compound, Entity, Error, Host, Item, ItemType, Result, Slot,
    TileState,
};

#[derive(Default)]
pub struct MockEntity {
    pub persistent: RefCell<Compound>,
    pub native: RefCell<Compound>,
    /// Entity types such as area effect clouds that carry no persistent data.
    pub rejects_persistent: bool,
    pub writes: RefCell<usize>,
}

impl MockEntity {
    pub fn with_native(native: Compound) -> Self {
        Self {
            native: RefCell::new(native),
            ..Self::default()
        }
    }

    pub fn rejecting() -> Self {
        Self {
            rejects_persistent: true,
            ..Self::default()
        }
    }
}

impl Entity for MockEntity {
    fn persistent_data(&self) -> Result<Compound> {
        if self.rejects_persistent {
            return Err(Error::UnsupportedHostOperation("no persistent data".into()));
        }
        Ok(self.persistent.borrow().clone())
    }

    fn set_persistent_data(&self, data: Compound) -> Result<()> {
        if self.rejects_persistent {
            return Err(Error::UnsupportedHostOperation("no persistent data".into()));
        }
        *self.writes.borrow_mut() += 1;
        *self.persistent.borrow_mut() = data;
        Ok(())
    }

    fn native_data(&self) -> Result<Compound> {
        Ok(self.native.borrow().clone())
    }

    fn set_native_data(&self, data: Compound) -> Result<()> {
        *self.writes.borrow_mut() += 1;
        *self.native.borrow_mut() = data;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockTileState {
    pub world: RefCell<Compound>,
    pub applies: RefCell<usize>,
}

impl MockTileState {
    pub fn new(data: Compound) -> Self {
        Self {
            world: RefCell::new(data),
            applies: RefCell::new(0),
        }
    }
}

impl TileState for MockTileState {
    fn data(&self) -> Compound {
        self.world.borrow().clone()
    }

    fn apply(&self, data: Compound) -> Result<()> {
        *self.applies.borrow_mut() += 1;
        *self.world.borrow_mut() = data;
        Ok(())
    }
}

pub struct MockBlock {
    pub location: BlockLocation,
    pub tile: Option<MockTileState>,
}

impl MockBlock {
    pub fn plain(x: i32, y: i32, z: i32) -> Self {
        Self {
            location: BlockLocation::new("world", x, y, z),
            tile: None,
        }
    }

    pub fn chest(data: Compound) -> Self {
        Self {
            location: BlockLocation::new("world", 0, 64, 0),
            tile: Some(MockTileState::new(data)),
        }
    }
}

impl Block for MockBlock {
    fn location(&self) -> BlockLocation {
        self.location.clone()
    }

    fn tile_state(&self) -> Option<&dyn TileState> {
        self.tile.as_ref().map(|tile| tile as &dyn TileState)
    }
}

#[derive(Default)]
pub struct MockBlockStore {
    pub data: RefCell<HashMap<BlockLocation, Compound>>,
}

impl BlockStore for MockBlockStore {
    fn load(&self, location: &BlockLocation) -> Compound {
        self.data.borrow().get(location).cloned().unwrap_or_default()
    }

    fn store(&self, location: &BlockLocation, data: Compound) -> Result<()> {
        self.data.borrow_mut().insert(location.clone(), data);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockHost {
    pub store: Option<MockBlockStore>,
}

impl MockHost {
    pub fn with_block_store() -> Self {
        Self {
            store: Some(MockBlockStore::default()),
        }
    }

    pub fn without_block_store() -> Self {
        Self { store: None }
    }
}

impl Host for MockHost {
    fn block_store(&self) -> Option<&dyn BlockStore> {
        self.store.as_ref().map(|store| store as &dyn BlockStore)
    }
}

pub struct MockItem {
    pub native: Compound,
    pub custom: Compound,
    pub empty: bool,
}

impl MockItem {
    pub fn sword() -> Self {
        let mut custom = Compound::new();
        custom.insert("owner", "Steve");
        let mut tag = Compound::new();
        tag.insert("Damage", 3);
        tag.insert("custom", custom.clone());
        let mut native = Compound::new();
        native.insert("id", "minecraft:diamond_sword");
        native.insert("Count", 1i8);
        native.insert("tag", tag);
        Self {
            native,
            custom,
            empty: false,
        }
    }

    pub fn air() -> Self {
        Self {
            native: Compound::new(),
            custom: Compound::new(),
            empty: true,
        }
    }
}

impl Item for MockItem {
    fn is_empty(&self) -> bool {
        self.empty
    }

    fn native_data(&self) -> Compound {
        self.native.clone()
    }

    fn custom_data(&self) -> Compound {
        self.custom.clone()
    }
}

pub struct MockItemType {
    pub representative: Option<MockItem>,
}

impl ItemType for MockItemType {
    fn representative(&self) -> Option<&dyn Item> {
        self.representative.as_ref().map(|item| item as &dyn Item)
    }
}

pub struct MockSlot {
    pub item: Option<MockItem>,
}

impl Slot for MockSlot {
    fn item(&self) -> Option<&dyn Item> {
        self.item.as_ref().map(|item| item as &dyn Item)
    }
}
