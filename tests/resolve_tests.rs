mod common;

use common::{MockBlock, MockEntity, MockHost, MockItem, MockItemType, MockSlot};
use nbt_compound::{BindingKind, Compound, Error, ResolveOptions, Resolver, Source, Value};

fn chest_data() -> Compound {
    let mut data = Compound::new();
    data.insert("id", "minecraft:chest");
    data
}

// ============ Dispatch ============

#[test]
fn test_block_with_tile_state_is_block_entity() {
    let host = MockHost::without_block_store();
    let block = MockBlock::chest(chest_data());
    let binding = Resolver::new(&host)
        .resolve(Source::Block(&block), ResolveOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(binding.kind(), BindingKind::BlockEntity);
    assert_eq!(binding.get("id").unwrap(), Some(Value::from("minecraft:chest")));
}

#[test]
fn test_plain_block_uses_block_store_when_available() {
    let host = MockHost::with_block_store();
    let block = MockBlock::plain(4, 5, 6);
    let resolver = Resolver::new(&host);
    let mut binding = resolver
        .resolve(Source::Block(&block), ResolveOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(binding.kind(), BindingKind::Block);
    binding.set("mined", true).unwrap();

    let store = host.store.as_ref().unwrap();
    assert_eq!(
        store.data.borrow()[&block.location].get("mined"),
        Some(&Value::Byte(1))
    );
}

#[test]
fn test_plain_block_without_store_is_absent() {
    let host = MockHost::without_block_store();
    let block = MockBlock::plain(0, 0, 0);
    let resolved = Resolver::new(&host)
        .resolve(Source::Block(&block), ResolveOptions::default())
        .unwrap();
    assert!(resolved.is_none());
}

#[test]
fn test_entity_compartment_follows_full_flag() {
    let host = MockHost::default();
    let mut native = Compound::new();
    native.insert("Health", 20.0f32);
    let entity = MockEntity::with_native(native);
    let resolver = Resolver::new(&host);

    let custom = resolver
        .resolve(Source::Entity(&entity), ResolveOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(custom.kind(), BindingKind::Entity);
    assert_eq!(custom.get("Health").unwrap(), None);

    let full = resolver
        .resolve(Source::Entity(&entity), ResolveOptions::default().full(true))
        .unwrap()
        .unwrap();
    assert_eq!(full.get("Health").unwrap(), Some(Value::Float(20.0)));
}

#[test]
fn test_items_are_snapshots() {
    let host = MockHost::default();
    let item = MockItem::sword();
    let resolver = Resolver::new(&host);

    let mut custom = resolver
        .resolve(Source::ItemStack(&item), ResolveOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(custom.kind(), BindingKind::Item);
    assert!(!custom.is_live());
    assert_eq!(custom.keys().unwrap(), vec!["owner"]);
    custom.set("owner", "Alex").unwrap();
    assert_eq!(item.custom.get("owner"), Some(&Value::from("Steve")));

    let full = resolver
        .resolve(Source::ItemStack(&item), ResolveOptions::default().full(true))
        .unwrap()
        .unwrap();
    assert_eq!(full.get("tag.Damage").unwrap(), Some(Value::Int(3)));
    assert_eq!(full.get("id").unwrap(), Some(Value::from("minecraft:diamond_sword")));
}

#[test]
fn test_empty_slots_and_item_types_are_absent() {
    let host = MockHost::default();
    let resolver = Resolver::new(&host);
    let options = ResolveOptions::default();

    let empty = MockSlot { item: None };
    assert!(resolver.resolve(Source::Slot(&empty), options).unwrap().is_none());
    let air = MockSlot {
        item: Some(MockItem::air()),
    };
    assert!(resolver.resolve(Source::Slot(&air), options).unwrap().is_none());
    assert!(resolver.resolve(Source::ItemStack(&MockItem::air()), options).unwrap().is_none());

    let nothing = MockItemType { representative: None };
    assert!(resolver.resolve(Source::ItemType(&nothing), options).unwrap().is_none());
    let sword = MockItemType {
        representative: Some(MockItem::sword()),
    };
    let binding = resolver.resolve(Source::ItemType(&sword), options).unwrap().unwrap();
    assert_eq!(binding.kind(), BindingKind::Item);

    let full_slot = MockSlot {
        item: Some(MockItem::sword()),
    };
    let binding = resolver
        .resolve(Source::Slot(&full_slot), options.full(true))
        .unwrap()
        .unwrap();
    assert_eq!(binding.get("Count").unwrap(), Some(Value::Byte(1)));
}

#[test]
fn test_text_parses_or_fails() {
    let host = MockHost::default();
    let resolver = Resolver::new(&host);
    let binding = resolver
        .resolve(Source::Text("{a:1b}"), ResolveOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(binding.kind(), BindingKind::String);
    assert_eq!(binding.get("a").unwrap(), Some(Value::Byte(1)));

    let err = resolver
        .resolve(Source::Text("{a:"), ResolveOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, Error::MalformedTag { .. }));
}

// ============ Copies ============

#[test]
fn test_copy_severs_entity_write_back() {
    let host = MockHost::default();
    let entity = MockEntity::default();
    entity.persistent.borrow_mut().insert("level", 1i32);
    let resolver = Resolver::new(&host);

    let mut copy = resolver
        .resolve(Source::Entity(&entity), ResolveOptions::default().copy(true))
        .unwrap()
        .unwrap();
    assert_eq!(copy.kind(), BindingKind::String);
    copy.set("level", 99i32).unwrap();
    assert_eq!(entity.persistent.borrow().get("level"), Some(&Value::Int(1)));
    assert_eq!(*entity.writes.borrow(), 0);
}

#[test]
fn test_copy_of_block_entity_never_flushes() {
    let host = MockHost::default();
    let block = MockBlock::chest(chest_data());
    let mut copy = Resolver::new(&host)
        .resolve(Source::Block(&block), ResolveOptions::default().copy(true))
        .unwrap()
        .unwrap();
    copy.set("CustomName", "x").unwrap();
    copy.flush().unwrap();
    let tile = block.tile.as_ref().unwrap();
    assert_eq!(*tile.applies.borrow(), 0);
    assert!(tile.world.borrow().get("CustomName").is_none());
}

#[test]
fn test_copy_of_unsupported_entity_fails() {
    let host = MockHost::default();
    let entity = MockEntity::rejecting();
    let result = Resolver::new(&host)
        .resolve(Source::Entity(&entity), ResolveOptions::default().copy(true));
    assert!(matches!(result, Err(Error::UnsupportedHostOperation(_))));
}

// ============ Batches ============

#[test]
fn test_resolve_all_skips_absent() {
    let host = MockHost::without_block_store();
    let plain = MockBlock::plain(0, 0, 0);
    let chest = MockBlock::chest(chest_data());
    let empty = MockSlot { item: None };
    let entity = MockEntity::default();
    let bindings = Resolver::new(&host)
        .resolve_all(
            [
                Source::Block(&plain),
                Source::Block(&chest),
                Source::Slot(&empty),
                Source::Entity(&entity),
                Source::Text("{}"),
            ],
            ResolveOptions::default(),
        )
        .unwrap();
    let kinds: Vec<_> = bindings.iter().map(|binding| binding.kind()).collect();
    assert_eq!(kinds, vec![BindingKind::BlockEntity, BindingKind::Entity, BindingKind::String]);
}

#[test]
fn test_resolve_all_propagates_errors() {
    let host = MockHost::default();
    let result = Resolver::new(&host).resolve_all(
        [Source::Text("{}"), Source::Text("not a compound")],
        ResolveOptions::default(),
    );
    assert!(matches!(result, Err(Error::MalformedTag { .. })));
}
