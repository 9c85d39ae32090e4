use nbt_compound::{Compound, Document, Error, List, TagID, Value, snbt};

fn malformed(result: Result<impl std::fmt::Debug, Error>) -> (String, usize, &'static str) {
    match result {
        Err(Error::MalformedTag {
            fragment,
            position,
            reason,
        }) => (fragment, position, reason),
        other => panic!("expected MalformedTag, got {other:?}"),
    }
}

// ============ Reading ============

#[test]
fn test_parse_number_suffixes() {
    let doc = Document::parse("{a:1b,b:2s,c:3,d:4L,e:1.5f,f:2.5d,g:2.5,h:7l,i:1e3,j:3f}").unwrap();
    assert_eq!(doc.get("a"), Some(&Value::Byte(1)));
    assert_eq!(doc.get("b"), Some(&Value::Short(2)));
    assert_eq!(doc.get("c"), Some(&Value::Int(3)));
    assert_eq!(doc.get("d"), Some(&Value::Long(4)));
    assert_eq!(doc.get("e"), Some(&Value::Float(1.5)));
    assert_eq!(doc.get("f"), Some(&Value::Double(2.5)));
    assert_eq!(doc.get("g"), Some(&Value::Double(2.5)));
    assert_eq!(doc.get("h"), Some(&Value::Long(7)));
    assert_eq!(doc.get("i"), Some(&Value::Double(1000.0)));
    assert_eq!(doc.get("j"), Some(&Value::Float(3.0)));
}

#[test]
fn test_parse_booleans_and_words() {
    let doc = Document::parse("{on:true,off:false,word:stone,neg:-12}").unwrap();
    assert_eq!(doc.get("on"), Some(&Value::Byte(1)));
    assert_eq!(doc.get("off"), Some(&Value::Byte(0)));
    assert_eq!(doc.get("word"), Some(&Value::from("stone")));
    assert_eq!(doc.get("neg"), Some(&Value::Int(-12)));
}

#[test]
fn test_parse_quoted_strings_and_keys() {
    let doc =
        Document::parse(r#"{"key with space":'single "quote"', k:"back\\slash \"q\""}"#).unwrap();
    assert_eq!(doc.get(r#""key with space""#), Some(&Value::from(r#"single "quote""#)));
    assert_eq!(doc.get("k"), Some(&Value::from(r#"back\slash "q""#)));
}

#[test]
fn test_parse_lists_and_arrays() {
    let doc = Document::parse("{l:[1,2,3],e:[],b:[B;1b,2],i:[I; 1, -2],g:[L;1L,2]}").unwrap();
    let list = doc.get("l").and_then(Value::as_list).unwrap();
    assert_eq!(list.element_tag_id(), TagID::Int);
    assert_eq!(list.len(), 3);
    assert_eq!(doc.get("e").and_then(Value::as_list).map(List::len), Some(0));
    assert_eq!(doc.get("b"), Some(&Value::ByteArray(vec![1, 2])));
    assert_eq!(doc.get("i"), Some(&Value::IntArray(vec![1, -2])));
    assert_eq!(doc.get("g"), Some(&Value::LongArray(vec![1, 2])));
}

#[test]
fn test_parse_rejects_heterogeneous_list() {
    let (_, position, reason) = malformed(Document::parse("{l:[1,2b]}"));
    assert_eq!(position, 6);
    assert_eq!(reason, "list elements must share one type");
}

#[test]
fn test_parse_rejects_bad_array_elements() {
    malformed(Document::parse("{b:[B;300]}"));
    malformed(Document::parse("{i:[I;1L]}"));
    malformed(Document::parse("{i:[I;\"x\"]}"));
}

#[test]
fn test_parse_rejects_out_of_range_numbers() {
    let (fragment, position, reason) = malformed(Document::parse("{a:128b}"));
    assert_eq!(reason, "number out of range");
    assert_eq!(position, 3);
    assert!(fragment.starts_with("128b"));
    malformed(Document::parse("{a:40000s}"));
    malformed(Document::parse("{a:3000000000}"));
}

#[test]
fn test_parse_truncated_input() {
    let (_, position, reason) = malformed(Document::parse("{Count:1b"));
    assert_eq!(position, 9);
    assert_eq!(reason, "unexpected end of input");
    malformed(Document::parse("{a:\"open}"));
    malformed(Document::parse("{a:[1,2}"));
    malformed(Document::parse(""));
}

#[test]
fn test_parse_rejects_trailing_data_and_non_compound_root() {
    let (fragment, _, reason) = malformed(Document::parse("{} extra"));
    assert_eq!(reason, "trailing data after end of input");
    assert_eq!(fragment, "extra");
    malformed(Document::parse("[1,2]"));
    malformed(Document::parse("5"));
}

#[test]
fn test_parse_depth_limit() {
    let ok = format!("{}{}", "{a:".repeat(511) + "{", "}".repeat(512));
    assert!(Document::parse(&ok).is_ok());
    let deep = format!("{}{}", "{a:".repeat(512) + "{", "}".repeat(513));
    let (_, _, reason) = malformed(Document::parse(&deep));
    assert_eq!(reason, "nesting too deep");
}

#[test]
fn test_parse_value_roots() {
    assert_eq!(snbt::parse_value("3s").unwrap(), Value::Short(3));
    assert_eq!(snbt::parse_value(" [I;1] ").unwrap(), Value::IntArray(vec![1]));
    assert_eq!(snbt::parse_value("\"x\"").unwrap(), Value::from("x"));
}

// ============ Writing ============

#[test]
fn test_write_compact_form() {
    let mut compound = Compound::new();
    compound.insert("b", 1i8);
    compound.insert("s", 2i16);
    compound.insert("i", 3i32);
    compound.insert("l", 4i64);
    compound.insert("f", 1.5f32);
    compound.insert("d", 2.5f64);
    compound.insert("id", "minecraft:stone");
    compound.insert("weird key", Value::IntArray(vec![1, 2]));
    compound.insert("longs", Value::LongArray(vec![5]));
    let doc = Document::from(compound);
    assert_eq!(
        doc.to_snbt(),
        r#"{b:1b,s:2s,i:3,l:4L,f:1.5f,d:2.5d,id:"minecraft:stone","weird key":[I;1,2],longs:[L;5L]}"#
    );
}

#[test]
fn test_write_non_finite_floats() {
    let mut compound = Compound::new();
    compound.insert("n", f32::NAN);
    compound.insert("p", f64::INFINITY);
    compound.insert("m", f32::NEG_INFINITY);
    let text = Document::from(compound).to_snbt();
    assert_eq!(text, "{n:NaNf,p:Infinityd,m:-Infinityf}");

    let doc = Document::parse(&text).unwrap();
    assert!(doc.get("n").and_then(Value::as_float).unwrap().is_nan());
    assert_eq!(doc.get("p"), Some(&Value::Double(f64::INFINITY)));
    assert_eq!(doc.get("m"), Some(&Value::Float(f32::NEG_INFINITY)));
}

#[test]
fn test_write_floats_round_trip_exactly() {
    for value in [0.1f32, 1.0e-7, 3.4028235e38, -0.0, 16777217.0] {
        let text = snbt::to_string(&Value::Float(value));
        assert_eq!(snbt::parse_value(&text).unwrap(), Value::Float(value), "{text}");
    }
    for value in [0.1f64, 1.0e300, 5e-324, 123456789.123456789] {
        let text = snbt::to_string(&Value::Double(value));
        assert_eq!(snbt::parse_value(&text).unwrap(), Value::Double(value), "{text}");
    }
}

#[test]
fn test_pretty_form_parses_back() {
    let doc = Document::parse(
        r#"{id:"minecraft:chest",Items:[{Slot:0b,id:"minecraft:apple",Count:3b}],pos:[I;1,64,-3],empty:{}}"#,
    )
    .unwrap();
    let pretty = doc.to_pretty_snbt("  ");
    assert!(pretty.contains("\n  Items: [\n    {\n"));
    assert!(pretty.contains("pos: [I; 1, 64, -3]"));
    assert!(pretty.contains("empty: {}"));
    assert_eq!(Document::parse(&pretty).unwrap(), doc);
}

#[test]
fn test_round_trip_preserves_kinds_and_order() {
    let text = r#"{z:1b,a:[[1s],[2s]],m:{"":"empty key",dot.key:[L;]},list:[{a:1},{b:2}],arr:[B;]}"#;
    let doc = Document::parse(text).unwrap();
    assert_eq!(doc.to_snbt(), text);
    let again = Document::parse(&doc.to_snbt()).unwrap();
    assert_eq!(again, doc);
}

#[test]
fn test_diamond_sword_example() {
    let mut doc = Document::parse(r#"{id:"minecraft:diamond_sword",Count:1b}"#).unwrap();
    doc.set("tag.Damage", 10).unwrap();
    assert_eq!(doc.get("tag.Damage"), Some(&Value::Int(10)));
    let text = doc.to_snbt();
    assert_eq!(text, r#"{id:"minecraft:diamond_sword",Count:1b,tag:{Damage:10}}"#);
    assert_eq!(Document::parse(&text).unwrap(), doc);
}
