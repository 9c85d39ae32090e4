#![cfg(feature = "serde")]

use nbt_compound::{
    BlockLocation, Compound, Document, FileFormat, List, ResolveOptions, ResolverConfig, Value,
};

#[test]
fn test_value_serializes_naturally() {
    let doc = Document::parse(r#"{n:1b,s:"x",l:[1s,2s],arr:[I;3],c:{f:1.5f}}"#).unwrap();
    let json = serde_json::to_string(&Value::Compound(doc.into_root())).unwrap();
    assert_eq!(json, r#"{"n":1,"s":"x","l":[1,2],"arr":[3],"c":{"f":1.5}}"#);
}

#[test]
fn test_value_deserializes_from_json() {
    let value: Value =
        serde_json::from_str(r#"{"b":true,"i":5,"d":0.5,"s":"t","l":[1,2],"c":{}}"#).unwrap();
    let compound = value.as_compound().unwrap();
    assert_eq!(compound.get("b"), Some(&Value::Byte(1)));
    assert_eq!(compound.get("i"), Some(&Value::Long(5)));
    assert_eq!(compound.get("d"), Some(&Value::Double(0.5)));
    assert_eq!(compound.get("s"), Some(&Value::from("t")));
    assert_eq!(compound.get("l").and_then(Value::as_list).map(List::len), Some(2));
    assert_eq!(compound.keys().collect::<Vec<_>>(), vec!["b", "i", "d", "s", "l", "c"]);

    assert!(serde_json::from_str::<Value>(r#"[1,"mixed"]"#).is_err());
    assert!(serde_json::from_str::<Compound>("[1]").is_err());
}

#[test]
fn test_document_travels_as_snbt() {
    let doc = Document::parse("{a:1b,b:[L;2L]}").unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    assert_eq!(json, r#""{a:1b,b:[L;2L]}""#);
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);

    let err = serde_json::from_str::<Document>(r#""{a:""#).unwrap_err();
    assert!(err.to_string().contains("malformed tag"));
}

#[test]
fn test_config_records() {
    let options: ResolveOptions = serde_json::from_str(r#"{"copy":true}"#).unwrap();
    assert_eq!(options, ResolveOptions::default().copy(true));

    let config: ResolverConfig =
        serde_json::from_str(r#"{"root":"/srv/data","new_file_format":"text"}"#).unwrap();
    assert_eq!(config.root, std::path::PathBuf::from("/srv/data"));
    assert_eq!(config.new_file_format, FileFormat::Text);
    let defaults: ResolverConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(defaults, ResolverConfig::default());
    assert_eq!(defaults.new_file_format, FileFormat::GzipBinary);

    let location = BlockLocation::new("nether", 1, -2, 3);
    let json = serde_json::to_string(&location).unwrap();
    assert_eq!(serde_json::from_str::<BlockLocation>(&json).unwrap(), location);
}
