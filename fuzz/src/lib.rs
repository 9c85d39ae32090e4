use nbt_compound::{BigEndian, Document, LittleEndian, TagPath, snbt};

/// Text input: parsing never panics, and anything that parses writes back to
/// text that parses to the same tree.
pub fn test_snbt(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(doc) = Document::parse(text) {
        let compact = doc.to_snbt();
        let reparsed = Document::parse(&compact).expect("compact output must parse");
        assert_eq!(reparsed.to_snbt(), compact);
        let pretty = doc.to_pretty_snbt("  ");
        let reparsed = Document::parse(&pretty).expect("pretty output must parse");
        assert_eq!(reparsed.to_snbt(), compact);
    }
    if let Ok(value) = snbt::parse_value(text) {
        let _ = snbt::to_string(&value);
    }
}

/// Binary input in both byte orders.
pub fn test_binary(data: &[u8]) {
    if let Ok(doc) = Document::from_binary::<BigEndian>(data) {
        let _ = doc.to_binary::<BigEndian>("");
        let _ = doc.to_binary::<LittleEndian>("");
    }
    if let Ok(doc) = Document::from_binary::<LittleEndian>(data) {
        let _ = doc.to_binary::<LittleEndian>("");
        let _ = doc.to_binary::<BigEndian>("");
    }
}

/// Path text against a fixed document: lookups and sets never panic.
pub fn test_paths(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut doc = Document::parse(r#"{a:{b:[{c:1}],d:[I;1]},e:[[1s]],"f.g":"h"}"#)
        .expect("fixed document parses");
    let path = TagPath::parse(text);
    let _ = doc.get(&path);
    let before = doc.clone();
    if doc.set(&path, 1i32).is_err() {
        assert_eq!(doc, before);
    }
    let _ = doc.take(&path);
    let _ = TagPath::parse(&path.to_string());
}

/// serde bridge: JSON input deserializes without panicking.
pub fn test_serde(data: &[u8]) {
    if let Ok(value) = serde_json::from_slice::<nbt_compound::Value>(data) {
        let _ = serde_json::to_vec(&value);
    }
}

pub fn test(data: &[u8]) {
    test_snbt(data);
    test_binary(data);
    test_paths(data);
    test_serde(data);
}
