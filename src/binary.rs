//! Binary NBT, the on-disk form of player and level data.
//!
//! A document is a root tag id (always compound here), the root name as a
//! `u16`-prefixed modified UTF-8 string, then the payload. Java edition files
//! are big-endian; Bedrock uses little-endian, so both directions are generic
//! over [`ByteOrder`].

mod read;
mod write;

use crate::{ByteOrder, Compound, Result};

/// Reads a binary document, returning the root name and compound.
///
/// Truncated input, unknown tag ids, mixed lists and trailing bytes fail
/// with [`Error::MalformedTag`](crate::Error::MalformedTag).
pub fn read_root<O: ByteOrder>(bytes: &[u8]) -> Result<(String, Compound)> {
    read::Reader::<O>::new(bytes).read_root()
}

/// Writes `compound` as a binary document named `name`.
pub fn write_root<O: ByteOrder>(name: &str, compound: &Compound) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(256);
    write::write_root::<O>(&mut out, name, compound)?;
    Ok(out)
}
