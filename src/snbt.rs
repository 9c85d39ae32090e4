//! The canonical text notation ("SNBT").
//!
//! In `{id:"minecraft:diamond_sword",tag:{Damage:0},Count:1b}` numeric kinds
//! other than int carry a suffix (`b`, `s`, `L`, `f`, `d`) and strings are
//! quoted. `[...]` holds lists and `[B;...]`/`[I;...]`/`[L;...]` typed arrays.
//! Written text always re-parses to an equal tree.

mod read;
mod write;

use crate::{Compound, Result, Value};

pub(crate) use write::write_value;

/// Deepest nesting either direction accepts.
pub(crate) const MAX_DEPTH: usize = 512;

/// Parses any single tag, e.g. `3s` or `[I;1,2]`.
pub fn parse_value(text: &str) -> Result<Value> {
    let mut reader = read::Reader::new(text);
    let value = reader.read_value()?;
    reader.finish()?;
    Ok(value)
}

/// Parses a compound, rejecting any other root.
pub fn parse_compound(text: &str) -> Result<Compound> {
    let mut reader = read::Reader::new(text);
    let compound = reader.read_root_compound()?;
    reader.finish()?;
    Ok(compound)
}

/// Compact canonical form.
pub fn to_string(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, None, 0);
    out
}

/// Multi-line form, one entry per line, nested levels indented by `indent`.
pub fn to_pretty_string(value: &Value, indent: &str) -> String {
    let mut out = String::new();
    write_value(&mut out, value, Some(indent), 0);
    out
}

pub(crate) fn compound_to_string(compound: &Compound, indent: Option<&str>) -> String {
    let mut out = String::new();
    write::write_compound(&mut out, compound, indent, 0);
    out
}
