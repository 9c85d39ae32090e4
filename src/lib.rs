//! NBT compound documents for scripting layers.
//!
//! A [`Document`] is an owned tree of tags rooted at a [`Compound`], addressed
//! by dotted [`TagPath`]s and read from / written to canonical text (SNBT) or
//! binary NBT. A [`Resolver`] binds a document to the game object it came
//! from, and the resulting [`Binding`] decides when changes reach that object.
//!
//! ```
//! use nbt_compound::Document;
//!
//! let mut doc = Document::parse(r#"{id:"minecraft:diamond_sword",Count:1b}"#).unwrap();
//! doc.set("tag.Damage", 10).unwrap();
//! assert_eq!(
//!     doc.to_snbt(),
//!     r#"{id:"minecraft:diamond_sword",Count:1b,tag:{Damage:10}}"#
//! );
//! ```

pub use zerocopy::BigEndian;
pub use zerocopy::LittleEndian;
pub use zerocopy::NativeEndian;

pub mod binary;
pub mod binding;
mod document;
mod error;
pub mod host;
mod index;
pub mod nbt;
mod path;
pub mod resolve;
#[cfg(feature = "serde")]
mod ser;
pub mod snbt;
pub mod tag;
mod util;
pub mod value;

pub use binding::*;
pub use document::*;
pub use error::*;
pub use host::*;
pub use index::*;
pub use nbt::*;
pub use path::*;
pub use resolve::*;
pub use tag::*;
pub use util::*;
pub use value::*;
