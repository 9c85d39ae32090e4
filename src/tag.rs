//! The tag type registry.
//!
//! Every tag kind has one static [`TagType`] descriptor naming it the way
//! scripts do (`"byte"`, `"int-array"`, `"compound-list"`, ...). The table is
//! a `static` built at compile time and never changes, so lookups need no
//! synchronization.
//!
//! ```
//! use nbt_compound::{TagID, TagType, Value};
//!
//! let short = TagType::parse("short tag").unwrap();
//! assert_eq!(short.id(), TagID::Short);
//! assert_eq!(short.construct(Value::Int(5)).unwrap(), Value::Short(5));
//! ```

use crate::{Error, List, Result, TagID, Value};

/// Static description of one tag kind.
#[derive(Debug, PartialEq, Eq)]
pub struct TagType {
    name: &'static str,
    id: TagID,
    /// Element kind for the typed list descriptors.
    element: Option<TagID>,
}

macro_rules! tag_types {
    ($($name:literal => $id:ident $(of $element:ident)?),* $(,)?) => {
        static TAG_TYPES: &[TagType] = &[
            $(
                TagType {
                    name: $name,
                    id: TagID::$id,
                    element: tag_types!(@element $($element)?),
                },
            )*
        ];
    };
    (@element) => { None };
    (@element $element:ident) => { Some(TagID::$element) };
}

// The first twelve entries are indexed by `TagID as usize - 1`.
tag_types! {
    "byte" => Byte,
    "short" => Short,
    "int" => Int,
    "long" => Long,
    "float" => Float,
    "double" => Double,
    "byte-array" => ByteArray,
    "string" => String,
    "list" => List,
    "compound" => Compound,
    "int-array" => IntArray,
    "long-array" => LongArray,
    "byte-list" => List of Byte,
    "short-list" => List of Short,
    "int-list" => List of Int,
    "long-list" => List of Long,
    "float-list" => List of Float,
    "double-list" => List of Double,
    "string-list" => List of String,
    "compound-list" => List of Compound,
    "int-array-list" => List of IntArray,
}

impl TagType {
    /// Looks a descriptor up by name.
    ///
    /// Case, surrounding whitespace, a trailing `tag` word and space or
    /// underscore separators are ignored, so `"Byte Array Tag"`,
    /// `"byte_array"` and `"byte-array"` all name the same kind.
    pub fn parse(name: &str) -> Result<&'static TagType> {
        let normalized = normalize(name);
        TAG_TYPES
            .iter()
            .find(|tag_type| tag_type.name == normalized)
            .ok_or_else(|| Error::UnknownTagType(name.to_owned()))
    }

    /// The plain descriptor of a tag kind; `None` only for [`TagID::End`].
    pub fn of(id: TagID) -> Option<&'static TagType> {
        match id {
            TagID::End => None,
            id => TAG_TYPES.get(id as usize - 1),
        }
    }

    /// The plain descriptor of a value's kind.
    pub fn of_value(value: &Value) -> &'static TagType {
        &TAG_TYPES[value.tag_id() as usize - 1]
    }

    /// Every registered descriptor, plain kinds first.
    pub fn all() -> &'static [TagType] {
        TAG_TYPES
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn id(&self) -> TagID {
        self.id
    }

    #[inline]
    pub fn element(&self) -> Option<TagID> {
        self.element
    }

    /// Accessor half: `Some` when `value` already is this kind.
    ///
    /// Typed list descriptors also accept an empty list.
    pub fn extract(&self, value: &Value) -> Option<Value> {
        if value.tag_id() != self.id {
            return None;
        }
        match (self.element, value) {
            (Some(element), Value::List(list))
                if !list.is_empty() && list.element_tag_id() != element =>
            {
                None
            }
            _ => Some(value.clone()),
        }
    }

    /// Constructor half: converts a loosely typed value into this kind.
    ///
    /// Numbers convert between widths when the value fits (floats are
    /// truncated toward zero first), integer lists and arrays convert into
    /// each other, and a typed list descriptor wraps a single value into a
    /// one-element list. Anything else fails with [`Error::TagMismatch`].
    pub fn construct(&self, value: Value) -> Result<Value> {
        let found = value.tag_id();
        let mismatch = || Error::TagMismatch {
            expected: self.id,
            found,
        };
        if let Some(element) = self.element {
            let items = match value {
                Value::List(list) => list.into_iter().collect(),
                Value::ByteArray(values) => values.into_iter().map(Value::Byte).collect(),
                Value::IntArray(values) => values.into_iter().map(Value::Int).collect(),
                Value::LongArray(values) => values.into_iter().map(Value::Long).collect(),
                single => vec![single],
            };
            return typed_list(element, items);
        }
        match self.id {
            TagID::Byte => integer(&value).and_then(|v| i8::try_from(v).ok()).map(Value::Byte),
            TagID::Short => integer(&value).and_then(|v| i16::try_from(v).ok()).map(Value::Short),
            TagID::Int => integer(&value).and_then(|v| i32::try_from(v).ok()).map(Value::Int),
            TagID::Long => integer(&value).map(Value::Long),
            TagID::Float => value.as_number().map(|v| Value::Float(v as f32)),
            TagID::Double => value.as_number().map(Value::Double),
            TagID::String => match value {
                Value::String(_) => Some(value),
                _ => None,
            },
            TagID::ByteArray => integers(value)
                .and_then(|values| values.into_iter().map(|v| i8::try_from(v).ok()).collect())
                .map(Value::ByteArray),
            TagID::IntArray => integers(value)
                .and_then(|values| values.into_iter().map(|v| i32::try_from(v).ok()).collect())
                .map(Value::IntArray),
            TagID::LongArray => integers(value).map(Value::LongArray),
            TagID::List => match value {
                Value::List(_) => Some(value),
                _ => None,
            },
            TagID::Compound => match value {
                Value::Compound(_) => Some(value),
                _ => None,
            },
            TagID::End => None,
        }
        .ok_or_else(mismatch)
    }
}

fn normalize(name: &str) -> String {
    let lowered = name.trim().to_ascii_lowercase();
    let trimmed = lowered
        .strip_suffix(" tag")
        .or_else(|| lowered.strip_suffix("-tag"))
        .or_else(|| lowered.strip_suffix("_tag"))
        .unwrap_or(&lowered);
    trimmed
        .split([' ', '_', '-'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Byte(v) => Some(*v as i64),
        Value::Short(v) => Some(*v as i64),
        Value::Int(v) => Some(*v as i64),
        Value::Long(v) => Some(*v),
        Value::Float(v) if v.is_finite() && (i64::MIN as f32..=i64::MAX as f32).contains(v) => {
            Some(v.trunc() as i64)
        }
        Value::Double(v) if v.is_finite() && (i64::MIN as f64..=i64::MAX as f64).contains(v) => {
            Some(v.trunc() as i64)
        }
        _ => None,
    }
}

fn integers(value: Value) -> Option<Vec<i64>> {
    match value {
        Value::ByteArray(values) => Some(values.into_iter().map(i64::from).collect()),
        Value::IntArray(values) => Some(values.into_iter().map(i64::from).collect()),
        Value::LongArray(values) => Some(values),
        Value::List(list) => list.iter().map(integer).collect(),
        single => integer(&single).map(|v| vec![v]),
    }
}

fn typed_list(element: TagID, items: Vec<Value>) -> Result<Value> {
    let tag_type = TagType::of(element).ok_or(Error::TagMismatch {
        expected: element,
        found: TagID::End,
    })?;
    let items = items
        .into_iter()
        .map(|item| tag_type.construct(item))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::List(List::from_unchecked(element, items)))
}
