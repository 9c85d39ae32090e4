use std::fmt;

use crate::{Index, TagID};

mod compound;
mod list;

pub use compound::*;
pub use list::*;

/// An owned NBT tag: one leaf value or container.
///
/// Numeric variants keep their declared width; nothing here widens or
/// narrows on its own. Conversions between widths go through
/// [`TagType::construct`](crate::TagType::construct).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Value {
    #[inline]
    pub fn tag_id(&self) -> TagID {
        match self {
            Value::Byte(_) => TagID::Byte,
            Value::Short(_) => TagID::Short,
            Value::Int(_) => TagID::Int,
            Value::Long(_) => TagID::Long,
            Value::Float(_) => TagID::Float,
            Value::Double(_) => TagID::Double,
            Value::ByteArray(_) => TagID::ByteArray,
            Value::String(_) => TagID::String,
            Value::List(_) => TagID::List,
            Value::Compound(_) => TagID::Compound,
            Value::IntArray(_) => TagID::IntArray,
            Value::LongArray(_) => TagID::LongArray,
        }
    }

    /// Levels of compound and list nesting in this tag; 0 for leaves.
    pub fn depth(&self) -> usize {
        match self {
            Value::Compound(compound) => {
                1 + compound.iter().map(|(_, value)| value.depth()).max().unwrap_or(0)
            }
            Value::List(list) => 1 + list.iter().map(Value::depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    /// Looks up one child: a list element by `usize` or a compound entry by key.
    ///
    /// # Example
    ///
    /// ```
    /// use nbt_compound::{Compound, Value};
    ///
    /// let mut compound = Compound::new();
    /// compound.insert("lvl", 3i16);
    /// let value = Value::Compound(compound);
    /// assert_eq!(value.get("lvl").and_then(Value::as_short), Some(3));
    /// assert!(value.get(0_usize).is_none());
    /// ```
    #[inline]
    pub fn get(&self, index: impl Index) -> Option<&Value> {
        index.index_dispatch(
            self,
            |value, index| match value {
                Value::List(list) => list.get(index),
                _ => None,
            },
            |value, key| match value {
                Value::Compound(compound) => compound.get(key),
                _ => None,
            },
        )
    }

    /// Numeric view of any primitive, for callers that do not care about width.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Byte(value) => Some(*value as f64),
            Value::Short(value) => Some(*value as f64),
            Value::Int(value) => Some(*value as f64),
            Value::Long(value) => Some(*value as f64),
            Value::Float(value) => Some(*value as f64),
            Value::Double(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Value::Compound(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Value::List(value) => Some(value),
            _ => None,
        }
    }
}

macro_rules! accessors {
    ($($variant:ident => $as:ident, $is:ident, $ret:ty, |$v:ident| $map:expr;)*) => {
        impl Value {
            $(
                #[inline]
                pub fn $as(&self) -> Option<$ret> {
                    match self {
                        Value::$variant($v) => Some($map),
                        _ => None,
                    }
                }

                #[inline]
                pub fn $is(&self) -> bool {
                    matches!(self, Value::$variant(_))
                }
            )*
        }
    };
}

accessors! {
    Byte => as_byte, is_byte, i8, |v| *v;
    Short => as_short, is_short, i16, |v| *v;
    Int => as_int, is_int, i32, |v| *v;
    Long => as_long, is_long, i64, |v| *v;
    Float => as_float, is_float, f32, |v| *v;
    Double => as_double, is_double, f64, |v| *v;
    ByteArray => as_byte_array, is_byte_array, &[i8], |v| v.as_slice();
    String => as_string, is_string, &String, |v| v;
    List => as_list, is_list, &List, |v| v;
    Compound => as_compound, is_compound, &Compound, |v| v;
    IntArray => as_int_array, is_int_array, &[i32], |v| v.as_slice();
    LongArray => as_long_array, is_long_array, &[i64], |v| v.as_slice();
}

macro_rules! from_impl {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

from_impl! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<i8> => ByteArray,
    String => String,
    List => List,
    Compound => Compound,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Byte(value as i8)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        crate::snbt::write_value(&mut out, self, None, 0);
        formatter.write_str(&out)
    }
}
