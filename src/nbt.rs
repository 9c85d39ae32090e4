use crate::Error;

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum TagID {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TagID {
    /// Returns `true` if this is a primitive tag type.
    ///
    /// Primitive tags are: End, Byte, Short, Int, Long, Float, Double.
    ///
    /// # Example
    ///
    /// ```
    /// use nbt_compound::TagID;
    ///
    /// assert!(TagID::Int.is_primitive());
    /// assert!(!TagID::List.is_primitive());
    /// ```
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::End
                | Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }

    /// Returns `true` for the integral primitives Byte, Short, Int and Long.
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Byte | Self::Short | Self::Int | Self::Long)
    }

    /// Returns `true` if this is an array tag type.
    ///
    /// Array tags are: ByteArray, IntArray, LongArray.
    ///
    /// # Example
    ///
    /// ```
    /// use nbt_compound::TagID;
    ///
    /// assert!(TagID::ByteArray.is_array());
    /// assert!(!TagID::List.is_array());
    /// ```
    pub const fn is_array(self) -> bool {
        matches!(self, Self::ByteArray | Self::IntArray | Self::LongArray)
    }

    /// Returns `true` if this is a composite tag type.
    ///
    /// Composite tags are: List, Compound.
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }
}

impl Default for TagID {
    #[inline]
    fn default() -> Self {
        TagID::End
    }
}

impl TryFrom<u8> for TagID {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        Ok(match value {
            0 => TagID::End,
            1 => TagID::Byte,
            2 => TagID::Short,
            3 => TagID::Int,
            4 => TagID::Long,
            5 => TagID::Float,
            6 => TagID::Double,
            7 => TagID::ByteArray,
            8 => TagID::String,
            9 => TagID::List,
            10 => TagID::Compound,
            11 => TagID::IntArray,
            12 => TagID::LongArray,
            other => return Err(other),
        })
    }
}

pub(crate) fn expect_tag(expected: TagID, found: TagID) -> crate::Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::TagMismatch { expected, found })
    }
}
