use std::marker::PhantomData;

use zerocopy::byteorder;

use crate::{ByteOrder, Compound, Error, List, Result, TagID, Value, cold_path, snbt::MAX_DEPTH};

pub(crate) struct Reader<'s, O: ByteOrder> {
    bytes: &'s [u8],
    pos: usize,
    _marker: PhantomData<O>,
}

macro_rules! read_number {
    ($name:ident, $type:ident, $ret:ty, $len:literal) => {
        #[inline]
        fn $name(&mut self) -> Result<$ret> {
            Ok(byteorder::$type::<O>::from_bytes(self.array::<$len>()?).get())
        }
    };
}

impl<'s, O: ByteOrder> Reader<'s, O> {
    pub(crate) fn new(bytes: &'s [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            _marker: PhantomData,
        }
    }

    #[cold]
    fn error_at(&self, pos: usize, reason: &'static str) -> Error {
        Error::malformed_bytes(self.bytes, pos, reason)
    }

    fn take(&mut self, len: usize) -> Result<&'s [u8]> {
        if self.bytes.len() - self.pos < len {
            cold_path();
            return Err(self.error_at(self.pos, "unexpected end of input"));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    read_number!(read_u16, U16, u16, 2);
    read_number!(read_i16, I16, i16, 2);
    read_number!(read_i32, I32, i32, 4);
    read_number!(read_i64, I64, i64, 8);
    read_number!(read_f32, F32, f32, 4);
    read_number!(read_f64, F64, f64, 8);

    fn read_tag_id(&mut self) -> Result<TagID> {
        let pos = self.pos;
        let [raw] = self.array::<1>()?;
        TagID::try_from(raw).map_err(|_| self.error_at(pos, "invalid NBT tag type"))
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let raw = self.take(len)?;
        Ok(simd_cesu8::mutf8::decode_lossy(raw).into_owned())
    }

    /// Array or list length; negative lengths and lengths that cannot fit in
    /// the remaining input are rejected before anything is allocated.
    fn read_len(&mut self, element_size: usize) -> Result<usize> {
        let pos = self.pos;
        let len = self.read_i32()?;
        let len = usize::try_from(len).map_err(|_| self.error_at(pos, "negative length"))?;
        if len.saturating_mul(element_size) > self.bytes.len() - self.pos {
            return Err(self.error_at(pos, "length exceeds input"));
        }
        Ok(len)
    }

    pub(crate) fn read_root(&mut self) -> Result<(String, Compound)> {
        let tag_id = self.read_tag_id()?;
        if tag_id != TagID::Compound {
            return Err(self.error_at(0, "root tag must be a compound"));
        }
        let name = self.read_string()?;
        let Value::Compound(compound) = self.read_tree(TagID::Compound)? else {
            return Err(self.error_at(0, "root tag must be a compound"));
        };
        if self.pos != self.bytes.len() {
            return Err(self.error_at(self.pos, "trailing data after end of input"));
        }
        Ok((name, compound))
    }

    /// Opens a container payload at nesting level `depth` (the root is 1).
    fn open(&mut self, tag_id: TagID, depth: usize) -> Result<Frame> {
        if depth > MAX_DEPTH {
            return Err(self.error_at(self.pos, "nesting too deep"));
        }
        if tag_id == TagID::Compound {
            return Ok(Frame::Compound {
                entries: Compound::new(),
                key: String::new(),
            });
        }
        let pos = self.pos;
        let element = self.read_tag_id()?;
        // Every element payload takes at least one byte.
        let len = self.read_len(1)?;
        if element == TagID::End && len > 0 {
            return Err(self.error_at(pos, "list of end tags"));
        }
        Ok(Frame::List {
            element,
            remaining: len,
            items: Vec::with_capacity(len),
        })
    }

    /// Reads a compound or list with an explicit frame stack, so nesting
    /// never grows the call stack.
    fn read_tree(&mut self, tag_id: TagID) -> Result<Value> {
        let mut parents: Vec<Frame> = Vec::new();
        let mut current = self.open(tag_id, 1)?;
        loop {
            let child = match &mut current {
                Frame::Compound { entries, key } => {
                    let tag_id = self.read_tag_id()?;
                    if tag_id == TagID::End {
                        None
                    } else {
                        let name = self.read_string()?;
                        if is_container(tag_id) {
                            *key = name;
                            Some(tag_id)
                        } else {
                            entries.insert(name, self.read_scalar(tag_id)?);
                            continue;
                        }
                    }
                }
                Frame::List {
                    element,
                    remaining,
                    items,
                } => {
                    if *remaining == 0 {
                        None
                    } else {
                        *remaining -= 1;
                        if is_container(*element) {
                            Some(*element)
                        } else {
                            items.push(self.read_scalar(*element)?);
                            continue;
                        }
                    }
                }
            };
            match child {
                Some(tag_id) => {
                    let frame = self.open(tag_id, parents.len() + 2)?;
                    parents.push(std::mem::replace(&mut current, frame));
                }
                None => {
                    let value = current.into_value();
                    let Some(mut parent) = parents.pop() else {
                        return Ok(value);
                    };
                    parent.adopt(value);
                    current = parent;
                }
            }
        }
    }

    /// Any payload that is not a compound or list.
    fn read_scalar(&mut self, tag_id: TagID) -> Result<Value> {
        Ok(match tag_id {
            TagID::Byte => Value::Byte(self.array::<1>()?[0] as i8),
            TagID::Short => Value::Short(self.read_i16()?),
            TagID::Int => Value::Int(self.read_i32()?),
            TagID::Long => Value::Long(self.read_i64()?),
            TagID::Float => Value::Float(self.read_f32()?),
            TagID::Double => Value::Double(self.read_f64()?),
            TagID::ByteArray => {
                let len = self.read_len(1)?;
                Value::ByteArray(self.take(len)?.iter().map(|&b| b as i8).collect())
            }
            TagID::String => Value::String(self.read_string()?),
            TagID::IntArray => {
                let len = self.read_len(4)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.read_i32()?);
                }
                Value::IntArray(values)
            }
            TagID::LongArray => {
                let len = self.read_len(8)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.read_i64()?);
                }
                Value::LongArray(values)
            }
            TagID::End | TagID::List | TagID::Compound => {
                return Err(self.error_at(self.pos, "unexpected end tag"));
            }
        })
    }
}

#[inline]
fn is_container(tag_id: TagID) -> bool {
    matches!(tag_id, TagID::Compound | TagID::List)
}

/// A container whose payload is still being read.
enum Frame {
    /// `key` names the child currently being read.
    Compound { entries: Compound, key: String },
    List {
        element: TagID,
        remaining: usize,
        items: Vec<Value>,
    },
}

impl Frame {
    fn into_value(self) -> Value {
        match self {
            Frame::Compound { entries, .. } => Value::Compound(entries),
            Frame::List { element, items, .. } => Value::List(List::from_unchecked(element, items)),
        }
    }

    fn adopt(&mut self, value: Value) {
        match self {
            Frame::Compound { entries, key } => {
                entries.insert(std::mem::take(key), value);
            }
            Frame::List { items, .. } => items.push(value),
        }
    }
}
