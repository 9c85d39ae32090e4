use zerocopy::byteorder;

use crate::{ByteOrder, Compound, Error, List, Result, TagID, Value, cold_path, snbt::MAX_DEPTH};

fn write_string<O: ByteOrder>(out: &mut Vec<u8>, text: &str) -> Result<()> {
    let encoded = simd_cesu8::mutf8::encode(text);
    let Ok(len) = u16::try_from(encoded.len()) else {
        cold_path();
        return Err(Error::LimitExceeded {
            limit: "string length",
            len: encoded.len(),
            max: u16::MAX as usize,
        });
    };
    out.extend_from_slice(&byteorder::U16::<O>::new(len).to_bytes());
    out.extend_from_slice(&encoded);
    Ok(())
}

fn write_len<O: ByteOrder>(out: &mut Vec<u8>, len: usize) -> Result<()> {
    let Ok(len) = i32::try_from(len) else {
        cold_path();
        return Err(Error::LimitExceeded {
            limit: "sequence length",
            len,
            max: i32::MAX as usize,
        });
    };
    out.extend_from_slice(&byteorder::I32::<O>::new(len).to_bytes());
    Ok(())
}

pub(crate) fn write_root<O: ByteOrder>(
    out: &mut Vec<u8>,
    name: &str,
    compound: &Compound,
) -> Result<()> {
    out.push(TagID::Compound as u8);
    write_string::<O>(out, name)?;
    write_compound::<O>(out, compound, 1)
}

#[inline]
fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        cold_path();
        return Err(Error::LimitExceeded {
            limit: "nesting depth",
            len: depth,
            max: MAX_DEPTH,
        });
    }
    Ok(())
}

fn write_compound<O: ByteOrder>(
    out: &mut Vec<u8>,
    compound: &Compound,
    depth: usize,
) -> Result<()> {
    check_depth(depth)?;
    for (name, value) in compound.iter() {
        out.push(value.tag_id() as u8);
        write_string::<O>(out, name)?;
        write_payload::<O>(out, value, depth)?;
    }
    out.push(TagID::End as u8);
    Ok(())
}

fn write_list<O: ByteOrder>(out: &mut Vec<u8>, list: &List, depth: usize) -> Result<()> {
    check_depth(depth)?;
    out.push(list.element_tag_id() as u8);
    write_len::<O>(out, list.len())?;
    for item in list {
        write_payload::<O>(out, item, depth)?;
    }
    Ok(())
}

/// `depth` is the level of the container holding `value`.
fn write_payload<O: ByteOrder>(out: &mut Vec<u8>, value: &Value, depth: usize) -> Result<()> {
    match value {
        Value::List(list) => write_list::<O>(out, list, depth + 1),
        Value::Compound(compound) => write_compound::<O>(out, compound, depth + 1),
        leaf => write_leaf::<O>(out, leaf),
    }
}

#[inline(never)]
fn write_leaf<O: ByteOrder>(out: &mut Vec<u8>, value: &Value) -> Result<()> {
    match value {
        Value::Byte(v) => out.push(*v as u8),
        Value::Short(v) => out.extend_from_slice(&byteorder::I16::<O>::new(*v).to_bytes()),
        Value::Int(v) => out.extend_from_slice(&byteorder::I32::<O>::new(*v).to_bytes()),
        Value::Long(v) => out.extend_from_slice(&byteorder::I64::<O>::new(*v).to_bytes()),
        Value::Float(v) => out.extend_from_slice(&byteorder::F32::<O>::new(*v).to_bytes()),
        Value::Double(v) => out.extend_from_slice(&byteorder::F64::<O>::new(*v).to_bytes()),
        Value::ByteArray(values) => {
            write_len::<O>(out, values.len())?;
            out.extend(values.iter().map(|&b| b as u8));
        }
        Value::String(text) => write_string::<O>(out, text)?,
        Value::IntArray(values) => {
            write_len::<O>(out, values.len())?;
            out.reserve(values.len() * 4);
            for v in values {
                out.extend_from_slice(&byteorder::I32::<O>::new(*v).to_bytes());
            }
        }
        Value::LongArray(values) => {
            write_len::<O>(out, values.len())?;
            out.reserve(values.len() * 8);
            for v in values {
                out.extend_from_slice(&byteorder::I64::<O>::new(*v).to_bytes());
            }
        }
        Value::List(_) | Value::Compound(_) => {}
    }
    Ok(())
}
