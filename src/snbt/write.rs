use std::fmt::Write as _;

use crate::{Compound, List, Value};

fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b'+'))
}

fn write_quoted(out: &mut String, text: &str) {
    out.reserve(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

fn write_key(out: &mut String, key: &str) {
    if is_bare_key(key) {
        out.push_str(key);
    } else {
        write_quoted(out, key);
    }
}

fn newline(out: &mut String, indent: &str, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(indent);
    }
}

// `{:?}` is the shortest text that parses back to the same bits.
macro_rules! write_float {
    ($out:expr, $value:expr, $suffix:literal) => {{
        let value = $value;
        if value.is_nan() {
            $out.push_str("NaN");
        } else if value.is_infinite() {
            $out.push_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
        } else {
            let _ = write!($out, "{value:?}");
        }
        $out.push($suffix);
    }};
}

pub(crate) fn write_value(out: &mut String, value: &Value, indent: Option<&str>, depth: usize) {
    match value {
        Value::List(list) => write_list(out, list, indent, depth),
        Value::Compound(compound) => write_compound(out, compound, indent, depth),
        leaf => write_leaf(out, leaf, indent),
    }
}

#[inline(never)]
fn write_leaf(out: &mut String, value: &Value, indent: Option<&str>) {
    match value {
        Value::Byte(v) => {
            let _ = write!(out, "{v}b");
        }
        Value::Short(v) => {
            let _ = write!(out, "{v}s");
        }
        Value::Int(v) => {
            let _ = write!(out, "{v}");
        }
        Value::Long(v) => {
            let _ = write!(out, "{v}L");
        }
        Value::Float(v) => write_float!(out, *v, 'f'),
        Value::Double(v) => write_float!(out, *v, 'd'),
        Value::String(v) => write_quoted(out, v),
        Value::ByteArray(values) => write_array(out, "B", values, "b", indent),
        Value::IntArray(values) => write_array(out, "I", values, "", indent),
        Value::LongArray(values) => write_array(out, "L", values, "L", indent),
        Value::List(_) | Value::Compound(_) => {}
    }
}

fn write_array<T: std::fmt::Display>(
    out: &mut String,
    prefix: &str,
    values: &[T],
    suffix: &str,
    indent: Option<&str>,
) {
    out.push('[');
    out.push_str(prefix);
    out.push(';');
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if indent.is_some() {
            out.push(' ');
        }
        let _ = write!(out, "{v}{suffix}");
    }
    out.push(']');
}

fn write_list(out: &mut String, list: &List, indent: Option<&str>, depth: usize) {
    out.push('[');
    match indent {
        Some(indent) if !list.is_empty() && list.element_tag_id().is_composite() => {
            for (i, item) in list.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(out, indent, depth + 1);
                write_value(out, item, Some(indent), depth + 1);
            }
            newline(out, indent, depth);
        }
        _ => {
            for (i, item) in list.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                    if indent.is_some() {
                        out.push(' ');
                    }
                }
                write_value(out, item, indent, depth + 1);
            }
        }
    }
    out.push(']');
}

pub(crate) fn write_compound(
    out: &mut String,
    compound: &Compound,
    indent: Option<&str>,
    depth: usize,
) {
    out.push('{');
    for (i, (key, value)) in compound.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if let Some(indent) = indent {
            newline(out, indent, depth + 1);
        }
        write_key(out, key);
        out.push(':');
        if indent.is_some() {
            out.push(' ');
        }
        write_value(out, value, indent, depth + 1);
    }
    if let Some(indent) = indent.filter(|_| !compound.is_empty()) {
        newline(out, indent, depth);
    }
    out.push('}');
}
