//! Dotted tag paths such as `tag.Enchantments[0].lvl`.
//!
//! Parsing is total: text that does not form a quoted key or a list index is
//! taken as a literal key, so every string names some path. A path always has
//! at least one segment; the empty string is the single key `""`.

use std::fmt;

use crate::{Compound, Index, Value};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Index for Segment {
    #[inline]
    fn index_dispatch<'a, V, R>(
        &self,
        value: &'a V,
        n: impl FnOnce(&'a V, usize) -> R,
        s: impl FnOnce(&'a V, &str) -> R,
    ) -> R {
        match self {
            Segment::Key(key) => s(value, key),
            Segment::Index(index) => n(value, *index),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagPath {
    segments: Vec<Segment>,
}

impl TagPath {
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut chars = text.chars().peekable();

        loop {
            let mut key = String::new();
            let mut quoted = false;

            if chars.peek() == Some(&'"') {
                chars.next();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '\\' if matches!(chars.peek(), Some('"' | '\\')) => {
                            key.extend(chars.next());
                        }
                        '"' => {
                            closed = true;
                            break;
                        }
                        c => key.push(c),
                    }
                }
                if closed {
                    quoted = true;
                } else {
                    key.insert(0, '"');
                }
            }

            let mut rest = String::new();
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                rest.push(c);
                chars.next();
            }

            let (tail, indexes) = split_indexes(&rest);
            key.push_str(tail);
            if quoted || !key.is_empty() || indexes.is_empty() {
                segments.push(Segment::Key(key));
            }
            segments.extend(indexes.into_iter().map(Segment::Index));

            if chars.next().is_none() {
                break;
            }
        }

        Self { segments }
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Renders the first `len` segments, for error messages.
    pub(crate) fn prefix(&self, len: usize) -> String {
        render(&self.segments[..len.min(self.segments.len())])
    }

    /// Follows the path from `root`.
    pub fn lookup<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |value, segment| value.get(segment))
    }

    /// Follows the path from a root compound.
    pub fn lookup_in<'a>(&self, root: &'a Compound) -> Option<&'a Value> {
        let (first, rest) = self.segments.split_first()?;
        let Segment::Key(key) = first else {
            return None;
        };
        rest.iter()
            .try_fold(root.get(key)?, |value, segment| value.get(segment))
    }
}

/// Peels trailing `[n]` groups off a raw segment.
fn split_indexes(raw: &str) -> (&str, Vec<usize>) {
    let mut rest = raw;
    let mut indexes = Vec::new();
    while let Some(inner) = rest.strip_suffix(']') {
        let Some(open) = inner.rfind('[') else {
            break;
        };
        let digits = &inner[open + 1..];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            break;
        }
        let Ok(index) = digits.parse() else {
            break;
        };
        indexes.push(index);
        rest = &inner[..open];
    }
    indexes.reverse();
    (rest, indexes)
}

fn needs_quotes(key: &str) -> bool {
    key.is_empty()
        || key.starts_with('"')
        || key.contains(['.', '['])
}

fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Key(key) => {
                if i > 0 {
                    out.push('.');
                }
                if needs_quotes(key) {
                    out.push('"');
                    for c in key.chars() {
                        if matches!(c, '"' | '\\') {
                            out.push('\\');
                        }
                        out.push(c);
                    }
                    out.push('"');
                } else {
                    out.push_str(key);
                }
            }
            Segment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

impl fmt::Display for TagPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&render(&self.segments))
    }
}

impl From<&str> for TagPath {
    #[inline]
    fn from(text: &str) -> Self {
        TagPath::parse(text)
    }
}

impl From<String> for TagPath {
    #[inline]
    fn from(text: String) -> Self {
        TagPath::parse(&text)
    }
}

impl From<&String> for TagPath {
    #[inline]
    fn from(text: &String) -> Self {
        TagPath::parse(text)
    }
}

impl From<&TagPath> for TagPath {
    #[inline]
    fn from(path: &TagPath) -> Self {
        path.clone()
    }
}

impl FromIterator<Segment> for TagPath {
    /// An empty iterator yields the single key `""`.
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        let mut segments: Vec<Segment> = iter.into_iter().collect();
        if segments.is_empty() {
            segments.push(Segment::Key(String::new()));
        }
        Self { segments }
    }
}
