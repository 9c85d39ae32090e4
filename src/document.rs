use std::{fmt, str::FromStr};

use crate::{
    ByteOrder, Compound, Error, List, Result, Segment, TagPath, TagType, Value, binary, snbt,
    snbt::MAX_DEPTH,
};

/// An in-memory compound tree addressed by [`TagPath`]s.
///
/// `Clone` produces a fully independent tree; the copy shares nothing with
/// the original.
///
/// # Example
///
/// ```
/// use nbt_compound::{Document, Value};
///
/// let mut doc = Document::new();
/// doc.set("a.b.c", 5i16).unwrap();
/// assert_eq!(doc.get("a.b.c"), Some(&Value::Short(5)));
/// assert_eq!(doc.to_snbt(), "{a:{b:{c:5s}}}");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    root: Compound,
}

enum ContainerMut<'a> {
    Compound(&'a mut Compound),
    List(&'a mut List),
}

fn conflict(path: &TagPath, len: usize) -> Error {
    let segment = path.prefix(len);
    Error::PathConflict {
        path: path.to_string(),
        segment: if segment.is_empty() {
            "<root>".to_owned()
        } else {
            segment
        },
    }
}

fn set_in_compound(
    compound: &mut Compound,
    path: &TagPath,
    at: usize,
    value: Value,
) -> Result<Option<Value>> {
    let Segment::Key(key) = &path.segments()[at] else {
        return Err(conflict(path, at));
    };
    if at + 1 == path.segments().len() {
        return Ok(compound.insert(key.as_str(), value));
    }
    match compound.get_mut(key) {
        Some(Value::Compound(child)) => set_in_compound(child, path, at + 1, value),
        Some(Value::List(child)) => set_in_list(child, path, at + 1, value),
        Some(_) => Err(conflict(path, at + 1)),
        None => {
            let built = build_chain(path, at + 1, value)?;
            compound.insert(key.as_str(), built);
            Ok(None)
        }
    }
}

fn set_in_list(list: &mut List, path: &TagPath, at: usize, value: Value) -> Result<Option<Value>> {
    let Segment::Index(index) = path.segments()[at] else {
        return Err(conflict(path, at));
    };
    if at + 1 == path.segments().len() {
        return match index {
            i if i < list.len() => list.set(i, value),
            i if i == list.len() => list.push(value).map(|()| None),
            _ => Err(conflict(path, at + 1)),
        };
    }
    if let Some(child) = list.get_compound_mut(index) {
        return set_in_compound(child, path, at + 1, value);
    }
    if let Some(child) = list.get_list_mut(index) {
        return set_in_list(child, path, at + 1, value);
    }
    Err(conflict(path, at + 1))
}

/// Builds the compounds for the missing tail `path[at..]`, innermost first.
fn build_chain(path: &TagPath, at: usize, value: Value) -> Result<Value> {
    let tail = &path.segments()[at..];
    if let Some(offset) = tail.iter().position(|s| matches!(s, Segment::Index(_))) {
        return Err(conflict(path, at + offset));
    }
    Ok(tail.iter().rev().fold(value, |inner, segment| {
        let mut compound = Compound::new();
        if let Segment::Key(key) = segment {
            compound.insert(key.as_str(), inner);
        }
        Value::Compound(compound)
    }))
}

impl Document {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses canonical text. The root must be a compound.
    pub fn parse(text: &str) -> Result<Self> {
        snbt::parse_compound(text).map(Self::from)
    }

    #[inline]
    pub fn root(&self) -> &Compound {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut Compound {
        &mut self.root
    }

    #[inline]
    pub fn into_root(self) -> Compound {
        self.root
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Direct child keys of the root, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys()
    }

    /// The tag at `path`, or `None` when any segment is missing.
    pub fn get(&self, path: impl Into<TagPath>) -> Option<&Value> {
        path.into().lookup_in(&self.root)
    }

    /// The tag at `path` if it already is of `tag_type`.
    pub fn get_typed(&self, path: impl Into<TagPath>, tag_type: &TagType) -> Option<Value> {
        self.get(path).and_then(|value| tag_type.extract(value))
    }

    #[inline]
    pub fn contains(&self, path: impl Into<TagPath>) -> bool {
        self.get(path).is_some()
    }

    /// Sets the tag at `path`, creating missing intermediate compounds.
    ///
    /// Returns the replaced tag. Fails with [`Error::PathConflict`] when a
    /// segment runs through a tag that cannot hold it, and with
    /// [`Error::TagMismatch`] when a list element of another kind would
    /// be written. A tree nested deeper than the readers accept fails with
    /// [`Error::LimitExceeded`]. On failure the document is unchanged.
    pub fn set(
        &mut self,
        path: impl Into<TagPath>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let path = path.into();
        let value = value.into();
        // The root and every container the path runs through each add a level.
        let depth = path.segments().len() + value.depth();
        if depth > MAX_DEPTH {
            return Err(Error::LimitExceeded {
                limit: "nesting depth",
                len: depth,
                max: MAX_DEPTH,
            });
        }
        set_in_compound(&mut self.root, &path, 0, value)
    }

    /// Coerces `value` to `tag_type` and sets it.
    pub fn set_typed(
        &mut self,
        path: impl Into<TagPath>,
        tag_type: &TagType,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let value = tag_type.construct(value.into())?;
        self.set(path, value)
    }

    /// Removes and returns the tag at `path`.
    pub fn take(&mut self, path: impl Into<TagPath>) -> Option<Value> {
        let path = path.into();
        let (last, parents) = path.segments().split_last()?;

        let mut container = ContainerMut::Compound(&mut self.root);
        for segment in parents {
            let next = match (container, segment) {
                (ContainerMut::Compound(compound), Segment::Key(key)) => compound.get_mut(key)?,
                (ContainerMut::List(list), Segment::Index(index)) => {
                    let index = *index;
                    if list.get(index).is_some_and(Value::is_compound) {
                        container = ContainerMut::Compound(list.get_compound_mut(index)?);
                    } else {
                        container = ContainerMut::List(list.get_list_mut(index)?);
                    }
                    continue;
                }
                _ => return None,
            };
            container = match next {
                Value::Compound(compound) => ContainerMut::Compound(compound),
                Value::List(list) => ContainerMut::List(list),
                _ => return None,
            };
        }

        match (container, last) {
            (ContainerMut::Compound(compound), Segment::Key(key)) => compound.remove(key),
            (ContainerMut::List(list), Segment::Index(index)) => list.remove(*index),
            _ => None,
        }
    }

    /// Removes the tag at `path`; `false` when there was nothing to remove.
    #[inline]
    pub fn remove(&mut self, path: impl Into<TagPath>) -> bool {
        self.take(path).is_some()
    }

    /// Deep-merges `other` into this document.
    #[inline]
    pub fn merge(&mut self, other: &Document) {
        self.root.merge(&other.root);
    }

    /// Compact canonical text.
    pub fn to_snbt(&self) -> String {
        snbt::compound_to_string(&self.root, None)
    }

    /// Multi-line canonical text; parses back like [`to_snbt`](Self::to_snbt).
    pub fn to_pretty_snbt(&self, indent: &str) -> String {
        snbt::compound_to_string(&self.root, Some(indent))
    }

    pub fn from_binary<O: ByteOrder>(bytes: &[u8]) -> Result<Self> {
        binary::read_root::<O>(bytes).map(|(_, root)| Self::from(root))
    }

    pub fn to_binary<O: ByteOrder>(&self, name: &str) -> Result<Vec<u8>> {
        binary::write_root::<O>(name, &self.root)
    }
}

impl From<Compound> for Document {
    #[inline]
    fn from(root: Compound) -> Self {
        Self { root }
    }
}

impl From<Document> for Compound {
    #[inline]
    fn from(document: Document) -> Self {
        document.root
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Document::parse(text)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.to_snbt())
    }
}
