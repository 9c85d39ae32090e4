use std::slice;

use crate::{Compound, Error, Result, TagID, Value, expect_tag};

/// A homogeneous NBT list.
///
/// All elements share one tag kind. An empty list has no kind
/// ([`TagID::End`]) and adopts the kind of the first element inserted.
/// Element access never hands out `&mut Value`, so the kind can only change
/// through the checked methods here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct List {
    element: TagID,
    items: Vec<Value>,
}

impl List {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Element kind, or [`TagID::End`] while the list is empty.
    #[inline]
    pub fn element_tag_id(&self) -> TagID {
        self.element
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_compound_mut(&mut self, index: usize) -> Option<&mut Compound> {
        self.items.get_mut(index).and_then(Value::as_compound_mut)
    }

    #[inline]
    pub fn get_list_mut(&mut self, index: usize) -> Option<&mut List> {
        self.items.get_mut(index).and_then(Value::as_list_mut)
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    fn check(&self, value: &Value) -> Result<()> {
        if self.items.is_empty() {
            return Ok(());
        }
        expect_tag(self.element, value.tag_id())
    }

    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.check(&value)?;
        self.element = value.tag_id();
        self.items.push(value);
        Ok(())
    }

    /// Inserts at `index`, shifting later elements. `index == len` appends.
    ///
    /// Returns `Ok(false)` and leaves the list alone when `index > len`.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> Result<bool> {
        let value = value.into();
        self.check(&value)?;
        if index > self.items.len() {
            return Ok(false);
        }
        self.element = value.tag_id();
        self.items.insert(index, value);
        Ok(true)
    }

    /// Replaces the element at `index`, returning the old one.
    ///
    /// Returns `Ok(None)` and leaves the list alone when `index` is out of range.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Option<Value>> {
        let value = value.into();
        self.check(&value)?;
        Ok(self
            .items
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, value)))
    }

    pub fn remove(&mut self, index: usize) -> Option<Value> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.reset_if_empty();
        Some(removed)
    }

    pub fn pop(&mut self) -> Option<Value> {
        let popped = self.items.pop();
        self.reset_if_empty();
        popped
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.element = TagID::End;
    }

    fn reset_if_empty(&mut self) {
        if self.items.is_empty() {
            self.element = TagID::End;
        }
    }

    pub(crate) fn from_unchecked(element: TagID, items: Vec<Value>) -> Self {
        debug_assert!(items.iter().all(|item| item.tag_id() == element));
        let element = if items.is_empty() { TagID::End } else { element };
        Self { element, items }
    }
}

impl TryFrom<Vec<Value>> for List {
    type Error = Error;

    fn try_from(items: Vec<Value>) -> Result<Self> {
        let element = match items.first() {
            Some(first) => first.tag_id(),
            None => return Ok(List::new()),
        };
        for item in &items {
            expect_tag(element, item.tag_id())?;
        }
        Ok(Self { element, items })
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
