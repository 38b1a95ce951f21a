//! Selection: the element ids currently targeted by user actions.
//!
//! Kept apart from the document because it has its own lifecycle: it is
//! emptied (never restored) by undo, redo and load.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::document::Document;
use crate::element::ElementId;

/// Insertion-ordered set of element ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection holding exactly `id`.
    #[must_use]
    pub fn single(id: impl Into<ElementId>) -> Self {
        Self { ids: vec![id.into()] }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Add `id` if absent. Returns `true` if it was added.
    pub fn insert(&mut self, id: impl Into<ElementId>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove `id` if present. Returns `true` if it was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| s != id);
        self.ids.len() != before
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: &str) {
        if !self.remove(id) {
            self.ids.push(id.to_owned());
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that do not reference an element of `doc`.
    pub fn retain_existing(&mut self, doc: &Document) {
        self.ids.retain(|id| doc.contains(id));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ElementId> {
        self.ids.iter()
    }

    /// Ids in selection order.
    #[must_use]
    pub fn as_slice(&self) -> &[ElementId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<ElementId> for Selection {
    fn from_iter<T: IntoIterator<Item = ElementId>>(iter: T) -> Self {
        let mut sel = Selection::new();
        for id in iter {
            sel.insert(id);
        }
        sel
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a ElementId;
    type IntoIter = std::slice::Iter<'a, ElementId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
