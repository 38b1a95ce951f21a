//! Linear undo/redo history over immutable document snapshots.
//!
//! DESIGN
//! ======
//! The history is a bounded sequence of whole documents plus a cursor.
//! It is either Empty (no document loaded, no cursor) or Active (cursor
//! points at the entry currently shown). Committing after an undo drops the
//! redo branch: this is classic linear undo, not a tree. When the bound is
//! exceeded the oldest entry is evicted and the cursor stays on the newest.
//!
//! Entries are owned values. A document handed out by `undo`/`redo` is a
//! snapshot exactly as it was committed or loaded.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::consts::DEFAULT_HISTORY_LIMIT;
use crate::document::Document;

/// Bounded snapshot history with a cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Document>,
    cursor: Option<usize>,
    capacity: usize,
}

impl History {
    /// Empty history retaining at most `capacity` entries (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), cursor: None, capacity }
    }

    /// Replace the whole history with a single entry.
    pub fn load(&mut self, doc: Document) {
        self.entries.clear();
        self.entries.push_back(doc);
        self.cursor = Some(0);
    }

    /// Record `doc` as the newest entry, discarding anything after the cursor.
    ///
    /// On an empty history this behaves like [`History::load`].
    pub fn commit(&mut self, doc: Document) {
        let Some(cursor) = self.cursor else {
            self.load(doc);
            return;
        };
        let dropped = self.entries.len() - (cursor + 1);
        if dropped > 0 {
            tracing::debug!(dropped, "discarding redo branch");
        }
        self.entries.truncate(cursor + 1);
        self.entries.push_back(doc);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            tracing::debug!(capacity = self.capacity, "evicted oldest history entry");
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back one entry. Returns the entry now current, or `None` when
    /// already at the oldest entry (state unchanged).
    pub fn undo(&mut self) -> Option<&Document> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        self.entries.get(cursor - 1)
    }

    /// Step forward one entry. Returns the entry now current, or `None` when
    /// already at the newest entry (state unchanged).
    pub fn redo(&mut self) -> Option<&Document> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        self.entries.get(cursor + 1)
    }

    /// The entry under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Document> {
        self.entries.get(self.cursor?)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Back to the Empty state.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Cursor index; `None` while Empty.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &Document> {
        self.entries.iter()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
