//! The editing session: current document, history, selection and view settings.
//!
//! DESIGN
//! ======
//! `Designer` is the single owner of the "current document + history +
//! selection" triple. The current document is always the history entry under
//! the cursor, except while a gesture is open: then edits land on a working
//! copy that is shown but not recorded, and `end_gesture` commits it as one
//! history entry. This is how a drag, which arrives as a stream of position
//! updates, becomes a single undo step.
//!
//! Policy for the failure cases:
//! - every operation that needs a document returns `NoActiveDocument` while
//!   nothing is loaded;
//! - a missing element id is a silent no-op (`Ok(false)` / `Ok(None)`) and is
//!   not recorded in the history;
//! - undo/redo past either end is a silent no-op returning `false`.

#[cfg(test)]
#[path = "designer_test.rs"]
mod designer_test;

use crate::canvas::CanvasSettings;
use crate::consts::DEFAULT_HISTORY_LIMIT;
use crate::document::{Document, DocumentError};
use crate::element::{Element, ElementDraft, ElementId, ElementPatch, Rect};
use crate::history::History;
use crate::mutation::{self, Edit};
use crate::selection::Selection;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DesignerError {
    #[error("no template is loaded")]
    NoActiveDocument,
}

/// One editing session.
#[derive(Debug, Clone)]
pub struct Designer {
    history: History,
    selection: Selection,
    /// Working copy while a gesture is open.
    gesture: Option<Document>,
    dirty: bool,
    /// View settings; not part of the document.
    pub canvas: CanvasSettings,
}

impl Default for Designer {
    fn default() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl Designer {
    /// Empty session with the default history bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty session retaining at most `limit` history entries.
    #[must_use]
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history: History::new(limit),
            selection: Selection::new(),
            gesture: None,
            dirty: false,
            canvas: CanvasSettings::default(),
        }
    }

    // --- Lifecycle ---

    /// Start a blank `width` × `height` template.
    pub fn new_template(&mut self, width: f64, height: f64) {
        self.load(Document::create_default(width, height));
    }

    /// Make `doc` the current document with a single-entry history.
    pub fn load(&mut self, doc: Document) {
        tracing::debug!(elements = doc.len(), "loading document");
        self.gesture = None;
        self.history.load(doc);
        self.selection.clear();
        self.dirty = false;
    }

    /// Load a persisted layout, falling back to an empty `width` × `height`
    /// document when it cannot be decoded. Returns the decode error in that
    /// case so the caller can warn the user.
    pub fn open_layout(&mut self, json: &str, width: f64, height: f64) -> Option<DocumentError> {
        let (doc, error) = Document::from_layout_or_default(json, width, height);
        if let Some(ref e) = error {
            tracing::warn!(error = %e, "layout unreadable; starting from a blank document");
        }
        self.load(doc);
        error
    }

    /// Drop the current document and history.
    pub fn close(&mut self) {
        self.gesture = None;
        self.history.reset();
        self.selection.clear();
        self.dirty = false;
    }

    // --- Queries ---

    /// The document to display.
    #[must_use]
    pub fn document(&self) -> Option<&Document> {
        self.gesture.as_ref().or_else(|| self.history.current())
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The selected element when exactly one is selected.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        match self.selection.as_slice() {
            [id] => self.document()?.get(id),
            _ => None,
        }
    }

    /// Whether the document changed since it was loaded or last saved.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.gesture.is_some() || self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.gesture.is_none() && self.history.can_redo()
    }

    #[must_use]
    pub fn in_gesture(&self) -> bool {
        self.gesture.is_some()
    }

    // --- Element operations ---

    /// Add an element and select it. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn add(&mut self, draft: ElementDraft) -> Result<ElementId, DesignerError> {
        let (edit, id) = mutation::add(self.current()?, draft);
        self.apply_edit(Some(edit));
        Ok(id)
    }

    /// Merge `patch` into element `id`. Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn update(&mut self, id: &str, patch: &ElementPatch) -> Result<bool, DesignerError> {
        let next = mutation::update(self.current()?, id, patch);
        Ok(self.apply_opt(next))
    }

    /// Delete element `id`. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn delete(&mut self, id: &str) -> Result<bool, DesignerError> {
        let edit = mutation::delete(self.current()?, &self.selection, id);
        Ok(self.apply_edit(edit))
    }

    /// Delete every selected element as one history entry. Returns whether
    /// anything was deleted; the selection is empty afterwards either way.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn delete_selected(&mut self) -> Result<bool, DesignerError> {
        let edit = mutation::delete_selected(self.current()?, &self.selection);
        let changed = self.apply_edit(edit);
        self.selection.clear();
        Ok(changed)
    }

    /// Duplicate element `id` and select the copy. Returns the copy's id.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn duplicate(&mut self, id: &str) -> Result<Option<ElementId>, DesignerError> {
        let Some((edit, copy)) = mutation::duplicate(self.current()?, id) else {
            return Ok(None);
        };
        self.apply_edit(Some(edit));
        Ok(Some(copy))
    }

    // --- Z-order ---

    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn bring_to_front(&mut self, id: &str) -> Result<bool, DesignerError> {
        let next = mutation::bring_to_front(self.current()?, id);
        Ok(self.apply_opt(next))
    }

    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn send_to_back(&mut self, id: &str) -> Result<bool, DesignerError> {
        let next = mutation::send_to_back(self.current()?, id);
        Ok(self.apply_opt(next))
    }

    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn bring_forward(&mut self, id: &str) -> Result<bool, DesignerError> {
        let next = mutation::bring_forward(self.current()?, id);
        Ok(self.apply_opt(next))
    }

    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn send_backward(&mut self, id: &str) -> Result<bool, DesignerError> {
        let next = mutation::send_backward(self.current()?, id);
        Ok(self.apply_opt(next))
    }

    // --- Selection ---

    /// Select `id`, replacing the selection or toggling it when `additive`.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn select(&mut self, id: &str, additive: bool) -> Result<(), DesignerError> {
        self.selection = mutation::select(self.current()?, &self.selection, id, additive);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn select_all(&mut self) -> Result<(), DesignerError> {
        self.selection = mutation::select_all(self.current()?);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = mutation::clear_selection();
    }

    /// Select the elements lying fully inside the rectangle spanned by two
    /// corners. Returns how many were selected.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn select_in_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Result<usize, DesignerError> {
        let area = Rect::from_corners(x0, y0, x1, y1);
        self.selection = mutation::select_in_rect(self.current()?, &area);
        Ok(self.selection.len())
    }

    // --- History ---

    /// Step back one history entry. Clears the selection either way.
    /// An open gesture is committed first.
    pub fn undo(&mut self) -> bool {
        self.end_gesture();
        self.selection.clear();
        let moved = self.history.undo().is_some();
        if moved {
            self.dirty = true;
            tracing::debug!(cursor = ?self.history.cursor(), "undo");
        }
        moved
    }

    /// Step forward one history entry. Clears the selection either way.
    /// An open gesture is committed first.
    pub fn redo(&mut self) -> bool {
        self.end_gesture();
        self.selection.clear();
        let moved = self.history.redo().is_some();
        if moved {
            self.dirty = true;
            tracing::debug!(cursor = ?self.history.cursor(), "redo");
        }
        moved
    }

    // --- Gestures ---

    /// Start coalescing edits into a single history entry.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn begin_gesture(&mut self) -> Result<(), DesignerError> {
        if self.gesture.is_none() {
            self.gesture = Some(self.current()?.clone());
        }
        Ok(())
    }

    /// Move element `id` to `(x, y)`, clamped to the canvas origin and snapped
    /// to the grid when snapping is on. Returns whether it moved.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveDocument` when nothing is loaded.
    pub fn drag_to(&mut self, id: &str, x: f64, y: f64) -> Result<bool, DesignerError> {
        let x = self.canvas.snap(x.max(0.0));
        let y = self.canvas.snap(y.max(0.0));
        self.update(id, &ElementPatch::position(x, y))
    }

    /// Close the open gesture, committing its result as one history entry if
    /// it differs from the document the gesture started from. Returns whether
    /// an entry was committed.
    pub fn end_gesture(&mut self) -> bool {
        let Some(working) = self.gesture.take() else {
            return false;
        };
        if self.history.current() == Some(&working) {
            return false;
        }
        self.commit(working);
        true
    }

    /// Close the open gesture and restore the document it started from.
    /// Returns whether a gesture was open.
    pub fn cancel_gesture(&mut self) -> bool {
        if self.gesture.take().is_none() {
            return false;
        }
        if let Some(doc) = self.history.current() {
            self.selection.retain_existing(doc);
        }
        true
    }

    // --- Internals ---

    fn current(&self) -> Result<&Document, DesignerError> {
        self.document().ok_or(DesignerError::NoActiveDocument)
    }

    fn commit(&mut self, document: Document) {
        self.history.commit(document);
        self.dirty = true;
        tracing::debug!(entries = self.history.len(), cursor = ?self.history.cursor(), "committed");
    }

    fn apply(&mut self, document: Document) {
        if let Some(working) = self.gesture.as_mut() {
            *working = document;
        } else {
            self.commit(document);
        }
    }

    fn apply_opt(&mut self, document: Option<Document>) -> bool {
        let Some(document) = document else {
            return false;
        };
        self.apply(document);
        true
    }

    fn apply_edit(&mut self, edit: Option<Edit>) -> bool {
        let Some(Edit { document, selection }) = edit else {
            return false;
        };
        self.apply(document);
        self.selection = selection;
        true
    }
}
