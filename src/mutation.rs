//! Mutation engine: pure operations over documents and selections.
//!
//! DESIGN
//! ======
//! Every function takes the current values by reference and returns new ones;
//! nothing is changed in place. Operations that can find nothing to do (missing
//! id, already in place) return `None`, meaning "nothing to commit". Callers
//! that iterate a selection routinely hit ids deleted a moment ago, so a
//! missing id is never an error here.
//!
//! Z-order operations scan all elements for the current extreme. That is
//! linear per call, which is fine at label scale (tens to low hundreds of
//! elements), and they never renumber other elements.

#[cfg(test)]
#[path = "mutation_test.rs"]
mod mutation_test;

use crate::consts::DUPLICATE_OFFSET;
use crate::document::Document;
use crate::element::{ElementDraft, ElementId, ElementPatch, Rect, new_element_id};
use crate::selection::Selection;

/// Result of an operation that changes both the document and the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub document: Document,
    pub selection: Selection,
}

/// An id not present in `doc`.
fn fresh_id(doc: &Document) -> ElementId {
    loop {
        let id = new_element_id();
        if !doc.contains(&id) {
            return id;
        }
    }
}

// =============================================================================
// ELEMENTS
// =============================================================================

/// Append a new element built from `draft` under a fresh id and select only
/// it. Returns the edit and the new id.
#[must_use]
pub fn add(doc: &Document, draft: ElementDraft) -> (Edit, ElementId) {
    let id = fresh_id(doc);
    let mut document = doc.clone();
    document.elements.push(draft.into_element(id.clone()));
    (Edit { document, selection: Selection::single(id.clone()) }, id)
}

/// Merge `patch` into the element `id`. Order and every other element are
/// left untouched.
///
/// Returns `None` when `id` is absent or the patch changes nothing.
#[must_use]
pub fn update(doc: &Document, id: &str, patch: &ElementPatch) -> Option<Document> {
    let idx = doc.position(id)?;
    let next = doc.elements[idx].patched(patch);
    if next == doc.elements[idx] {
        return None;
    }
    let mut document = doc.clone();
    document.elements[idx] = next;
    Some(document)
}

/// Remove the element `id` and drop it from the selection.
///
/// Returns `None` when `id` is absent.
#[must_use]
pub fn delete(doc: &Document, selection: &Selection, id: &str) -> Option<Edit> {
    doc.position(id)?;
    let mut document = doc.clone();
    document.elements.retain(|el| el.id != id);
    let mut selection = selection.clone();
    selection.remove(id);
    Some(Edit { document, selection })
}

/// Remove every selected element in one pass and empty the selection.
///
/// Stale ids in the selection are skipped. Returns `None` when no selected id
/// references an element.
#[must_use]
pub fn delete_selected(doc: &Document, selection: &Selection) -> Option<Edit> {
    if !doc.elements.iter().any(|el| selection.contains(&el.id)) {
        return None;
    }
    let mut document = doc.clone();
    document.elements.retain(|el| !selection.contains(&el.id));
    Some(Edit { document, selection: Selection::new() })
}

/// Append a copy of `id` under a fresh id, offset by [`DUPLICATE_OFFSET`] on
/// both axes, and select only the copy. Returns the edit and the copy's id.
///
/// Returns `None` when `id` is absent.
#[must_use]
pub fn duplicate(doc: &Document, id: &str) -> Option<(Edit, ElementId)> {
    let source = doc.get(id)?;
    let mut draft = ElementDraft::from(source);
    draft.x += DUPLICATE_OFFSET;
    draft.y += DUPLICATE_OFFSET;
    Some(add(doc, draft))
}

// =============================================================================
// Z-ORDER
// =============================================================================

fn set_z_index(doc: &Document, id: &str, z: i64) -> Option<Document> {
    update(doc, id, &ElementPatch::z_index(z))
}

/// Place `id` above every element: `max(z_index) + 1`.
#[must_use]
pub fn bring_to_front(doc: &Document, id: &str) -> Option<Document> {
    doc.position(id)?;
    let max = doc.max_z_index()?;
    set_z_index(doc, id, max.saturating_add(1))
}

/// Place `id` below every element: `min(z_index) - 1`.
#[must_use]
pub fn send_to_back(doc: &Document, id: &str) -> Option<Document> {
    doc.position(id)?;
    let min = doc.min_z_index()?;
    set_z_index(doc, id, min.saturating_sub(1))
}

/// Raise `id` by one relative to its own `z_index`.
#[must_use]
pub fn bring_forward(doc: &Document, id: &str) -> Option<Document> {
    let z = doc.get(id)?.z_index;
    set_z_index(doc, id, z.saturating_add(1))
}

/// Lower `id` by one relative to its own `z_index`.
#[must_use]
pub fn send_backward(doc: &Document, id: &str) -> Option<Document> {
    let z = doc.get(id)?.z_index;
    set_z_index(doc, id, z.saturating_sub(1))
}

// =============================================================================
// SELECTION
// =============================================================================

/// Select `id`. Non-additive replaces the selection with `{id}`; additive
/// toggles membership. Ids absent from `doc` leave the selection unchanged.
#[must_use]
pub fn select(doc: &Document, selection: &Selection, id: &str, additive: bool) -> Selection {
    if !doc.contains(id) {
        return selection.clone();
    }
    if additive {
        let mut next = selection.clone();
        next.toggle(id);
        next
    } else {
        Selection::single(id)
    }
}

/// Select every element, in insertion order.
#[must_use]
pub fn select_all(doc: &Document) -> Selection {
    doc.ids().into_iter().collect()
}

#[must_use]
pub fn clear_selection() -> Selection {
    Selection::new()
}

/// Select exactly the elements whose full bounding box lies inside `area`.
#[must_use]
pub fn select_in_rect(doc: &Document, area: &Rect) -> Selection {
    doc.elements
        .iter()
        .filter(|el| area.contains_rect(&el.bounds()))
        .map(|el| el.id.clone())
        .collect()
}
