#![allow(clippy::float_cmp)]

use super::*;
use crate::element::{Element, ElementKind};

fn place(doc: &mut Document, id: &str, x: f64, y: f64, w: f64, h: f64, z: i64) {
    let mut draft = ElementDraft::for_kind(ElementKind::Rectangle);
    draft.x = x;
    draft.y = y;
    draft.width = w;
    draft.height = h;
    draft.z_index = z;
    doc.elements.push(draft.into_element(id.into()));
}

fn three() -> Document {
    let mut doc = Document::default();
    place(&mut doc, "a", 0.0, 0.0, 10.0, 10.0, 0);
    place(&mut doc, "b", 20.0, 20.0, 10.0, 10.0, 1);
    place(&mut doc, "c", 40.0, 40.0, 10.0, 10.0, 2);
    doc
}

fn z(doc: &Document, id: &str) -> i64 {
    doc.get(id).map_or(i64::MIN, |el| el.z_index)
}

// =============================================================
// add / update / delete
// =============================================================

#[test]
fn add_appends_and_selects() {
    let doc = three();
    let (edit, id) = add(&doc, ElementDraft::for_kind(ElementKind::Text));
    assert_eq!(edit.document.len(), 4);
    assert_eq!(edit.document.elements[3].id, id);
    assert_eq!(edit.selection, Selection::single(id.clone()));
    assert!(!doc.contains(&id));
}

#[test]
fn update_changes_only_target() {
    let doc = three();
    let next = update(&doc, "b", &ElementPatch::position(99.0, 98.0)).unwrap();
    let b = next.get("b").unwrap();
    assert_eq!((b.x, b.y), (99.0, 98.0));
    assert_eq!(next.get("a"), doc.get("a"));
    assert_eq!(next.get("c"), doc.get("c"));
    assert_eq!(next.ids(), doc.ids());
    assert_eq!(doc.get("b").unwrap().x, 20.0);
}

#[test]
fn update_missing_or_noop_returns_none() {
    let doc = three();
    assert!(update(&doc, "zzz", &ElementPatch::position(1.0, 1.0)).is_none());
    assert!(update(&doc, "a", &ElementPatch::position(0.0, 0.0)).is_none());
    assert!(update(&doc, "a", &ElementPatch::default()).is_none());
}

#[test]
fn delete_removes_from_document_and_selection() {
    let doc = three();
    let sel: Selection = ["a", "b"].into_iter().map(String::from).collect();
    let edit = delete(&doc, &sel, "a").unwrap();
    assert!(!edit.document.contains("a"));
    assert_eq!(edit.selection, Selection::single("b"));
    assert!(delete(&doc, &sel, "zzz").is_none());
}

#[test]
fn delete_selected_skips_stale_ids() {
    let doc = three();
    let sel: Selection = ["a", "gone", "c"].into_iter().map(String::from).collect();
    let edit = delete_selected(&doc, &sel).unwrap();
    assert_eq!(edit.document.ids(), vec!["b".to_owned()]);
    assert!(edit.selection.is_empty());
}

#[test]
fn delete_selected_with_nothing_to_delete() {
    let doc = three();
    assert!(delete_selected(&doc, &Selection::new()).is_none());
    assert!(delete_selected(&doc, &Selection::single("gone")).is_none());
}

#[test]
fn duplicate_offsets_copy() {
    let doc = three();
    let (edit, copy_id) = duplicate(&doc, "b").unwrap();
    let original = doc.get("b").unwrap();
    let copy: &Element = edit.document.get(&copy_id).unwrap();
    assert_ne!(copy_id, "b");
    assert_eq!((copy.x, copy.y), (original.x + 20.0, original.y + 20.0));
    assert_eq!((copy.width, copy.height), (original.width, original.height));
    assert_eq!(copy.z_index, original.z_index);
    assert_eq!(copy.props, original.props);
    assert_eq!(edit.document.elements.last().map(|el| el.id.clone()), Some(copy_id.clone()));
    assert_eq!(edit.selection, Selection::single(copy_id));
    assert!(duplicate(&doc, "zzz").is_none());
}

// =============================================================
// z-order
// =============================================================

#[test]
fn bring_to_front_and_send_to_back() {
    let doc = three();
    let front = bring_to_front(&doc, "a").unwrap();
    assert_eq!(z(&front, "a"), 3);
    assert_eq!(z(&front, "c"), 2);

    let back = send_to_back(&doc, "c").unwrap();
    assert_eq!(z(&back, "c"), -1);
    assert_eq!(z(&back, "a"), 0);
}

#[test]
fn front_on_topmost_still_increments() {
    let doc = three();
    let front = bring_to_front(&doc, "c").unwrap();
    assert_eq!(z(&front, "c"), 3);
}

#[test]
fn forward_and_backward_step_by_one() {
    let doc = three();
    assert_eq!(z(&bring_forward(&doc, "a").unwrap(), "a"), 1);
    assert_eq!(z(&send_backward(&doc, "a").unwrap(), "a"), -1);
}

#[test]
fn z_ops_on_missing_id() {
    let doc = three();
    assert!(bring_to_front(&doc, "zzz").is_none());
    assert!(send_to_back(&doc, "zzz").is_none());
    assert!(bring_forward(&doc, "zzz").is_none());
    assert!(send_backward(&doc, "zzz").is_none());
}

#[test]
fn z_ops_never_renumber_others() {
    let doc = three();
    let next = bring_to_front(&doc, "b").unwrap();
    for id in ["a", "c"] {
        assert_eq!(next.get(id), doc.get(id));
    }
}

// =============================================================
// selection
// =============================================================

#[test]
fn select_replaces_or_toggles() {
    let doc = three();
    let sel = select(&doc, &Selection::single("a"), "b", false);
    assert_eq!(sel, Selection::single("b"));

    let sel = select(&doc, &sel, "c", true);
    assert_eq!(sel.as_slice(), ["b".to_owned(), "c".to_owned()]);

    let sel = select(&doc, &sel, "b", true);
    assert_eq!(sel, Selection::single("c"));
}

#[test]
fn select_unknown_id_is_noop() {
    let doc = three();
    let sel = Selection::single("a");
    assert_eq!(select(&doc, &sel, "zzz", false), sel);
    assert_eq!(select(&doc, &sel, "zzz", true), sel);
}

#[test]
fn select_all_and_clear() {
    let doc = three();
    assert_eq!(select_all(&doc).len(), 3);
    assert!(clear_selection().is_empty());
}

#[test]
fn select_in_rect_requires_full_containment() {
    let doc = three();
    let sel = select_in_rect(&doc, &Rect::from_corners(35.0, 35.0, 0.0, 0.0));
    assert_eq!(sel.as_slice(), ["a".to_owned(), "b".to_owned()]);

    let sel = select_in_rect(&doc, &Rect::from_corners(5.0, 5.0, 100.0, 100.0));
    assert_eq!(sel.as_slice(), ["b".to_owned(), "c".to_owned()]);
}

#[test]
fn select_in_empty_rect_selects_nothing() {
    let doc = three();
    assert!(select_in_rect(&doc, &Rect::from_corners(200.0, 200.0, 250.0, 250.0)).is_empty());
}
