#![allow(clippy::float_cmp)]

use super::*;
use crate::element::{ElementKind, ElementProps, TextProps};

fn text_draft(x: f64, y: f64) -> ElementDraft {
    let props = ElementProps::Text(TextProps { content: Some("Hi".into()), ..TextProps::default() });
    ElementDraft::new(x, y, 100.0, 20.0, props)
}

fn loaded() -> Designer {
    let mut d = Designer::new();
    d.load(Document::default());
    d
}

fn doc(d: &Designer) -> &Document {
    d.document().unwrap()
}

fn x_of(d: &Designer, id: &str) -> f64 {
    doc(d).get(id).unwrap().x
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn operations_without_document_fail() {
    let mut d = Designer::new();
    assert!(d.document().is_none());
    assert_eq!(d.add(text_draft(0.0, 0.0)), Err(DesignerError::NoActiveDocument));
    assert_eq!(d.update("a", &ElementPatch::position(1.0, 1.0)), Err(DesignerError::NoActiveDocument));
    assert_eq!(d.delete("a"), Err(DesignerError::NoActiveDocument));
    assert_eq!(d.bring_to_front("a"), Err(DesignerError::NoActiveDocument));
    assert_eq!(d.select_all(), Err(DesignerError::NoActiveDocument));
    assert_eq!(d.begin_gesture(), Err(DesignerError::NoActiveDocument));
    assert!(!d.undo());
    assert!(!d.redo());
}

#[test]
fn load_resets_history_and_selection() {
    let mut d = loaded();
    let id = d.add(text_draft(0.0, 0.0)).unwrap();
    assert!(d.selection().contains(&id));
    assert!(d.is_dirty());

    d.new_template(600.0, 400.0);
    assert_eq!(d.history().len(), 1);
    assert!(d.selection().is_empty());
    assert!(!d.is_dirty());
    assert_eq!(doc(&d).width, 600.0);
}

#[test]
fn open_layout_falls_back_on_bad_json() {
    let mut d = Designer::new();
    let warning = d.open_layout("{broken", 350.0, 200.0);
    assert!(warning.is_some());
    assert_eq!(doc(&d), &Document::create_default(350.0, 200.0));
    assert_eq!(d.history().len(), 1);
}

#[test]
fn open_layout_loads_valid_json() {
    let mut source = loaded();
    source.add(text_draft(5.0, 5.0)).unwrap();
    let json = doc(&source).to_layout_json().unwrap();

    let mut d = Designer::new();
    assert!(d.open_layout(&json, 1.0, 1.0).is_none());
    assert_eq!(doc(&d), doc(&source));
}

#[test]
fn open_layout_keeps_elements_with_odd_properties() {
    let json = r##"{
        "width": 400, "height": 300, "backgroundColor": "#ffffff",
        "elements": [
            {"id": "t", "type": "text", "x": 10, "y": 10, "width": 100, "height": 20, "zIndex": 1,
             "properties": {"content": "Price", "fontSize": "14px"}},
            {"id": "r", "type": "rectangle", "x": -50, "y": 40, "width": 80, "height": 30, "zIndex": 2,
             "properties": {"fill": "#eeeeee"}}
        ]
    }"##;
    let mut d = Designer::new();
    assert!(d.open_layout(json, 1.0, 1.0).is_none());
    assert_eq!(doc(&d).len(), 2);
    assert_eq!(x_of(&d, "r"), 0.0);

    let saved: serde_json::Value = serde_json::from_str(&doc(&d).to_layout_json().unwrap()).unwrap();
    assert_eq!(saved["elements"][0]["properties"]["fontSize"], "14px");

    let copy = d.duplicate("r").unwrap().unwrap();
    assert_eq!(x_of(&d, &copy), 20.0);
}

#[test]
fn close_drops_everything() {
    let mut d = loaded();
    d.add(text_draft(0.0, 0.0)).unwrap();
    d.close();
    assert!(d.document().is_none());
    assert!(d.history().is_empty());
    assert!(d.selection().is_empty());
}

// =============================================================
// End-to-end
// =============================================================

#[test]
fn add_update_undo_scenario() {
    let mut d = loaded();

    let id = d.add(text_draft(10.0, 10.0)).unwrap();
    assert_eq!(doc(&d).len(), 1);
    assert_eq!(d.selection(), &Selection::single(id.clone()));
    assert_eq!(d.history().len(), 2);
    assert_eq!(d.history().cursor(), Some(1));

    let patch = ElementPatch { x: Some(50.0), ..ElementPatch::default() };
    assert!(d.update(&id, &patch).unwrap());
    assert_eq!(x_of(&d, &id), 50.0);
    assert_eq!(d.history().len(), 3);

    assert!(d.undo());
    assert_eq!(x_of(&d, &id), 10.0);
    assert_eq!(d.history().cursor(), Some(1));

    assert!(d.undo());
    assert!(doc(&d).is_empty());
    assert_eq!(d.history().cursor(), Some(0));

    assert!(!d.undo());
    assert_eq!(d.history().cursor(), Some(0));
}

#[test]
fn undo_restores_exact_previous_document() {
    let mut d = loaded();
    let id = d.add(text_draft(10.0, 10.0)).unwrap();
    let before = doc(&d).clone();
    d.bring_to_front(&id).unwrap();
    d.update(&id, &ElementPatch::size(1.0, 2.0)).unwrap();
    d.undo();
    d.undo();
    assert_eq!(doc(&d), &before);
}

#[test]
fn undo_then_redo_is_identity_but_clears_selection() {
    let mut d = loaded();
    let id = d.add(text_draft(10.0, 10.0)).unwrap();
    d.update(&id, &ElementPatch::position(30.0, 30.0)).unwrap();
    let after = doc(&d).clone();
    assert!(!d.selection().is_empty());

    assert!(d.undo());
    assert!(d.redo());
    assert_eq!(doc(&d), &after);
    assert!(d.selection().is_empty());
}

#[test]
fn new_commit_after_undo_discards_redo() {
    let mut d = loaded();
    let id = d.add(text_draft(10.0, 10.0)).unwrap();
    d.update(&id, &ElementPatch::position(20.0, 20.0)).unwrap();
    d.undo();
    d.update(&id, &ElementPatch::position(70.0, 70.0)).unwrap();
    assert!(!d.can_redo());
    assert!(!d.redo());
    assert_eq!(d.history().len(), 3);
    assert_eq!(x_of(&d, &id), 70.0);
}

#[test]
fn history_stays_bounded() {
    let mut d = Designer::with_history_limit(5);
    d.load(Document::default());
    let id = d.add(text_draft(0.0, 0.0)).unwrap();
    for i in 1..=20 {
        d.update(&id, &ElementPatch::position(f64::from(i), 0.0)).unwrap();
        assert!(d.history().len() <= 5);
    }
    assert_eq!(x_of(&d, &id), 20.0);
}

#[test]
fn ids_stay_unique_across_mixed_operations() {
    let mut d = loaded();
    let a = d.add(ElementDraft::for_kind(ElementKind::Text)).unwrap();
    let b = d.duplicate(&a).unwrap().unwrap();
    let c = d.duplicate(&b).unwrap().unwrap();
    d.delete(&b).unwrap();
    d.undo();
    d.add(ElementDraft::for_kind(ElementKind::Line)).unwrap();
    d.duplicate(&c).unwrap();

    let ids = doc(&d).ids();
    let unique: std::collections::HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

// =============================================================
// Missing ids
// =============================================================

#[test]
fn missing_id_is_silent_and_unrecorded() {
    let mut d = loaded();
    d.add(text_draft(0.0, 0.0)).unwrap();
    let len = d.history().len();

    assert!(!d.update("nope", &ElementPatch::position(1.0, 1.0)).unwrap());
    assert!(!d.delete("nope").unwrap());
    assert_eq!(d.duplicate("nope").unwrap(), None);
    assert!(!d.bring_to_front("nope").unwrap());
    assert!(!d.send_backward("nope").unwrap());
    assert_eq!(d.history().len(), len);
}

// =============================================================
// Element operations
// =============================================================

#[test]
fn duplicate_selects_copy() {
    let mut d = loaded();
    let id = d.add(text_draft(10.0, 10.0)).unwrap();
    let copy = d.duplicate(&id).unwrap().unwrap();
    assert_eq!(d.selection(), &Selection::single(copy.clone()));
    assert_eq!(x_of(&d, &copy), 30.0);
    assert_eq!(x_of(&d, &id), 10.0);
}

#[test]
fn delete_selected_is_one_history_entry() {
    let mut d = loaded();
    let a = d.add(text_draft(0.0, 0.0)).unwrap();
    let b = d.add(text_draft(10.0, 0.0)).unwrap();
    d.add(text_draft(20.0, 0.0)).unwrap();
    d.select(&a, false).unwrap();
    d.select(&b, true).unwrap();
    let len = d.history().len();

    assert!(d.delete_selected().unwrap());
    assert_eq!(d.history().len(), len + 1);
    assert_eq!(doc(&d).len(), 1);
    assert!(d.selection().is_empty());

    d.undo();
    assert_eq!(doc(&d).len(), 3);
}

#[test]
fn delete_selected_with_empty_selection() {
    let mut d = loaded();
    d.add(text_draft(0.0, 0.0)).unwrap();
    d.clear_selection();
    assert!(!d.delete_selected().unwrap());
    assert_eq!(doc(&d).len(), 1);
}

#[test]
fn bring_to_front_beats_every_sibling() {
    let mut d = loaded();
    let a = d.add(text_draft(0.0, 0.0)).unwrap();
    for _ in 0..3 {
        d.add(ElementDraft { z_index: 7, ..text_draft(0.0, 0.0) }).unwrap();
    }
    d.bring_to_front(&a).unwrap();
    let z = doc(&d).get(&a).unwrap().z_index;
    assert!(doc(&d).elements.iter().filter(|el| el.id != a).all(|el| el.z_index < z));
}

#[test]
fn selected_element_requires_single_selection() {
    let mut d = loaded();
    let a = d.add(text_draft(0.0, 0.0)).unwrap();
    assert_eq!(d.selected_element().map(|el| el.id.clone()), Some(a));
    d.select_all().unwrap();
    d.add(text_draft(0.0, 0.0)).unwrap();
    d.select_all().unwrap();
    assert!(d.selected_element().is_none());
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_in_rect_exact_bounds() {
    let mut d = loaded();
    let id = d.add(text_draft(10.0, 10.0)).unwrap();
    d.clear_selection();

    assert_eq!(d.select_in_rect(110.0, 30.0, 10.0, 10.0).unwrap(), 1);
    assert!(d.selection().contains(&id));

    assert_eq!(d.select_in_rect(11.0, 10.0, 110.0, 30.0).unwrap(), 0);
    assert_eq!(d.select_in_rect(10.0, 11.0, 110.0, 30.0).unwrap(), 0);
    assert_eq!(d.select_in_rect(10.0, 10.0, 109.0, 30.0).unwrap(), 0);
    assert_eq!(d.select_in_rect(10.0, 10.0, 110.0, 29.0).unwrap(), 0);
}

#[test]
fn selection_changes_are_not_recorded() {
    let mut d = loaded();
    let a = d.add(text_draft(0.0, 0.0)).unwrap();
    let len = d.history().len();
    d.select(&a, true).unwrap();
    d.select_all().unwrap();
    d.clear_selection();
    assert_eq!(d.history().len(), len);
}

// =============================================================
// Gestures
// =============================================================

#[test]
fn drag_gesture_commits_once() {
    let mut d = loaded();
    d.canvas.snap_to_grid = false;
    let id = d.add(text_draft(0.0, 0.0)).unwrap();
    let len = d.history().len();

    d.begin_gesture().unwrap();
    for step in 1..=10 {
        d.drag_to(&id, f64::from(step) * 3.0, 5.0).unwrap();
        assert_eq!(d.history().len(), len);
    }
    assert_eq!(x_of(&d, &id), 30.0);
    assert!(d.end_gesture());
    assert_eq!(d.history().len(), len + 1);

    assert!(d.undo());
    assert_eq!(x_of(&d, &id), 0.0);
}

#[test]
fn drag_snaps_and_clamps() {
    let mut d = loaded();
    let id = d.add(text_draft(0.0, 0.0)).unwrap();
    d.drag_to(&id, 23.0, -40.0).unwrap();
    let el = doc(&d).get(&id).unwrap();
    assert_eq!((el.x, el.y), (20.0, 0.0));
}

#[test]
fn empty_gesture_commits_nothing() {
    let mut d = loaded();
    let id = d.add(text_draft(0.0, 0.0)).unwrap();
    let len = d.history().len();
    d.begin_gesture().unwrap();
    d.drag_to(&id, 40.0, 0.0).unwrap();
    d.drag_to(&id, 0.0, 0.0).unwrap();
    assert!(!d.end_gesture());
    assert_eq!(d.history().len(), len);
}

#[test]
fn cancel_gesture_restores_start() {
    let mut d = loaded();
    let id = d.add(text_draft(0.0, 0.0)).unwrap();
    let before = doc(&d).clone();
    d.begin_gesture().unwrap();
    let copy = d.duplicate(&id).unwrap().unwrap();
    assert!(d.in_gesture());
    assert!(d.cancel_gesture());
    assert_eq!(doc(&d), &before);
    assert!(!d.selection().contains(&copy));
    assert!(!d.cancel_gesture());
}

#[test]
fn undo_during_gesture_commits_it_first() {
    let mut d = loaded();
    d.canvas.snap_to_grid = false;
    let id = d.add(text_draft(0.0, 0.0)).unwrap();
    d.begin_gesture().unwrap();
    d.drag_to(&id, 15.0, 0.0).unwrap();
    assert!(d.can_undo());
    assert!(d.undo());
    assert!(!d.in_gesture());
    assert_eq!(x_of(&d, &id), 0.0);
    assert!(d.redo());
    assert_eq!(x_of(&d, &id), 15.0);
}

// =============================================================
// Dirty tracking
// =============================================================

#[test]
fn dirty_flag_tracks_edits_and_saves() {
    let mut d = loaded();
    assert!(!d.is_dirty());
    d.add(text_draft(0.0, 0.0)).unwrap();
    assert!(d.is_dirty());
    d.mark_saved();
    assert!(!d.is_dirty());
    d.undo();
    assert!(d.is_dirty());
}
