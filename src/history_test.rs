#![allow(clippy::float_cmp)]

use super::*;

fn doc(width: f64) -> Document {
    Document::create_default(width, 100.0)
}

fn widths(h: &History) -> Vec<f64> {
    h.entries().map(|d| d.width).collect()
}

#[test]
fn new_history_is_empty() {
    let mut h = History::new(10);
    assert!(h.is_empty());
    assert_eq!(h.cursor(), None);
    assert!(h.current().is_none());
    assert!(h.undo().is_none());
    assert!(h.redo().is_none());
    assert!(!h.can_undo());
}

#[test]
fn load_seeds_single_entry() {
    let mut h = History::new(10);
    h.commit(doc(1.0));
    h.commit(doc(2.0));
    h.load(doc(9.0));
    assert_eq!(widths(&h), vec![9.0]);
    assert_eq!(h.cursor(), Some(0));
}

#[test]
fn commit_on_empty_acts_as_load() {
    let mut h = History::new(10);
    h.commit(doc(1.0));
    assert_eq!(h.len(), 1);
    assert_eq!(h.cursor(), Some(0));
}

#[test]
fn undo_redo_walk_the_cursor() {
    let mut h = History::new(10);
    h.load(doc(1.0));
    h.commit(doc(2.0));
    h.commit(doc(3.0));

    assert_eq!(h.undo().map(|d| d.width), Some(2.0));
    assert_eq!(h.undo().map(|d| d.width), Some(1.0));
    assert!(h.undo().is_none());
    assert_eq!(h.cursor(), Some(0));

    assert_eq!(h.redo().map(|d| d.width), Some(2.0));
    assert_eq!(h.redo().map(|d| d.width), Some(3.0));
    assert!(h.redo().is_none());
    assert_eq!(h.cursor(), Some(2));
}

#[test]
fn commit_after_undo_drops_redo_branch() {
    let mut h = History::new(10);
    h.load(doc(1.0));
    h.commit(doc(2.0));
    h.commit(doc(3.0));
    h.undo();
    h.undo();
    h.commit(doc(4.0));
    assert_eq!(widths(&h), vec![1.0, 4.0]);
    assert!(!h.can_redo());
    assert_eq!(h.current().map(|d| d.width), Some(4.0));
}

#[test]
fn capacity_evicts_oldest() {
    let mut h = History::new(3);
    h.load(doc(0.0));
    for i in 1..=5 {
        h.commit(doc(f64::from(i)));
    }
    assert_eq!(widths(&h), vec![3.0, 4.0, 5.0]);
    assert_eq!(h.cursor(), Some(2));
    assert_eq!(h.current().map(|d| d.width), Some(5.0));
}

#[test]
fn default_capacity_is_fifty() {
    let mut h = History::default();
    h.load(doc(0.0));
    for i in 1..=60 {
        h.commit(doc(f64::from(i)));
    }
    assert_eq!(h.capacity(), 50);
    assert_eq!(h.len(), 50);
    assert_eq!(h.entries().next().map(|d| d.width), Some(11.0));
}

#[test]
fn zero_capacity_is_clamped() {
    let mut h = History::new(0);
    h.load(doc(1.0));
    h.commit(doc(2.0));
    assert_eq!(widths(&h), vec![2.0]);
    assert!(!h.can_undo());
}

#[test]
fn reset_returns_to_empty() {
    let mut h = History::new(5);
    h.load(doc(1.0));
    h.reset();
    assert!(h.is_empty());
    assert_eq!(h.cursor(), None);
}
