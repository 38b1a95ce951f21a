#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults() {
    let c = CanvasSettings::default();
    assert_eq!(c.zoom, 1.0);
    assert!(c.show_grid);
    assert!(c.snap_to_grid);
    assert_eq!(c.grid_size, 10.0);
}

#[test]
fn zoom_is_clamped() {
    let mut c = CanvasSettings::default();
    c.set_zoom(10.0);
    assert_eq!(c.zoom, 4.0);
    c.zoom_in();
    assert_eq!(c.zoom, 4.0);
    c.set_zoom(0.3);
    c.zoom_out();
    assert_eq!(c.zoom, 0.25);
    c.set_zoom(f64::NAN);
    assert_eq!(c.zoom, 1.0);
}

#[test]
fn zoom_steps() {
    let mut c = CanvasSettings::default();
    c.zoom_in();
    assert_eq!(c.zoom, 1.25);
    c.zoom_out();
    c.zoom_out();
    assert_eq!(c.zoom, 0.75);
}

#[test]
fn snap_rounds_to_grid() {
    let mut c = CanvasSettings::default();
    assert_eq!(c.snap(14.0), 10.0);
    assert_eq!(c.snap(15.0), 20.0);
    c.snap_to_grid = false;
    assert_eq!(c.snap(14.0), 14.0);
}

#[test]
fn screen_to_canvas_divides_by_zoom() {
    let mut c = CanvasSettings::default();
    c.set_zoom(2.0);
    assert_eq!(c.screen_to_canvas(50.0), 25.0);
}

#[test]
fn serializes_camel_case() {
    let value = serde_json::to_value(CanvasSettings::default()).unwrap();
    assert_eq!(value["snapToGrid"], true);
    assert_eq!(value["gridSize"], 10.0);
}
