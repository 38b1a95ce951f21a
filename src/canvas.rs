//! Canvas view settings: zoom, grid display and grid snapping.
//!
//! These describe how the canvas is viewed, not what is on it, so they are
//! not part of the document and never enter the history.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_GRID_SIZE, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSettings {
    /// Zoom factor, kept within `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f64,
    pub show_grid: bool,
    /// Round dragged positions to the grid.
    pub snap_to_grid: bool,
    /// Grid spacing in canvas units.
    pub grid_size: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self { zoom: 1.0, show_grid: true, snap_to_grid: true, grid_size: DEFAULT_GRID_SIZE }
    }
}

impl CanvasSettings {
    /// Set the zoom factor, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = if zoom.is_finite() { zoom.clamp(MIN_ZOOM, MAX_ZOOM) } else { 1.0 };
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Round `value` to the nearest grid line when snapping is enabled.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        if !self.snap_to_grid || self.grid_size <= 0.0 {
            return value;
        }
        (value / self.grid_size).round() * self.grid_size
    }

    /// Convert a screen-space distance to canvas units at the current zoom.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: f64) -> f64 {
        screen / self.zoom
    }
}
