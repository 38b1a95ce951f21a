//! Shared numeric constants for the designer.

// ── Editing ─────────────────────────────────────────────────────

/// Offset applied on both axes to a duplicated element so the copy is visible.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Maximum number of snapshots retained by the history.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

// ── Canvas ──────────────────────────────────────────────────────

/// Default canvas width in canvas units.
pub const DEFAULT_CANVAS_WIDTH: f64 = 400.0;

/// Default canvas height in canvas units.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 300.0;

/// Background color of a freshly created document.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

/// Named canvas sizes offered when starting a template: `(name, width, height)`.
pub const CANVAS_PRESETS: [(&str, f64, f64); 4] = [
    ("Business Card", 350.0, 200.0),
    ("Product Label", 400.0, 300.0),
    ("Shipping Label", 600.0, 400.0),
    ("Custom", 400.0, 300.0),
];

// ── View ────────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.25;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 4.0;

/// Zoom change per zoom-in / zoom-out step.
pub const ZOOM_STEP: f64 = 0.25;

/// Grid spacing in canvas units.
pub const DEFAULT_GRID_SIZE: f64 = 10.0;
