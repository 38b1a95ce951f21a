//! Designer state engine for printable label templates.
//!
//! A label template is a fixed-size canvas holding typed elements (text,
//! barcodes, QR codes, images, rectangles, lines). This crate owns the
//! in-memory model of one template while it is being edited, the pure
//! operations that transform it, and the linear undo/redo history built on
//! immutable snapshots. Persisting templates and rendering them with bound
//! data happens in an external service reached through [`api`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`element`] | Element schema: kinds, typed per-kind properties, drafts and patches |
//! | [`document`] | Template document: canvas size, background, ordered elements |
//! | [`selection`] | Ordered set of selected element ids |
//! | [`mutation`] | Pure operations producing new documents and selections |
//! | [`history`] | Bounded linear snapshot history with a cursor |
//! | [`canvas`] | View settings (zoom, grid, snapping) that never enter history |
//! | [`designer`] | The editing session tying the pieces together |
//! | [`template`] | Persisted template records and render requests |
//! | [`api`] | Client for the template/rendering service |
//! | [`services`] | Workflows joining a designer session with the service |
//! | [`consts`] | Shared numeric constants |

pub mod api;
pub mod canvas;
pub mod consts;
pub mod designer;
pub mod document;
pub mod element;
pub mod history;
pub mod mutation;
pub mod selection;
pub mod services;
pub mod template;
