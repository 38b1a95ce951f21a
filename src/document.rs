//! Document model: one label template as it is being edited.
//!
//! A `Document` is a plain value. Nothing in this module changes a document in
//! place; all edits go through [`crate::mutation`], which returns new documents.
//! Element order in `elements` is insertion order. Paint order is decided by
//! `z_index`, with ties broken by insertion index (see [`Document::paint_order`]).

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BACKGROUND_COLOR, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::element::{Element, ElementId, OpenMap, non_negative};

/// Errors decoding or encoding a persisted layout.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("layout contains duplicate element id: {0}")]
    DuplicateId(ElementId),
}

/// The editable state of one label template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Canvas width in canvas units.
    pub width: f64,
    /// Canvas height in canvas units.
    pub height: f64,
    /// Canvas background as a CSS color string.
    #[serde(default = "default_background")]
    pub background_color: String,
    /// Elements in insertion order.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Free-form template settings carried through untouched.
    #[serde(default)]
    pub settings: OpenMap,
}

impl Document {
    /// Empty document with the given canvas size and the default background.
    #[must_use]
    pub fn create_default(width: f64, height: f64) -> Self {
        Self {
            width: non_negative(width),
            height: non_negative(height),
            background_color: DEFAULT_BACKGROUND_COLOR.to_owned(),
            elements: Vec::new(),
            settings: OpenMap::new(),
        }
    }

    /// Look up an element by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Insertion index of an element.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    /// Element ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|el| el.id.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Highest `z_index` among all elements, `None` when empty.
    #[must_use]
    pub fn max_z_index(&self) -> Option<i64> {
        self.elements.iter().map(|el| el.z_index).max()
    }

    /// Lowest `z_index` among all elements, `None` when empty.
    #[must_use]
    pub fn min_z_index(&self) -> Option<i64> {
        self.elements.iter().map(|el| el.z_index).min()
    }

    /// Elements bottom-to-top: ascending `z_index`, ties by insertion order.
    #[must_use]
    pub fn paint_order(&self) -> Vec<&Element> {
        let mut objs: Vec<&Element> = self.elements.iter().collect();
        // Stable sort keeps insertion order among equal z-indices.
        objs.sort_by_key(|el| el.z_index);
        objs
    }

    /// Distinct data fields bound by elements, in insertion order.
    #[must_use]
    pub fn required_fields(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.elements
            .iter()
            .filter_map(Element::data_field)
            .filter(|field| seen.insert(*field))
            .map(str::to_owned)
            .collect()
    }

    // --- Layout JSON ---

    /// Encode as layout JSON.
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialization fails.
    pub fn to_layout_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode layout JSON, rejecting documents with duplicate element ids.
    ///
    /// Element properties are decoded leniently (see
    /// [`ElementProps::from_map`](crate::element::ElementProps::from_map)) and
    /// element geometry is clamped, so one odd value never costs the layout.
    ///
    /// # Errors
    ///
    /// Returns `Json` for malformed JSON, an element without an id or with an
    /// unknown `type`, and `DuplicateId` when two elements share an id.
    pub fn from_layout_json(json: &str) -> Result<Self, DocumentError> {
        let doc: Document = serde_json::from_str(json)?;
        doc.check_unique_ids()?;
        Ok(doc)
    }

    /// Decode layout JSON, substituting an empty `width` × `height` document
    /// when the layout cannot be read. The decode error is returned alongside
    /// so the caller can surface it as a warning.
    #[must_use]
    pub fn from_layout_or_default(json: &str, width: f64, height: f64) -> (Self, Option<DocumentError>) {
        match Self::from_layout_json(json) {
            Ok(doc) => (doc, None),
            Err(e) => (Self::create_default(width, height), Some(e)),
        }
    }

    fn check_unique_ids(&self) -> Result<(), DocumentError> {
        let mut seen = HashSet::with_capacity(self.elements.len());
        for el in &self.elements {
            if !seen.insert(el.id.as_str()) {
                return Err(DocumentError::DuplicateId(el.id.clone()));
            }
        }
        Ok(())
    }
}

fn default_background() -> String {
    DEFAULT_BACKGROUND_COLOR.to_owned()
}

impl Default for Document {
    fn default() -> Self {
        Self::create_default(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}
