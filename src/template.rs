//! Persisted template records and label render requests.
//!
//! These mirror the JSON exchanged with the template/rendering service. A
//! template stores its layout as a JSON string (`layoutJson`) and its required
//! data fields as a JSON array encoded in a string (`requiredFields`).

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentError};

/// Server-assigned template identifier.
pub type TemplateId = i64;

/// Data bound into a label at render time: field name → value.
pub type LabelData = BTreeMap<String, String>;

// =============================================================================
// CATEGORY
// =============================================================================

/// Template category. `All` is only meaningful as a list filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateCategory {
    #[default]
    All,
    Product,
    Shipping,
    Retail,
    Custom,
}

impl TemplateCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Product => "Product",
            Self::Shipping => "Shipping",
            Self::Retail => "Retail",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "product" => Ok(Self::Product),
            "shipping" => Ok(Self::Shipping),
            "retail" => Ok(Self::Retail),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown template category: {other}")),
        }
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A persisted template as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub template_id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Serialized [`Document`].
    pub layout_json: String,
    pub width: f64,
    pub height: f64,
    /// JSON array of field names, encoded as a string.
    #[serde(default)]
    pub required_fields: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
}

impl Template {
    /// Decode the stored layout.
    ///
    /// # Errors
    ///
    /// Returns a `DocumentError` when the layout cannot be decoded.
    pub fn layout(&self) -> Result<Document, DocumentError> {
        Document::from_layout_json(&self.layout_json)
    }

    /// Whether `query` occurs in the name or description, ignoring case.
    /// A blank query matches every template.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    /// Required data field names. An empty or unreadable list yields no fields.
    #[must_use]
    pub fn required_fields(&self) -> Vec<String> {
        if self.required_fields.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str::<Vec<String>>(&self.required_fields) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!(template_id = self.template_id, error = %e, "unreadable requiredFields");
                Vec::new()
            }
        }
    }
}

/// Descriptive fields supplied by the user when saving a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMeta {
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub is_public: bool,
}

impl Default for TemplateMeta {
    fn default() -> Self {
        Self {
            name: "My Template".to_owned(),
            description: String::new(),
            category: TemplateCategory::Custom,
            is_public: false,
        }
    }
}

/// Body of `POST /templates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    pub name: String,
    pub description: String,
    pub layout_json: String,
    pub width: f64,
    pub height: f64,
    pub required_fields: Vec<String>,
    pub category: String,
    pub is_public: bool,
}

impl CreateTemplateRequest {
    /// Build a request from a document; required fields are the document's
    /// bound data fields.
    ///
    /// # Errors
    ///
    /// Returns a `DocumentError` when the document cannot be serialized.
    pub fn from_document(meta: &TemplateMeta, doc: &Document) -> Result<Self, DocumentError> {
        Ok(Self {
            name: meta.name.clone(),
            description: meta.description.clone(),
            layout_json: doc.to_layout_json()?,
            width: doc.width,
            height: doc.height,
            required_fields: doc.required_fields(),
            category: meta.category.as_str().to_owned(),
            is_public: meta.is_public,
        })
    }
}

/// Body of `PUT /templates/{id}`. Only present fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateRequest {
    /// Template being updated; always sent.
    pub template_id: TemplateId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_json: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl UpdateTemplateRequest {
    /// Full replacement of template `template_id` with the content of `req`.
    #[must_use]
    pub fn replacing(template_id: TemplateId, req: CreateTemplateRequest) -> Self {
        Self {
            template_id,
            name: Some(req.name),
            description: Some(req.description),
            layout_json: Some(req.layout_json),
            width: Some(req.width),
            height: Some(req.height),
            required_fields: Some(req.required_fields),
            category: Some(req.category),
            is_public: Some(req.is_public),
        }
    }
}

/// Paginated list envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl Page<Template> {
    /// Keep only templates whose name or description contains `query`,
    /// ignoring case. A blank query keeps everything. Paging counters are
    /// left as reported by the service.
    #[must_use]
    pub fn search(mut self, query: &str) -> Self {
        self.data.retain(|t| t.matches_search(query));
        self
    }
}

// =============================================================================
// RENDERING
// =============================================================================

/// Output format of a rendered label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Png,
}

impl OutputFormat {
    /// Conventional file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "png" => Ok(Self::Png),
            other => Err(format!("unsupported output format: {other}")),
        }
    }
}

/// Body of `POST /labels/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRequest {
    pub template_id: TemplateId,
    pub data: LabelData,
}

/// Body of `POST /labels/preview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewLabelRequest {
    pub template_id: TemplateId,
    pub data: LabelData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

/// Required fields that are absent from `data` or hold only whitespace.
#[must_use]
pub fn missing_fields(required: &[String], data: &LabelData) -> Vec<String> {
    required
        .iter()
        .filter(|field| data.get(field.as_str()).is_none_or(|v| v.trim().is_empty()))
        .cloned()
        .collect()
}
