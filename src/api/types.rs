//! API types: the error surface and rendered label payloads.

use serde::{Deserialize, Serialize};

use crate::template::OutputFormat;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by template service operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request to the service failed.
    #[error("API request failed: {0}")]
    Request(String),

    /// The service returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    Response { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    Parse(String),
}

impl ApiError {
    /// Whether the request may succeed if repeated.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Response { status: 429 | 500..=599, .. })
    }

    /// Whether the service reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Response { status: 404, .. })
    }
}

// =============================================================================
// RENDERED OUTPUT
// =============================================================================

/// A rendered label as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLabel {
    pub format: OutputFormat,
    /// `Content-Type` reported by the service, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

// =============================================================================
// IMAGE UPLOAD
// =============================================================================

/// An image file to upload for use as an image element's `src`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// MIME type guessed from the file extension.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        let ext = self.file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => "image/png",
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("svg") => "image/svg+xml",
            Some("bmp") => "image/bmp",
            _ => "application/octet-stream",
        }
    }
}

/// Response of `POST /upload/image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

// =============================================================================
// LISTING
// =============================================================================

/// Query parameters for `GET /templates`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub category: crate::template::TemplateCategory,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { page: 1, limit: 20, category: crate::template::TemplateCategory::All }
    }
}

impl ListQuery {
    /// Query pairs in request order. `category` is omitted for `All`.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if self.category != crate::template::TemplateCategory::All {
            pairs.push(("category", self.category.as_str().to_owned()));
        }
        pairs
    }
}
