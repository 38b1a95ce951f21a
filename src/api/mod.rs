//! API: client side of the template persistence and label rendering service.
//!
//! DESIGN
//! ======
//! The designer core never talks to the network itself. Workflows in
//! `services::template` go through the `TemplateService` trait, so they can be
//! driven by the reqwest-backed [`http::HttpTemplateClient`] in production and
//! by an in-memory fake in tests. Configuration comes from environment
//! variables via [`config::ApiConfig`].

pub mod config;
pub mod http;
pub mod types;

pub use config::ApiConfig;
pub use http::HttpTemplateClient;
pub use types::{ApiError, ImageUpload, ListQuery, RenderedLabel, UploadedImage};

use crate::template::{
    CreateTemplateRequest, LabelRequest, Page, PreviewLabelRequest, Template, TemplateId, UpdateTemplateRequest,
};

/// Operations offered by the template service.
#[async_trait::async_trait]
pub trait TemplateService: Send + Sync {
    /// `GET /templates`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the response is malformed.
    async fn list_templates(&self, query: ListQuery) -> Result<Page<Template>, ApiError>;

    /// `GET /templates/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the response is malformed.
    async fn get_template(&self, id: TemplateId) -> Result<Template, ApiError>;

    /// `POST /templates`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the response is malformed.
    async fn create_template(&self, req: &CreateTemplateRequest) -> Result<Template, ApiError>;

    /// `PUT /templates/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the response is malformed.
    async fn update_template(&self, id: TemplateId, req: &UpdateTemplateRequest) -> Result<Template, ApiError>;

    /// `DELETE /templates/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    async fn delete_template(&self, id: TemplateId) -> Result<(), ApiError>;

    /// `POST /templates/{id}/duplicate`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the response is malformed.
    async fn duplicate_template(&self, id: TemplateId) -> Result<Template, ApiError>;

    /// `POST /labels/generate`: render a print-ready PDF.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    async fn generate_label(&self, req: &LabelRequest) -> Result<RenderedLabel, ApiError>;

    /// `POST /labels/preview`: render a preview in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    async fn preview_label(&self, req: &PreviewLabelRequest) -> Result<RenderedLabel, ApiError>;

    /// `POST /upload/image` as multipart field `image`. Returns the URL the
    /// service stored the image under.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the response is malformed.
    async fn upload_image(&self, image: &ImageUpload) -> Result<String, ApiError>;
}
