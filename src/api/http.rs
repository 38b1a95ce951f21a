//! reqwest-backed template service client.
//!
//! Thin HTTP wrapper over the service's REST endpoints. URL building and
//! response parsing are pure functions for testability.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};

use super::config::{ApiConfig, ApiTimeouts};
use super::types::{ApiError, ImageUpload, ListQuery, RenderedLabel, UploadedImage};
use super::TemplateService;
use crate::template::{
    CreateTemplateRequest, LabelRequest, OutputFormat, Page, PreviewLabelRequest, Template, TemplateId,
    UpdateTemplateRequest,
};

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpTemplateClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTemplateClient {
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the underlying client cannot be built.
    pub fn new(base_url: &str, timeouts: ApiTimeouts) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: super::config::normalize_base_url(base_url) })
    }

    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the underlying client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, config.timeouts)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send_json<T: serde::de::DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let (_, body) = self.send(request).await?;
        parse_json(&body)
    }

    /// Send a request and return the content type and body of a 2xx response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(Option<String>, Vec<u8>), ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            tracing::warn!(status = status.as_u16(), "template service returned an error");
            return Err(ApiError::Response { status: status.as_u16(), body });
        }

        Ok((content_type, bytes.to_vec()))
    }
}

#[async_trait::async_trait]
impl TemplateService for HttpTemplateClient {
    async fn list_templates(&self, query: ListQuery) -> Result<Page<Template>, ApiError> {
        let url = templates_url(&self.base_url);
        self.send_json(self.http.get(url).query(&query.pairs())).await
    }

    async fn get_template(&self, id: TemplateId) -> Result<Template, ApiError> {
        self.send_json(self.http.get(template_url(&self.base_url, id))).await
    }

    async fn create_template(&self, req: &CreateTemplateRequest) -> Result<Template, ApiError> {
        let template: Template = self.send_json(self.http.post(templates_url(&self.base_url)).json(req)).await?;
        tracing::info!(template_id = template.template_id, name = %template.name, "template created");
        Ok(template)
    }

    async fn update_template(&self, id: TemplateId, req: &UpdateTemplateRequest) -> Result<Template, ApiError> {
        let template: Template = self.send_json(self.http.put(template_url(&self.base_url, id)).json(req)).await?;
        tracing::info!(template_id = id, "template updated");
        Ok(template)
    }

    async fn delete_template(&self, id: TemplateId) -> Result<(), ApiError> {
        self.send(self.http.delete(template_url(&self.base_url, id))).await?;
        tracing::info!(template_id = id, "template deleted");
        Ok(())
    }

    async fn duplicate_template(&self, id: TemplateId) -> Result<Template, ApiError> {
        let url = format!("{}/duplicate", template_url(&self.base_url, id));
        self.send_json(self.http.post(url)).await
    }

    async fn generate_label(&self, req: &LabelRequest) -> Result<RenderedLabel, ApiError> {
        let url = format!("{}/labels/generate", self.base_url);
        let (content_type, bytes) = self.send(self.http.post(url).json(req)).await?;
        Ok(RenderedLabel { format: OutputFormat::Pdf, content_type, bytes })
    }

    async fn preview_label(&self, req: &PreviewLabelRequest) -> Result<RenderedLabel, ApiError> {
        let url = format!("{}/labels/preview", self.base_url);
        let (content_type, bytes) = self.send(self.http.post(url).json(req)).await?;
        let format = req.format.unwrap_or_default();
        Ok(RenderedLabel { format, content_type, bytes })
    }

    async fn upload_image(&self, image: &ImageUpload) -> Result<String, ApiError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.mime_type())
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let form = Form::new().part("image", part);
        let uploaded: UploadedImage = self.send_json(self.http.post(upload_url(&self.base_url)).multipart(form)).await?;
        tracing::info!(file = %image.file_name, url = %uploaded.url, "image uploaded");
        Ok(uploaded.url)
    }
}

// =============================================================================
// URLS
// =============================================================================

fn templates_url(base_url: &str) -> String {
    format!("{base_url}/templates")
}

fn template_url(base_url: &str, id: TemplateId) -> String {
    format!("{base_url}/templates/{id}")
}

fn upload_url(base_url: &str) -> String {
    format!("{base_url}/upload/image")
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_json<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
