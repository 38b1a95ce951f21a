//! Template service: open, save and render against the template service.
//!
//! DESIGN
//! ======
//! A template is opened by fetching its record and loading its layout into
//! the designer; an unreadable layout falls back to a blank document of the
//! template's size and is reported as a warning, not an error. Saving
//! serializes the displayed document, derives the required data fields from
//! the elements' bindings, and creates or updates the record. Rendering
//! checks the required fields locally before asking the service for output.
//! Attaching an image uploads the file first and then points the image
//! element's `src` at the returned URL as one undoable edit.

use tracing::{info, warn};

use crate::api::{ApiError, ImageUpload, RenderedLabel, TemplateService};
use crate::designer::{Designer, DesignerError};
use crate::document::DocumentError;
use crate::element::{ElementPatch, ElementProps};
use crate::template::{
    CreateTemplateRequest, LabelData, LabelRequest, OutputFormat, PreviewLabelRequest, Template, TemplateId,
    TemplateMeta, UpdateTemplateRequest, missing_fields,
};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Designer(#[from] DesignerError),
    #[error("layout encoding failed: {0}")]
    Layout(#[from] DocumentError),
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("element {0} is not an image")]
    NotAnImage(String),
}

/// How a label should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Print-ready PDF via `/labels/generate`.
    Generate,
    /// Preview in the given format via `/labels/preview`.
    Preview(OutputFormat),
}

// =============================================================================
// OPEN / SAVE
// =============================================================================

/// Fetch template `id` and load its layout into `designer`.
///
/// Returns the template and, when the layout could not be decoded, the
/// decode error (the designer then holds a blank document of the template's
/// size).
///
/// # Errors
///
/// Returns `Api` when the template cannot be fetched.
pub async fn open_template(
    service: &dyn TemplateService,
    id: TemplateId,
    designer: &mut Designer,
) -> Result<(Template, Option<DocumentError>), TemplateError> {
    let template = service.get_template(id).await?;
    let warning = designer.open_layout(&template.layout_json, template.width, template.height);
    if warning.is_some() {
        warn!(template_id = id, "template layout replaced by a blank document");
    }
    info!(template_id = id, name = %template.name, "template opened");
    Ok((template, warning))
}

/// Save the displayed document. Creates a new template when `existing` is
/// `None`, otherwise updates that template. Clears the dirty flag on success.
///
/// # Errors
///
/// Returns `Designer` when nothing is loaded, `Layout` when the document
/// cannot be serialized, and `Api` when the service call fails.
pub async fn save_template(
    service: &dyn TemplateService,
    designer: &mut Designer,
    meta: &TemplateMeta,
    existing: Option<TemplateId>,
) -> Result<Template, TemplateError> {
    let doc = designer.document().ok_or(DesignerError::NoActiveDocument)?;
    let req = CreateTemplateRequest::from_document(meta, doc)?;
    let template = match existing {
        Some(id) => service.update_template(id, &UpdateTemplateRequest::replacing(id, req)).await?,
        None => service.create_template(&req).await?,
    };
    designer.mark_saved();
    info!(template_id = template.template_id, "template saved");
    Ok(template)
}

// =============================================================================
// RENDER
// =============================================================================

/// Render `template` with `data` bound into its fields.
///
/// # Errors
///
/// Returns `MissingFields` when a required field is absent or blank, before
/// any request is made, and `Api` when the service call fails.
pub async fn render_label(
    service: &dyn TemplateService,
    template: &Template,
    data: LabelData,
    mode: RenderMode,
) -> Result<RenderedLabel, TemplateError> {
    let missing = missing_fields(&template.required_fields(), &data);
    if !missing.is_empty() {
        return Err(TemplateError::MissingFields(missing));
    }

    let template_id = template.template_id;
    let rendered = match mode {
        RenderMode::Generate => service.generate_label(&LabelRequest { template_id, data }).await?,
        RenderMode::Preview(format) => {
            service
                .preview_label(&PreviewLabelRequest { template_id, data, format: Some(format) })
                .await?
        }
    };
    info!(template_id, bytes = rendered.bytes.len(), "label rendered");
    Ok(rendered)
}

// =============================================================================
// IMAGES
// =============================================================================

/// Upload `image` and set it as the `src` of image element `id`.
/// Returns the URL the service assigned.
///
/// # Errors
///
/// Returns `Designer` when nothing is loaded, `NotAnImage` when `id` is not
/// an image element (nothing is uploaded then), and `Api` when the upload
/// fails.
pub async fn attach_image(
    service: &dyn TemplateService,
    designer: &mut Designer,
    id: &str,
    image: &ImageUpload,
) -> Result<String, TemplateError> {
    let doc = designer.document().ok_or(DesignerError::NoActiveDocument)?;
    let Some(ElementProps::Image(mut props)) = doc.get(id).map(|el| el.props.clone()) else {
        return Err(TemplateError::NotAnImage(id.to_owned()));
    };

    let url = service.upload_image(image).await?;
    props.src = Some(url.clone());
    designer.update(id, &ElementPatch::props(ElementProps::Image(props)))?;
    info!(element = id, url = %url, "image attached");
    Ok(url)
}

#[cfg(test)]
#[path = "template_test.rs"]
mod tests;
