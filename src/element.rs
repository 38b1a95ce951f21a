//! Element model: the placeable objects of a label and their properties.
//!
//! Each element carries its geometry, a paint-order `z_index`, and a typed
//! property record selected by its kind (`ElementProps`). The kind is derived
//! from the property variant, so it cannot drift from the properties and can
//! never change after creation. Property records keep unknown keys in an
//! `extra` map so layouts written by other tools survive a decode/encode pass.
//!
//! On the wire an element is a flat camelCase object:
//! `{"id", "type", "x", "y", "width", "height", "zIndex", "properties", "style"}`.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Opaque unique identifier of an element within a document.
pub type ElementId = String;

/// Open key/value map used for `style` and for unrecognised property keys.
pub type OpenMap = Map<String, Value>;

/// Generate a fresh element id.
#[must_use]
pub fn new_element_id() -> ElementId {
    format!("element_{}", Uuid::new_v4().simple())
}

/// Clamp a geometry value to a finite, non-negative number.
pub(crate) fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

// =============================================================================
// KIND
// =============================================================================

/// The kind of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Static or data-bound text.
    Text,
    /// One-dimensional barcode.
    Barcode,
    /// QR code.
    Qrcode,
    /// Raster image referenced by URL.
    Image,
    /// Filled and/or stroked rectangle.
    Rectangle,
    /// Horizontal rule spanning the bounding box.
    Line,
}

impl ElementKind {
    /// Every kind, in palette order.
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Text,
        ElementKind::Barcode,
        ElementKind::Qrcode,
        ElementKind::Image,
        ElementKind::Rectangle,
        ElementKind::Line,
    ];

    /// Wire name of the kind (`"text"`, `"qrcode"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Barcode => "barcode",
            Self::Qrcode => "qrcode",
            Self::Image => "image",
            Self::Rectangle => "rectangle",
            Self::Line => "line",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown element kind: {s}"))
    }
}

// =============================================================================
// PROPERTY VALUE ENUMS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Barcode symbology accepted by the rendering service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbology {
    #[default]
    #[serde(rename = "CODE_128")]
    Code128,
    #[serde(rename = "CODE_39")]
    Code39,
    #[serde(rename = "EAN_13")]
    Ean13,
}

/// QR error correction level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

// =============================================================================
// PROPERTY RECORDS
// =============================================================================

/// Properties of a text element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Data field whose value replaces `content` at render time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: OpenMap,
}

impl TextProps {
    /// Text content. Empty string when absent.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Font size in canvas units. Defaults to `14.0`.
    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.font_size.unwrap_or(14.0)
    }

    /// Font family. Defaults to `"Inter"`.
    #[must_use]
    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or("Inter")
    }

    #[must_use]
    pub fn font_weight(&self) -> FontWeight {
        self.font_weight.unwrap_or_default()
    }

    #[must_use]
    pub fn text_align(&self) -> TextAlign {
        self.text_align.unwrap_or_default()
    }

    /// Text color as a CSS color string. Defaults to `"#000000"`.
    #[must_use]
    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or("#000000")
    }
}

/// Properties of a barcode element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_field: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub symbology: Option<Symbology>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_text: Option<bool>,
    #[serde(flatten)]
    pub extra: OpenMap,
}

impl BarcodeProps {
    #[must_use]
    pub fn data(&self) -> &str {
        self.data.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn symbology(&self) -> Symbology {
        self.symbology.unwrap_or_default()
    }

    /// Whether the human-readable text is printed under the bars. Defaults to `true`.
    #[must_use]
    pub fn show_text(&self) -> bool {
        self.show_text.unwrap_or(true)
    }
}

/// Properties of a QR code element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_correction: Option<ErrorCorrection>,
    #[serde(flatten)]
    pub extra: OpenMap,
}

impl QrCodeProps {
    #[must_use]
    pub fn data(&self) -> &str {
        self.data.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn error_correction(&self) -> ErrorCorrection {
        self.error_correction.unwrap_or_default()
    }
}

/// Properties of an image element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintain_aspect_ratio: Option<bool>,
    #[serde(flatten)]
    pub extra: OpenMap,
}

impl ImageProps {
    #[must_use]
    pub fn src(&self) -> &str {
        self.src.as_deref().unwrap_or("")
    }

    /// Defaults to `true`.
    #[must_use]
    pub fn maintain_aspect_ratio(&self) -> bool {
        self.maintain_aspect_ratio.unwrap_or(true)
    }
}

/// Properties of a rectangle element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(flatten)]
    pub extra: OpenMap,
}

impl RectangleProps {
    /// Fill color. Defaults to `"#f0f0f0"`.
    #[must_use]
    pub fn fill(&self) -> &str {
        self.fill.as_deref().unwrap_or("#f0f0f0")
    }

    /// Stroke width. Defaults to `1.0`.
    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width.unwrap_or(1.0)
    }
}

/// Properties of a line element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(flatten)]
    pub extra: OpenMap,
}

impl LineProps {
    /// Stroke color. Defaults to `"#000000"`.
    #[must_use]
    pub fn stroke(&self) -> &str {
        self.stroke.as_deref().unwrap_or("#000000")
    }

    /// Stroke width. Defaults to `2.0`.
    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width.unwrap_or(2.0)
    }
}

// =============================================================================
// PROPS UNION
// =============================================================================

/// Kind-specific properties. The variant determines the element's kind.
///
/// Serializes as the bare property object; the kind travels separately in the
/// element's `type` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ElementProps {
    Text(TextProps),
    Barcode(BarcodeProps),
    Qrcode(QrCodeProps),
    Image(ImageProps),
    Rectangle(RectangleProps),
    Line(LineProps),
}

impl ElementProps {
    /// The element kind these properties belong to.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text(_) => ElementKind::Text,
            Self::Barcode(_) => ElementKind::Barcode,
            Self::Qrcode(_) => ElementKind::Qrcode,
            Self::Image(_) => ElementKind::Image,
            Self::Rectangle(_) => ElementKind::Rectangle,
            Self::Line(_) => ElementKind::Line,
        }
    }

    /// Starter properties used by the element palette, with sample content so
    /// a new element is visible immediately.
    #[must_use]
    pub fn editor_default(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => Self::Text(TextProps {
                content: Some("Sample Text".into()),
                font_size: Some(14.0),
                font_family: Some("Inter".into()),
                font_weight: Some(FontWeight::Normal),
                text_align: Some(TextAlign::Left),
                color: Some("#000000".into()),
                ..TextProps::default()
            }),
            ElementKind::Barcode => Self::Barcode(BarcodeProps {
                data: Some("123456789".into()),
                data_field: Some("Code".into()),
                symbology: Some(Symbology::Code128),
                show_text: Some(true),
                ..BarcodeProps::default()
            }),
            ElementKind::Qrcode => Self::Qrcode(QrCodeProps {
                data: Some("Sample QR Data".into()),
                data_field: Some("Code".into()),
                error_correction: Some(ErrorCorrection::M),
                ..QrCodeProps::default()
            }),
            ElementKind::Image => Self::Image(ImageProps {
                src: Some(String::new()),
                alt: Some("Image".into()),
                maintain_aspect_ratio: Some(true),
                ..ImageProps::default()
            }),
            ElementKind::Rectangle => Self::Rectangle(RectangleProps {
                fill: Some("#f0f0f0".into()),
                stroke: Some("#cccccc".into()),
                stroke_width: Some(1.0),
                ..RectangleProps::default()
            }),
            ElementKind::Line => Self::Line(LineProps {
                stroke: Some("#000000".into()),
                stroke_width: Some(2.0),
                ..LineProps::default()
            }),
        }
    }

    /// Decode a raw property object for the given kind.
    ///
    /// Never fails: a recognised key holding a value of the wrong type is
    /// kept verbatim in `extra` and its typed field stays unset, so the
    /// accessor falls back to the default while the raw value still
    /// round-trips.
    #[must_use]
    pub fn from_map(kind: ElementKind, map: OpenMap) -> Self {
        match kind {
            ElementKind::Text => Self::Text(decode_lenient(map, |p: &mut TextProps| &mut p.extra)),
            ElementKind::Barcode => Self::Barcode(decode_lenient(map, |p: &mut BarcodeProps| &mut p.extra)),
            ElementKind::Qrcode => Self::Qrcode(decode_lenient(map, |p: &mut QrCodeProps| &mut p.extra)),
            ElementKind::Image => Self::Image(decode_lenient(map, |p: &mut ImageProps| &mut p.extra)),
            ElementKind::Rectangle => Self::Rectangle(decode_lenient(map, |p: &mut RectangleProps| &mut p.extra)),
            ElementKind::Line => Self::Line(decode_lenient(map, |p: &mut LineProps| &mut p.extra)),
        }
    }

    fn extra_mut(&mut self) -> &mut OpenMap {
        match self {
            Self::Text(p) => &mut p.extra,
            Self::Barcode(p) => &mut p.extra,
            Self::Qrcode(p) => &mut p.extra,
            Self::Image(p) => &mut p.extra,
            Self::Rectangle(p) => &mut p.extra,
            Self::Line(p) => &mut p.extra,
        }
    }

    /// Drop `extra` entries whose key is now held by a typed field, so a
    /// raw value kept from a lenient decode never serializes twice.
    pub(crate) fn shed_shadowed_extra(&mut self) {
        if self.extra_mut().is_empty() {
            return;
        }
        let mut extra = std::mem::take(self.extra_mut());
        if let Ok(Value::Object(typed)) = serde_json::to_value(&*self) {
            extra.retain(|key, _| !typed.contains_key(key));
        }
        *self.extra_mut() = extra;
    }

    /// Name of the data field bound to this element, if any.
    #[must_use]
    pub fn data_field(&self) -> Option<&str> {
        let field = match self {
            Self::Text(p) => p.data_field.as_deref(),
            Self::Barcode(p) => p.data_field.as_deref(),
            Self::Qrcode(p) => p.data_field.as_deref(),
            Self::Image(_) | Self::Rectangle(_) | Self::Line(_) => None,
        };
        field.filter(|f| !f.trim().is_empty())
    }
}

/// Decode a property record key by key when the whole object does not fit.
fn decode_lenient<T>(map: OpenMap, extra: fn(&mut T) -> &mut OpenMap) -> T
where
    T: DeserializeOwned + Default,
{
    let whole = Value::Object(map);
    if let Ok(props) = T::deserialize(&whole) {
        return props;
    }
    let Value::Object(map) = whole else {
        return T::default();
    };

    let mut fitting = OpenMap::new();
    let mut mistyped = OpenMap::new();
    for (key, value) in map {
        let alone = Value::Object(OpenMap::from_iter([(key.clone(), value.clone())]));
        if T::deserialize(&alone).is_ok() {
            fitting.insert(key, value);
        } else {
            mistyped.insert(key, value);
        }
    }

    tracing::warn!(keys = ?mistyped.keys().collect::<Vec<_>>(), "keeping mistyped properties as raw values");
    let fitting = Value::Object(fitting);
    let mut props = match T::deserialize(&fitting) {
        Ok(props) => props,
        Err(e) => {
            tracing::warn!(error = %e, "properties unreadable; keeping all as raw values");
            if let Value::Object(rest) = fitting {
                mistyped.extend(rest);
            }
            T::default()
        }
    };
    extra(&mut props).extend(mistyped);
    props
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Axis-aligned rectangle in canvas units, `min` inclusive to `max` inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    /// Build a rectangle from two opposite corners given in any order.
    #[must_use]
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { min_x: x0.min(x1), min_y: y0.min(y1), max_x: x0.max(x1), max_y: y0.max(y1) }
    }

    /// Whether `other` lies entirely inside this rectangle (edges may touch).
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x >= self.min_x && other.min_y >= self.min_y && other.max_x <= self.max_x && other.max_y <= self.max_y
    }
}

// =============================================================================
// ELEMENT
// =============================================================================

/// A placed element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ElementRecord")]
pub struct Element {
    /// Unique identifier, immutable once assigned.
    pub id: ElementId,
    /// Left edge in canvas units.
    pub x: f64,
    /// Top edge in canvas units.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Paint order; higher values paint on top.
    pub z_index: i64,
    /// Kind-specific properties.
    pub props: ElementProps,
    /// Open presentation map carried through untouched.
    pub style: OpenMap,
}

impl Element {
    /// The element's kind, derived from its properties.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.props.kind()
    }

    /// Full bounding box `(x, y, x + width, y + height)`.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect { min_x: self.x, min_y: self.y, max_x: self.x + self.width, max_y: self.y + self.height }
    }

    /// Name of the data field bound to this element, if any.
    #[must_use]
    pub fn data_field(&self) -> Option<&str> {
        self.props.data_field()
    }

    /// Return a copy of this element with `patch` merged in.
    ///
    /// The id is never touched. Properties of a different kind are ignored so
    /// the kind stays fixed; geometry is clamped to be non-negative.
    #[must_use]
    pub fn patched(&self, patch: &ElementPatch) -> Element {
        let mut next = self.clone();
        if let Some(x) = patch.x {
            next.x = non_negative(x);
        }
        if let Some(y) = patch.y {
            next.y = non_negative(y);
        }
        if let Some(w) = patch.width {
            next.width = non_negative(w);
        }
        if let Some(h) = patch.height {
            next.height = non_negative(h);
        }
        if let Some(z) = patch.z_index {
            next.z_index = z;
        }
        if let Some(ref props) = patch.props {
            if props.kind() == self.kind() {
                next.props = props.clone();
                next.props.shed_shadowed_extra();
            } else {
                tracing::warn!(
                    id = %self.id,
                    kind = %self.kind(),
                    requested = %props.kind(),
                    "ignoring properties of a different kind"
                );
            }
        }
        if let Some(ref style) = patch.style {
            next.style = style.clone();
        }
        next
    }
}

impl Serialize for Element {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ElementWire {
            id: &self.id,
            kind: self.kind(),
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            z_index: self.z_index,
            properties: &self.props,
            style: &self.style,
        }
        .serialize(serializer)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ElementWire<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: ElementKind,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    z_index: i64,
    properties: &'a ElementProps,
    #[serde(skip_serializing_if = "is_empty_map")]
    style: &'a OpenMap,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_empty_map(map: &&OpenMap) -> bool {
    map.is_empty()
}

/// Wire shape accepted when decoding. Geometry that is missing, mistyped or
/// negative reads as 0; a fractional `zIndex` is rounded.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElementRecord {
    id: ElementId,
    #[serde(rename = "type")]
    kind: ElementKind,
    #[serde(default, deserialize_with = "lenient_coord")]
    x: f64,
    #[serde(default, deserialize_with = "lenient_coord")]
    y: f64,
    #[serde(default, deserialize_with = "lenient_coord")]
    width: f64,
    #[serde(default, deserialize_with = "lenient_coord")]
    height: f64,
    #[serde(default, deserialize_with = "lenient_z_index")]
    z_index: i64,
    #[serde(default)]
    properties: OpenMap,
    #[serde(default)]
    style: OpenMap,
}

impl From<ElementRecord> for Element {
    fn from(rec: ElementRecord) -> Self {
        Element {
            id: rec.id,
            x: rec.x,
            y: rec.y,
            width: rec.width,
            height: rec.height,
            z_index: rec.z_index,
            props: ElementProps::from_map(rec.kind, rec.properties),
            style: rec.style,
        }
    }
}

fn lenient_coord<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64().map_or(0.0, non_negative))
}

#[allow(clippy::cast_possible_truncation)]
fn lenient_z_index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .or_else(|| value.as_f64().filter(|z| z.is_finite()).map(|z| z.round() as i64))
        .unwrap_or(0))
}

// =============================================================================
// DRAFT / PATCH
// =============================================================================

/// An element that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDraft {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: i64,
    pub props: ElementProps,
    pub style: OpenMap,
}

impl ElementDraft {
    /// Draft with explicit geometry and properties, z-index 0.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64, props: ElementProps) -> Self {
        Self { x, y, width, height, z_index: 0, props, style: OpenMap::new() }
    }

    /// Palette default for `kind`: placed at (50, 50) with a kind-specific size.
    #[must_use]
    pub fn for_kind(kind: ElementKind) -> Self {
        let (width, height) = match kind {
            ElementKind::Line => (200.0, 2.0),
            ElementKind::Rectangle => (100.0, 60.0),
            ElementKind::Qrcode => (80.0, 80.0),
            ElementKind::Text | ElementKind::Barcode | ElementKind::Image => (150.0, 40.0),
        };
        Self { z_index: 1, ..Self::new(50.0, 50.0, width, height, ElementProps::editor_default(kind)) }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.props.kind()
    }

    /// Materialise the draft under `id`, clamping geometry to be non-negative.
    #[must_use]
    pub fn into_element(mut self, id: ElementId) -> Element {
        self.props.shed_shadowed_extra();
        Element {
            id,
            x: non_negative(self.x),
            y: non_negative(self.y),
            width: non_negative(self.width),
            height: non_negative(self.height),
            z_index: self.z_index,
            props: self.props,
            style: self.style,
        }
    }
}

// =============================================================================
// PALETTE
// =============================================================================

/// Entries offered by the element palette. Several entries produce the same
/// element kind with different starter properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteItem {
    Text,
    /// Text bound to the `ProductName` field.
    DynamicText,
    Barcode,
    Qrcode,
    /// Barcode bound to the `Code` field.
    ProductCode,
    Image,
    /// Image placeholder for a logo.
    Logo,
    Rectangle,
    Line,
}

impl PaletteItem {
    /// Every entry, in palette order.
    pub const ALL: [PaletteItem; 9] = [
        PaletteItem::Text,
        PaletteItem::DynamicText,
        PaletteItem::Barcode,
        PaletteItem::Qrcode,
        PaletteItem::ProductCode,
        PaletteItem::Image,
        PaletteItem::Logo,
        PaletteItem::Rectangle,
        PaletteItem::Line,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::DynamicText => "dynamic-text",
            Self::Barcode => "barcode",
            Self::Qrcode => "qrcode",
            Self::ProductCode => "product-code",
            Self::Image => "image",
            Self::Logo => "logo",
            Self::Rectangle => "rectangle",
            Self::Line => "line",
        }
    }

    /// Human-readable palette label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Static Text",
            Self::DynamicText => "Dynamic Text",
            Self::Barcode => "Barcode",
            Self::Qrcode => "QR Code",
            Self::ProductCode => "Product Code",
            Self::Image => "Image Upload",
            Self::Logo => "Logo Placeholder",
            Self::Rectangle => "Rectangle",
            Self::Line => "Line/Divider",
        }
    }

    /// Kind of the element this entry creates.
    #[must_use]
    pub fn kind(self) -> ElementKind {
        match self {
            Self::Text | Self::DynamicText => ElementKind::Text,
            Self::Barcode | Self::ProductCode => ElementKind::Barcode,
            Self::Qrcode => ElementKind::Qrcode,
            Self::Image | Self::Logo => ElementKind::Image,
            Self::Rectangle => ElementKind::Rectangle,
            Self::Line => ElementKind::Line,
        }
    }

    /// Starter draft for this entry.
    #[must_use]
    pub fn draft(self) -> ElementDraft {
        let mut draft = ElementDraft::for_kind(self.kind());
        match (self, &mut draft.props) {
            (Self::DynamicText, ElementProps::Text(p)) => {
                p.content = Some("Dynamic Text".into());
                p.data_field = Some("ProductName".into());
            }
            (Self::ProductCode, ElementProps::Barcode(p)) => {
                p.data_field = Some("Code".into());
            }
            (Self::Logo, ElementProps::Image(p)) => {
                p.alt = Some("Logo".into());
            }
            _ => {}
        }
        draft
    }
}

impl fmt::Display for PaletteItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaletteItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|item| item.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown palette item: {s}"))
    }
}

impl From<ElementKind> for PaletteItem {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => Self::Text,
            ElementKind::Barcode => Self::Barcode,
            ElementKind::Qrcode => Self::Qrcode,
            ElementKind::Image => Self::Image,
            ElementKind::Rectangle => Self::Rectangle,
            ElementKind::Line => Self::Line,
        }
    }
}

impl From<&Element> for ElementDraft {
    fn from(el: &Element) -> Self {
        Self {
            x: el.x,
            y: el.y,
            width: el.width,
            height: el.height,
            z_index: el.z_index,
            props: el.props.clone(),
            style: el.style.clone(),
        }
    }
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub z_index: Option<i64>,
    /// Replacement properties; must be of the element's kind.
    pub props: Option<ElementProps>,
    /// Replacement style map.
    pub style: Option<OpenMap>,
}

impl ElementPatch {
    /// Move to `(x, y)`.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    /// Resize to `width` × `height`.
    #[must_use]
    pub fn size(width: f64, height: f64) -> Self {
        Self { width: Some(width), height: Some(height), ..Self::default() }
    }

    #[must_use]
    pub fn z_index(z: i64) -> Self {
        Self { z_index: Some(z), ..Self::default() }
    }

    #[must_use]
    pub fn props(props: ElementProps) -> Self {
        Self { props: Some(props), ..Self::default() }
    }

    /// Returns `true` if the patch carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
