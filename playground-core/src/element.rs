//! Canvas elements - the objects a user places on the playground.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Rect;
use crate::{registry, PlaygroundError, PlaygroundResult};

/// Unique identifier for an element.
///
/// Ids are opaque strings. New elements get a UUID v4, but any non-empty
/// string is accepted so that snapshots written with other id schemes load
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Arc<str>);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string().into())
    }

    /// Parse an element ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`PlaygroundError::InvalidElementId`] if the string is empty.
    pub fn parse(s: &str) -> PlaygroundResult<Self> {
        if s.is_empty() {
            return Err(PlaygroundError::InvalidElementId("empty id".to_string()));
        }
        Ok(Self(s.into()))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ElementId {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The fixed kind of an element, determining its attribute shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Styled text block.
    Text,
    /// Image referenced by URL.
    Image,
    /// Vector shape described by SVG path data.
    Shape,
}

impl Variant {
    /// Every variant, in palette order.
    pub const ALL: [Self; 3] = [Self::Text, Self::Image, Self::Shape];

    /// The lowercase tag used on the wire and in the palette.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Shape => "shape",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            "shape" => Ok(Self::Shape),
            other => Err(PlaygroundError::InvalidVariant(other.to_string())),
        }
    }
}

/// Attributes of a text element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct TextAttributes {
    /// Text content.
    pub content: String,
    /// CSS font family.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: u32,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
    /// Underline decoration.
    pub underline: bool,
}

/// Attributes of an image element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttributes {
    /// Image source URL.
    pub src: String,
}

/// Attributes of a shape element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeAttributes {
    /// SVG path data, drawn in a 150x150 view box.
    pub path: String,
}

/// Variant-specific attributes of an element.
///
/// The store treats these as opaque: it stores and merges them but assigns
/// no meaning to individual fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties", rename_all = "lowercase")]
pub enum ElementKind {
    /// A text element.
    Text(TextAttributes),
    /// An image element.
    Image(ImageAttributes),
    /// A shape element.
    Shape(ShapeAttributes),
}

impl ElementKind {
    /// The variant tag of these attributes.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Text(_) => Variant::Text,
            Self::Image(_) => Variant::Image,
            Self::Shape(_) => Variant::Shape,
        }
    }

    /// Shallow-merge a patch into these attributes.
    ///
    /// Fields present in the patch overwrite existing values; absent fields
    /// are preserved. Returns `false` without touching anything when the
    /// patch targets a different variant.
    pub fn merge(&mut self, patch: AttributePatch) -> bool {
        match (self, patch) {
            (Self::Text(attrs), AttributePatch::Text(p)) => {
                merge_field(&mut attrs.content, p.content);
                merge_field(&mut attrs.font_family, p.font_family);
                merge_field(&mut attrs.font_size, p.font_size);
                merge_field(&mut attrs.bold, p.bold);
                merge_field(&mut attrs.italic, p.italic);
                merge_field(&mut attrs.underline, p.underline);
                true
            }
            (Self::Image(attrs), AttributePatch::Image(p)) => {
                merge_field(&mut attrs.src, p.src);
                true
            }
            (Self::Shape(attrs), AttributePatch::Shape(p)) => {
                merge_field(&mut attrs.path, p.path);
                true
            }
            _ => false,
        }
    }
}

fn merge_field<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Partial update for [`TextAttributes`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextPatch {
    /// New text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New font family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// New font size in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// New bold flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// New italic flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    /// New underline flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
}

/// Partial update for [`ImageAttributes`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePatch {
    /// New image source URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

/// Partial update for [`ShapeAttributes`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapePatch {
    /// New SVG path data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// A partial attribute mapping, keyed by the variant it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties", rename_all = "lowercase")]
pub enum AttributePatch {
    /// Patch for a text element.
    Text(TextPatch),
    /// Patch for an image element.
    Image(ImagePatch),
    /// Patch for a shape element.
    Shape(ShapePatch),
}

impl AttributePatch {
    /// The variant this patch applies to.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Text(_) => Variant::Text,
            Self::Image(_) => Variant::Image,
            Self::Shape(_) => Variant::Shape,
        }
    }

    /// Parse a bare JSON properties object as a patch for `variant`.
    ///
    /// This is the shape the attribute panel emits, e.g. `{"bold": true}`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaygroundError::Serialization`] if the object does not fit
    /// the variant's patch shape.
    pub fn from_json(variant: Variant, json: &str) -> PlaygroundResult<Self> {
        Ok(match variant {
            Variant::Text => Self::Text(serde_json::from_str(json)?),
            Variant::Image => Self::Image(serde_json::from_str(json)?),
            Variant::Shape => Self::Shape(serde_json::from_str(json)?),
        })
    }
}

/// Position in canvas-local coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Pixels from the canvas left edge.
    pub x: i32,
    /// Pixels from the canvas top edge.
    pub y: i32,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Round fractional coordinates to the nearest integer position.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // saturating cast, canvas coordinates fit i32
    pub fn rounded(x: f64, y: f64) -> Self {
        Self {
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }
}

/// Element dimensions in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One placed object on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Unique identifier, immutable after creation.
    pub id: ElementId,
    /// Variant-specific attributes.
    pub kind: ElementKind,
    /// Top-left corner in canvas-local coordinates.
    pub position: Position,
    /// Width and height.
    pub size: Size,
}

impl Element {
    /// Create an element of `variant` at `position` with registry defaults.
    #[must_use]
    pub fn new(variant: Variant, position: Position) -> Self {
        Self {
            id: ElementId::new(),
            kind: registry::default_kind(variant),
            position,
            size: registry::default_size(variant),
        }
    }

    /// The element's variant.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.kind.variant()
    }

    /// Bounding box in canvas-local coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(
            f64::from(self.position.x),
            f64::from(self.position.y),
            f64::from(self.size.width),
            f64::from(self.size.height),
        )
    }
}
