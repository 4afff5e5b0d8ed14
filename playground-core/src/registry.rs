//! Element registry: the default attributes and size of each variant, plus
//! the catalogues the attribute panel offers.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::element::{
    AttributePatch, ElementKind, ImageAttributes, ShapeAttributes, ShapePatch, Size,
    TextAttributes, Variant,
};
use crate::PlaygroundError;

/// Initial size of a text element.
pub const TEXT_SIZE: Size = Size::new(200, 50);

/// Initial size of image and shape elements.
pub const MEDIA_SIZE: Size = Size::new(150, 150);

/// Initial content of a text element.
pub const DEFAULT_TEXT_CONTENT: &str = "Edit this text";

/// Initial font family of a text element.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Initial font size of a text element, in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 16;

/// Initial source of an image element.
pub const DEFAULT_IMAGE_SRC: &str = "/placeholder.svg?height=150&width=150";

/// Font families offered by the attribute panel.
pub const FONT_FAMILIES: [&str; 5] = ["sans-serif", "serif", "monospace", "cursive", "fantasy"];

/// Font size range of the attribute panel slider. Not enforced by the store.
pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 8..=72;

/// Default attributes for a freshly created element of `variant`.
#[must_use]
pub fn default_kind(variant: Variant) -> ElementKind {
    match variant {
        Variant::Text => ElementKind::Text(TextAttributes {
            content: DEFAULT_TEXT_CONTENT.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            bold: false,
            italic: false,
            underline: false,
        }),
        Variant::Image => ElementKind::Image(ImageAttributes {
            src: DEFAULT_IMAGE_SRC.to_string(),
        }),
        Variant::Shape => ElementKind::Shape(ShapeAttributes {
            path: ShapePreset::Triangle.path().to_string(),
        }),
    }
}

/// Initial size for a freshly created element of `variant`.
#[must_use]
pub const fn default_size(variant: Variant) -> Size {
    match variant {
        Variant::Text => TEXT_SIZE,
        Variant::Image | Variant::Shape => MEDIA_SIZE,
    }
}

/// Canned shape outlines offered by the attribute panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapePreset {
    /// Upward-pointing triangle (the default shape).
    Triangle,
    /// Square filling the view box.
    Square,
    /// Circle inscribed in the view box.
    Circle,
}

impl ShapePreset {
    /// Every preset, in panel order.
    pub const ALL: [Self; 3] = [Self::Triangle, Self::Square, Self::Circle];

    /// SVG path data for this preset in the 150x150 view box.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Triangle => "M 75,0 L 150,150 L 0,150 Z",
            Self::Square => "M 0,0 L 150,0 L 150,150 L 0,150 Z",
            Self::Circle => "M 75,0 A 75,75 0 1,0 75,150 A 75,75 0 1,0 75,0 Z",
        }
    }

    /// Attribute patch that switches a shape element to this preset.
    #[must_use]
    pub fn patch(self) -> AttributePatch {
        AttributePatch::Shape(ShapePatch {
            path: Some(self.path().to_string()),
        })
    }
}

impl fmt::Display for ShapePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Triangle => "triangle",
            Self::Square => "square",
            Self::Circle => "circle",
        })
    }
}

impl FromStr for ShapePreset {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| PlaygroundError::InvalidVariant(format!("shape preset {s}")))
    }
}
