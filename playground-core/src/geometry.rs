//! Pointer-space geometry and the bounding-box capability the gesture
//! controller depends on.

use serde::{Deserialize, Serialize};

use crate::{Document, ElementId};

/// A point in pointer (viewport) space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn offset_from(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// An axis-aligned rectangle in pointer (viewport) space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Check whether `point` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// The same rectangle shifted by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Live bounding boxes of the canvas and its rendered elements.
///
/// Implemented by whatever renders the document: the DOM in the browser,
/// [`FixedCanvas`] for native hosts and tests. Rectangles must be in the
/// same space as the pointer positions fed to the controller, and must be
/// queried fresh each time since the canvas may scroll. The document being
/// rendered is passed in for providers that lay elements out themselves.
pub trait BoundsProvider {
    /// Bounding box of the canvas surface, if it is mounted.
    fn canvas_bounds(&self) -> Option<Rect>;

    /// Bounding box of a rendered element, if it is mounted.
    fn element_bounds(&self, doc: &Document, id: &ElementId) -> Option<Rect>;

    /// Bounding box of the element's parent. Elements are direct children
    /// of the canvas unless a provider says otherwise.
    fn parent_bounds(&self, _doc: &Document, _id: &ElementId) -> Option<Rect> {
        self.canvas_bounds()
    }
}

/// A canvas fixed at one viewport rectangle, with every element rendered
/// exactly at its document position and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCanvas {
    canvas: Rect,
}

impl FixedCanvas {
    /// Create a provider for a canvas occupying `canvas` in viewport space.
    #[must_use]
    pub const fn new(canvas: Rect) -> Self {
        Self { canvas }
    }

    /// A canvas whose origin coincides with the viewport origin.
    #[must_use]
    pub const fn at_origin(width: f64, height: f64) -> Self {
        Self::new(Rect::new(0.0, 0.0, width, height))
    }
}

impl BoundsProvider for FixedCanvas {
    fn canvas_bounds(&self) -> Option<Rect> {
        Some(self.canvas)
    }

    fn element_bounds(&self, doc: &Document, id: &ElementId) -> Option<Rect> {
        doc.get(id)
            .map(|element| element.bounds().translate(self.canvas.x, self.canvas.y))
    }
}
