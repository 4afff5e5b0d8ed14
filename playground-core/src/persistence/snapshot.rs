//! Snapshot wire format.
//!
//! A snapshot is a JSON array of flat element records:
//!
//! ```json
//! [{"id":"…","type":"text","x":10,"y":10,"width":200,"height":50,
//!   "properties":{"content":"Edit this text","fontFamily":"sans-serif", …}}]
//! ```
//!
//! There is no version field. Decoding is all-or-nothing: one bad record
//! rejects the whole snapshot.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId, ElementKind, Position, Size, Variant};
use crate::{PlaygroundError, PlaygroundResult};

/// One element as stored in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Element identifier.
    pub id: String,
    /// Variant tag.
    #[serde(rename = "type")]
    pub variant: String,
    /// Left edge in canvas-local pixels.
    pub x: f64,
    /// Top edge in canvas-local pixels.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Variant-specific attributes.
    pub properties: serde_json::Value,
}

impl ElementRecord {
    /// Build a record from a runtime element.
    ///
    /// # Errors
    ///
    /// Returns [`PlaygroundError::Serialization`] if the attributes cannot be
    /// converted to JSON.
    pub fn from_element(element: &Element) -> PlaygroundResult<Self> {
        let properties = match &element.kind {
            ElementKind::Text(attrs) => serde_json::to_value(attrs)?,
            ElementKind::Image(attrs) => serde_json::to_value(attrs)?,
            ElementKind::Shape(attrs) => serde_json::to_value(attrs)?,
        };
        Ok(Self {
            id: element.id.to_string(),
            variant: element.variant().as_str().to_string(),
            x: f64::from(element.position.x),
            y: f64::from(element.position.y),
            width: f64::from(element.size.width),
            height: f64::from(element.size.height),
            properties,
        })
    }

    /// Convert the record to a runtime element.
    ///
    /// Fractional coordinates and sizes are rounded. Sizes are otherwise
    /// taken as stored; no minimum is applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the id, variant tag or properties are invalid.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // saturating casts
    pub fn into_element(self) -> PlaygroundResult<Element> {
        let id = ElementId::parse(&self.id)?;
        let variant: Variant = self.variant.parse()?;
        let kind = match variant {
            Variant::Text => ElementKind::Text(serde_json::from_value(self.properties)?),
            Variant::Image => ElementKind::Image(serde_json::from_value(self.properties)?),
            Variant::Shape => ElementKind::Shape(serde_json::from_value(self.properties)?),
        };
        Ok(Element {
            id,
            kind,
            position: Position::rounded(self.x, self.y),
            size: Size::new(self.width.round() as u32, self.height.round() as u32),
        })
    }
}

/// Serialize an element collection to snapshot JSON.
///
/// # Errors
///
/// Returns [`PlaygroundError::Serialization`] if serialization fails.
pub fn encode(elements: &[Element]) -> PlaygroundResult<String> {
    let records = elements
        .iter()
        .map(ElementRecord::from_element)
        .collect::<PlaygroundResult<Vec<_>>>()?;
    Ok(serde_json::to_string(&records)?)
}

/// Parse snapshot JSON into an element collection.
///
/// # Errors
///
/// Returns [`PlaygroundError::MalformedSnapshot`] if the JSON is invalid, any
/// record is invalid, or two records share an id.
pub fn decode(json: &str) -> PlaygroundResult<Vec<Element>> {
    let records: Vec<ElementRecord> =
        serde_json::from_str(json).map_err(|e| PlaygroundError::MalformedSnapshot(e.to_string()))?;

    let mut seen = HashSet::with_capacity(records.len());
    let mut elements = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let element = record
            .into_element()
            .map_err(|e| PlaygroundError::MalformedSnapshot(format!("element {index}: {e}")))?;
        if !seen.insert(element.id.clone()) {
            return Err(PlaygroundError::MalformedSnapshot(format!(
                "duplicate element id {}",
                element.id
            )));
        }
        elements.push(element);
    }
    Ok(elements)
}
