//! Input events for canvas interaction.
//!
//! The presentation layer resolves each raw DOM event to a [`HitTarget`]
//! before handing it to the gesture controller, so the controller never
//! touches node handles.

use serde::{Deserialize, Serialize};

use crate::{ElementId, Point, Variant};

/// Pointer button that produced an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    /// Main button (usually left).
    #[default]
    Primary,
    /// Secondary button (usually right).
    Secondary,
    /// Auxiliary button (usually wheel).
    Auxiliary,
}

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
}

/// What the pointer was over when the event fired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum HitTarget {
    /// The bare canvas surface, not one of its children.
    Canvas,
    /// The body of a rendered element.
    Element(ElementId),
    /// The bottom-right resize affordance of a selected element.
    ResizeHandle(ElementId),
    /// The delete affordance of a selected element.
    DeleteHandle(ElementId),
    /// Anything outside the canvas.
    #[default]
    Outside,
}

/// A pointer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// Pointer position in viewport space.
    pub position: Point,
    /// Button involved.
    #[serde(default)]
    pub button: PointerButton,
    /// Resolved target.
    #[serde(default)]
    pub target: HitTarget,
}

impl PointerEvent {
    /// Create a primary-button pointer event.
    #[must_use]
    pub const fn new(phase: PointerPhase, position: Point, target: HitTarget) -> Self {
        Self {
            phase,
            position,
            button: PointerButton::Primary,
            target,
        }
    }
}

/// All input events the gesture controller accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// Pointer down/move/up.
    Pointer(PointerEvent),

    /// A completed click.
    Click {
        /// Pointer position in viewport space.
        position: Point,
        /// Button clicked.
        #[serde(default)]
        button: PointerButton,
        /// Resolved target.
        target: HitTarget,
    },

    /// Key pressed.
    Key {
        /// DOM `KeyboardEvent.key` value.
        key: String,
    },

    /// A palette drag ended over the canvas.
    PaletteDrop {
        /// Variant carried by the palette item.
        variant: Variant,
        /// Release position in viewport space; `None` for synthetic or
        /// cancelled drops.
        position: Option<Point>,
    },

    /// The host's animation-frame callback fired.
    AnimationFrame,
}

impl InputEvent {
    /// Shorthand for a primary-button pointer event.
    #[must_use]
    pub const fn pointer(phase: PointerPhase, x: f64, y: f64, target: HitTarget) -> Self {
        Self::Pointer(PointerEvent::new(phase, Point::new(x, y), target))
    }

    /// Shorthand for a primary-button click.
    #[must_use]
    pub const fn click(x: f64, y: f64, target: HitTarget) -> Self {
        Self::Click {
            position: Point::new(x, y),
            button: PointerButton::Primary,
            target,
        }
    }

    /// Shorthand for a key press.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key { key: key.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_event_parses_with_defaults() {
        let json = r#"{"type":"Pointer","data":{"phase":"down",
            "position":{"x":5.0,"y":6.0},"target":{"kind":"canvas"}}}"#;
        let event: InputEvent = serde_json::from_str(json).expect("valid event");
        assert_eq!(
            event,
            InputEvent::pointer(PointerPhase::Down, 5.0, 6.0, HitTarget::Canvas)
        );
    }

    #[test]
    fn test_unit_events_parse() {
        let frame: InputEvent =
            serde_json::from_str(r#"{"type":"AnimationFrame"}"#).expect("frame");
        assert_eq!(frame, InputEvent::AnimationFrame);

        let json = r#"{"type":"PaletteDrop","data":{"variant":"text","position":null}}"#;
        let drop: InputEvent = serde_json::from_str(json).expect("drop");
        assert_eq!(
            drop,
            InputEvent::PaletteDrop {
                variant: Variant::Text,
                position: None
            }
        );
    }

    #[test]
    fn test_target_carries_opaque_id() {
        let target: HitTarget =
            serde_json::from_str(r#"{"kind":"resize_handle","id":"V1StGXR8_Z5jdHi6B-myT"}"#)
                .expect("target");
        let id = ElementId::parse("V1StGXR8_Z5jdHi6B-myT").expect("id");
        assert_eq!(target, HitTarget::ResizeHandle(id));
    }
}
