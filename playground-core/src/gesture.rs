//! Gesture controller: turns pointer and keyboard sequences into document
//! mutations.
//!
//! ```text
//!   Idle ──down on element──▶ Moving ──move──▶ pending write ──frame──▶ move_element
//!     │                          │
//!     └──down on resize handle──▶ Resizing ──move──▶ resize_element (unthrottled)
//!                                │
//!                 up ◀───────────┘   (transient state discarded)
//! ```
//!
//! At most one gesture is active at a time. Its anchor state lives here and
//! never in the [`Document`].

use crate::element::{ElementId, Size, Variant};
use crate::event::{HitTarget, InputEvent, PointerButton, PointerEvent, PointerPhase};
use crate::geometry::{BoundsProvider, Point};
use crate::Document;

/// Smallest width or height an interactive resize can produce.
pub const MIN_ELEMENT_SIZE: u32 = 50;

/// Key that deletes the current selection.
pub const DELETE_KEY: &str = "Delete";

/// Transient state of the active gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging an element by its body.
    Moving {
        /// Element being dragged.
        id: ElementId,
        /// Pointer offset from the element's top-left corner at gesture start.
        anchor: Point,
    },
    /// Dragging an element's bottom-right resize handle.
    Resizing {
        /// Element being resized.
        id: ElementId,
        /// Element size at gesture start.
        start_size: Size,
        /// Pointer position at gesture start.
        start_pointer: Point,
    },
}

impl GestureState {
    fn target(&self) -> Option<&ElementId> {
        match self {
            Self::Idle => None,
            Self::Moving { id, .. } | Self::Resizing { id, .. } => Some(id),
        }
    }
}

/// Whether an event should continue to the canvas's own handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Let the event bubble.
    Continue,
    /// An element consumed the event; the canvas must not see it.
    Stop,
}

/// Translates input events into [`Document`] mutations.
#[derive(Debug, Clone)]
pub struct GestureController {
    state: GestureState,
    pending_move: Option<(ElementId, Point)>,
    min_size: u32,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    /// Create an idle controller with the standard minimum element size.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_min_size(MIN_ELEMENT_SIZE)
    }

    /// Create an idle controller with a custom minimum resize bound.
    #[must_use]
    pub const fn with_min_size(min_size: u32) -> Self {
        Self {
            state: GestureState::Idle,
            pending_move: None,
            min_size,
        }
    }

    /// Current gesture state.
    #[must_use]
    pub const fn state(&self) -> &GestureState {
        &self.state
    }

    /// Check whether no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    /// Check whether a coalesced move is waiting for the next animation frame.
    #[must_use]
    pub const fn needs_frame(&self) -> bool {
        self.pending_move.is_some()
    }

    /// Dispatch any input event.
    pub fn process_event<B: BoundsProvider + ?Sized>(
        &mut self,
        doc: &mut Document,
        bounds: &B,
        event: &InputEvent,
    ) -> Propagation {
        match event {
            InputEvent::Pointer(pointer) => self.pointer(doc, bounds, pointer),
            InputEvent::Click { button, target, .. } => self.click(doc, target, *button),
            InputEvent::Key { key } => {
                self.key_down(doc, key);
                Propagation::Continue
            }
            InputEvent::PaletteDrop { variant, position } => {
                self.drop_from_palette(doc, bounds, *variant, *position);
                Propagation::Continue
            }
            InputEvent::AnimationFrame => {
                self.flush_frame(doc);
                Propagation::Continue
            }
        }
    }

    /// Create an element where a palette drag was released.
    ///
    /// `position` is converted to canvas-local coordinates using the canvas
    /// bounds as they are right now. A drop without a resolvable position,
    /// or released outside the canvas, is ignored.
    pub fn drop_from_palette<B: BoundsProvider + ?Sized>(
        &mut self,
        doc: &mut Document,
        bounds: &B,
        variant: Variant,
        position: Option<Point>,
    ) -> Option<ElementId> {
        let Some(position) = position else {
            tracing::debug!("Ignoring {variant} drop without a pointer offset");
            return None;
        };
        let Some(canvas) = bounds.canvas_bounds() else {
            tracing::debug!("Ignoring {variant} drop: canvas is not mounted");
            return None;
        };
        if !canvas.contains(position) {
            tracing::debug!("Ignoring {variant} drop outside the canvas");
            return None;
        }

        let local = position.offset_from(canvas.origin());
        doc.clear_selection();
        Some(doc.create_element(variant, local.x, local.y))
    }

    /// Handle a completed click.
    pub fn click(
        &mut self,
        doc: &mut Document,
        target: &HitTarget,
        button: PointerButton,
    ) -> Propagation {
        if button != PointerButton::Primary {
            return Propagation::Continue;
        }
        match target {
            HitTarget::Element(id) | HitTarget::ResizeHandle(id) => {
                doc.select(Some(id.clone()));
                Propagation::Stop
            }
            HitTarget::DeleteHandle(id) => {
                self.delete(doc, id);
                Propagation::Stop
            }
            HitTarget::Canvas => {
                doc.clear_selection();
                Propagation::Continue
            }
            HitTarget::Outside => Propagation::Continue,
        }
    }

    /// Handle a pointer event of any phase.
    pub fn pointer<B: BoundsProvider + ?Sized>(
        &mut self,
        doc: &mut Document,
        bounds: &B,
        event: &PointerEvent,
    ) -> Propagation {
        match event.phase {
            PointerPhase::Down => {
                self.pointer_down(doc, bounds, &event.target, event.position, event.button)
            }
            PointerPhase::Move => {
                self.pointer_move(doc, bounds, event.position);
                Propagation::Continue
            }
            PointerPhase::Up => {
                self.pointer_up();
                Propagation::Continue
            }
        }
    }

    /// Begin a move or resize gesture.
    ///
    /// Pressing on an element body selects it and starts a move. Pressing on
    /// a resize handle starts a resize, but only for the selected element,
    /// since the handle is not rendered otherwise. A move still queued from
    /// an earlier gesture is applied before the new gesture starts.
    pub fn pointer_down<B: BoundsProvider + ?Sized>(
        &mut self,
        doc: &mut Document,
        bounds: &B,
        target: &HitTarget,
        position: Point,
        button: PointerButton,
    ) -> Propagation {
        if button != PointerButton::Primary {
            return Propagation::Continue;
        }
        match target {
            HitTarget::Element(id) => {
                self.flush_frame(doc);
                doc.select(Some(id.clone()));
                if !doc.contains(id) {
                    return Propagation::Continue;
                }
                let Some(rect) = bounds.element_bounds(doc, id) else {
                    tracing::warn!("No bounding box for element {id}; move not started");
                    return Propagation::Stop;
                };
                self.state = GestureState::Moving {
                    id: id.clone(),
                    anchor: position.offset_from(rect.origin()),
                };
                tracing::debug!("Move gesture started on {id}");
                Propagation::Stop
            }
            HitTarget::ResizeHandle(id) => {
                let Some(element) = doc.selected_element().filter(|e| &e.id == id) else {
                    tracing::debug!("Ignoring resize handle of unselected element {id}");
                    return Propagation::Continue;
                };
                let start_size = element.size;
                self.flush_frame(doc);
                self.state = GestureState::Resizing {
                    id: id.clone(),
                    start_size,
                    start_pointer: position,
                };
                tracing::debug!("Resize gesture started on {id}");
                Propagation::Stop
            }
            HitTarget::DeleteHandle(_) => Propagation::Stop,
            HitTarget::Canvas | HitTarget::Outside => Propagation::Continue,
        }
    }

    /// Advance the active gesture to a new pointer position.
    ///
    /// Moves are queued for the next animation frame; resizes are applied
    /// immediately.
    pub fn pointer_move<B: BoundsProvider + ?Sized>(
        &mut self,
        doc: &mut Document,
        bounds: &B,
        position: Point,
    ) {
        match &self.state {
            GestureState::Idle => {}
            GestureState::Moving { id, anchor } => {
                let Some(parent) = bounds.parent_bounds(doc, id) else {
                    return;
                };
                let local = position.offset_from(parent.origin()).offset_from(*anchor);
                let target = Point::new(local.x.max(0.0), local.y.max(0.0));
                self.pending_move = Some((id.clone(), target));
            }
            GestureState::Resizing {
                id,
                start_size,
                start_pointer,
            } => {
                let delta = position.offset_from(*start_pointer);
                let width = self.clamp_dimension(start_size.width, delta.x);
                let height = self.clamp_dimension(start_size.height, delta.y);
                doc.resize_element(id, width, height);
            }
        }
    }

    /// End the active gesture.
    ///
    /// A move already queued for the next frame is still applied.
    pub fn pointer_up(&mut self) {
        if let Some(id) = self.state.target() {
            tracing::debug!("Gesture on {id} ended");
        }
        self.state = GestureState::Idle;
    }

    /// Handle a key press. `Delete` removes the current selection.
    pub fn key_down(&mut self, doc: &mut Document, key: &str) {
        if key != DELETE_KEY {
            return;
        }
        if let Some(id) = doc.selected().cloned() {
            self.delete(doc, &id);
        }
    }

    /// Apply the coalesced move, if any. Returns `true` if a write happened.
    pub fn flush_frame(&mut self, doc: &mut Document) -> bool {
        let Some((id, target)) = self.pending_move.take() else {
            return false;
        };
        doc.move_element(&id, target.x, target.y);
        true
    }

    /// Delete `id` and drop any gesture state that refers to it.
    pub fn delete(&mut self, doc: &mut Document, id: &ElementId) {
        doc.delete_element(id);
        if self.state.target() == Some(id) {
            self.state = GestureState::Idle;
        }
        if self.pending_move.as_ref().is_some_and(|(pending, _)| pending == id) {
            self.pending_move = None;
        }
    }

    // clamped to >= min_size before the cast
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn clamp_dimension(&self, start: u32, delta: f64) -> u32 {
        let min = f64::from(self.min_size);
        (f64::from(start) + delta).max(min).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{FixedCanvas, Rect};
    use crate::Position;

    const CANVAS: Rect = Rect::new(100.0, 50.0, 800.0, 600.0);

    fn setup(variant: Variant, x: f64, y: f64) -> (Document, ElementId) {
        let mut doc = Document::new();
        let id = doc.create_element(variant, x, y);
        (doc, id)
    }

    fn down(
        ctl: &mut GestureController,
        doc: &mut Document,
        target: HitTarget,
        x: f64,
        y: f64,
    ) -> Propagation {
        let bounds = FixedCanvas::new(CANVAS);
        ctl.pointer_down(doc, &bounds, &target, Point::new(x, y), PointerButton::Primary)
    }

    fn drag(ctl: &mut GestureController, doc: &mut Document, x: f64, y: f64) {
        let bounds = FixedCanvas::new(CANVAS);
        ctl.pointer_move(doc, &bounds, Point::new(x, y));
    }

    fn position(doc: &Document, id: &ElementId) -> Position {
        doc.get(id).map(|e| e.position).expect("element exists")
    }

    fn size(doc: &Document, id: &ElementId) -> Size {
        doc.get(id).map(|e| e.size).expect("element exists")
    }

    #[test]
    fn test_drop_converts_to_canvas_local() {
        let mut doc = Document::new();
        let mut ctl = GestureController::new();
        let bounds = FixedCanvas::new(CANVAS);

        let id = ctl
            .drop_from_palette(&mut doc, &bounds, Variant::Text, Some(Point::new(130.0, 90.0)))
            .expect("element created");
        assert_eq!(position(&doc, &id), Position::new(30, 40));
        assert_eq!(doc.selected(), Some(&id));
    }

    #[test]
    fn test_drop_without_offset_is_ignored() {
        let mut doc = Document::new();
        let mut ctl = GestureController::new();
        let bounds = FixedCanvas::new(CANVAS);

        assert!(ctl
            .drop_from_palette(&mut doc, &bounds, Variant::Shape, None)
            .is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_drop_outside_canvas_is_ignored() {
        let mut doc = Document::new();
        let mut ctl = GestureController::new();
        let bounds = FixedCanvas::new(CANVAS);

        let outside = Point::new(20.0, 300.0);
        assert!(ctl
            .drop_from_palette(&mut doc, &bounds, Variant::Image, Some(outside))
            .is_none());
        assert!(doc.is_empty());

        // edges count as inside
        let corner = Point::new(900.0, 650.0);
        let id = ctl
            .drop_from_palette(&mut doc, &bounds, Variant::Image, Some(corner))
            .expect("element created");
        assert_eq!(position(&doc, &id), Position::new(800, 600));
    }

    #[test]
    fn test_move_keeps_anchor_offset() {
        let (mut doc, id) = setup(Variant::Shape, 10.0, 10.0);
        let mut ctl = GestureController::new();

        // element sits at (110, 60) in viewport space; grab it 5px in
        let grabbed = down(&mut ctl, &mut doc, HitTarget::Element(id.clone()), 115.0, 65.0);
        assert_eq!(grabbed, Propagation::Stop);
        drag(&mut ctl, &mut doc, 215.0, 165.0);
        assert_eq!(position(&doc, &id), Position::new(10, 10), "write waits for a frame");
        assert!(ctl.needs_frame());

        assert!(ctl.flush_frame(&mut doc));
        assert_eq!(position(&doc, &id), Position::new(110, 110));
        assert!(!ctl.needs_frame());
    }

    #[test]
    fn test_move_coalesces_to_one_write_per_frame() {
        let (mut doc, id) = setup(Variant::Image, 0.0, 0.0);
        let mut ctl = GestureController::new();

        down(&mut ctl, &mut doc, HitTarget::Element(id.clone()), 100.0, 50.0);
        let revision = doc.revision();
        for step in 1..=10 {
            drag(&mut ctl, &mut doc, 100.0 + f64::from(step), 50.0);
        }
        assert_eq!(doc.revision(), revision);

        ctl.flush_frame(&mut doc);
        assert_eq!(position(&doc, &id), Position::new(10, 0));
        assert_eq!(doc.revision(), revision + 1);
        assert!(!ctl.flush_frame(&mut doc));
    }

    #[test]
    fn test_move_floors_at_zero() {
        let (mut doc, id) = setup(Variant::Shape, 20.0, 20.0);
        let mut ctl = GestureController::new();

        down(&mut ctl, &mut doc, HitTarget::Element(id.clone()), 130.0, 80.0);
        drag(&mut ctl, &mut doc, -400.0, -400.0);
        ctl.flush_frame(&mut doc);
        assert_eq!(position(&doc, &id), Position::new(0, 0));
    }

    #[test]
    fn test_pending_move_survives_pointer_up() {
        let (mut doc, id) = setup(Variant::Shape, 0.0, 0.0);
        let mut ctl = GestureController::new();

        down(&mut ctl, &mut doc, HitTarget::Element(id.clone()), 100.0, 50.0);
        drag(&mut ctl, &mut doc, 140.0, 70.0);
        ctl.pointer_up();
        assert!(ctl.is_idle());

        ctl.flush_frame(&mut doc);
        assert_eq!(position(&doc, &id), Position::new(40, 20));

        drag(&mut ctl, &mut doc, 500.0, 500.0);
        assert!(!ctl.needs_frame(), "no gesture after pointer up");
    }

    #[test]
    fn test_queued_move_applied_before_next_gesture() {
        let mut doc = Document::new();
        let a = doc.create_element(Variant::Shape, 0.0, 0.0);
        let b = doc.create_element(Variant::Shape, 300.0, 0.0);
        let mut ctl = GestureController::new();

        // drag A by (+100, +100) and release before any frame runs
        down(&mut ctl, &mut doc, HitTarget::Element(a.clone()), 110.0, 60.0);
        drag(&mut ctl, &mut doc, 210.0, 160.0);
        ctl.pointer_up();

        down(&mut ctl, &mut doc, HitTarget::Element(b.clone()), 410.0, 60.0);
        assert_eq!(position(&doc, &a), Position::new(100, 100));

        drag(&mut ctl, &mut doc, 420.0, 70.0);
        ctl.flush_frame(&mut doc);
        assert_eq!(position(&doc, &a), Position::new(100, 100));
        assert_eq!(position(&doc, &b), Position::new(310, 10));
    }

    #[test]
    fn test_queued_move_applied_before_resize() {
        let (mut doc, id) = setup(Variant::Image, 0.0, 0.0);
        let mut ctl = GestureController::new();

        down(&mut ctl, &mut doc, HitTarget::Element(id.clone()), 100.0, 50.0);
        drag(&mut ctl, &mut doc, 120.0, 70.0);
        ctl.pointer_up();

        down(&mut ctl, &mut doc, HitTarget::ResizeHandle(id.clone()), 270.0, 220.0);
        assert_eq!(position(&doc, &id), Position::new(20, 20));
        assert!(!ctl.needs_frame());
    }

    #[test]
    fn test_pointer_down_selects() {
        let mut doc = Document::new();
        let a = doc.create_element(Variant::Text, 0.0, 0.0);
        let b = doc.create_element(Variant::Text, 300.0, 0.0);
        assert_eq!(doc.selected(), Some(&b));

        let mut ctl = GestureController::new();
        down(&mut ctl, &mut doc, HitTarget::Element(a.clone()), 101.0, 51.0);
        assert_eq!(doc.selected(), Some(&a));
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let (mut doc, id) = setup(Variant::Text, 10.0, 10.0);
        let mut ctl = GestureController::new();

        down(&mut ctl, &mut doc, HitTarget::ResizeHandle(id.clone()), 310.0, 110.0);
        drag(&mut ctl, &mut doc, -190.0, -390.0);
        assert_eq!(size(&doc, &id), Size::new(50, 50));
    }

    #[test]
    fn test_resize_applies_without_frame() {
        let (mut doc, id) = setup(Variant::Image, 0.0, 0.0);
        let mut ctl = GestureController::new();

        down(&mut ctl, &mut doc, HitTarget::ResizeHandle(id.clone()), 250.0, 200.0);
        drag(&mut ctl, &mut doc, 275.0, 190.0);
        assert_eq!(size(&doc, &id), Size::new(175, 140));
        assert!(!ctl.needs_frame());

        ctl.pointer_up();
        drag(&mut ctl, &mut doc, 400.0, 400.0);
        assert_eq!(size(&doc, &id), Size::new(175, 140));
    }

    #[test]
    fn test_resize_handle_requires_selection() {
        let mut doc = Document::new();
        let a = doc.create_element(Variant::Shape, 0.0, 0.0);
        doc.create_element(Variant::Shape, 200.0, 0.0);

        let mut ctl = GestureController::new();
        assert_eq!(
            down(&mut ctl, &mut doc, HitTarget::ResizeHandle(a), 250.0, 200.0),
            Propagation::Continue
        );
        assert!(ctl.is_idle());
    }

    #[test]
    fn test_custom_min_size() {
        let (mut doc, id) = setup(Variant::Shape, 0.0, 0.0);
        let mut ctl = GestureController::with_min_size(80);

        down(&mut ctl, &mut doc, HitTarget::ResizeHandle(id.clone()), 250.0, 200.0);
        drag(&mut ctl, &mut doc, 0.0, 0.0);
        assert_eq!(size(&doc, &id), Size::new(80, 80));
    }

    #[test]
    fn test_click_element_then_canvas() {
        let (mut doc, id) = setup(Variant::Text, 0.0, 0.0);
        let mut ctl = GestureController::new();
        doc.clear_selection();

        let target = HitTarget::Element(id.clone());
        let on_element = ctl.click(&mut doc, &target, PointerButton::Primary);
        assert_eq!(on_element, Propagation::Stop);
        assert_eq!(doc.selected(), Some(&id));

        let on_canvas = ctl.click(&mut doc, &HitTarget::Canvas, PointerButton::Primary);
        assert_eq!(on_canvas, Propagation::Continue);
        assert_eq!(doc.selected(), None);
    }

    #[test]
    fn test_secondary_click_is_ignored() {
        let (mut doc, id) = setup(Variant::Text, 0.0, 0.0);
        let mut ctl = GestureController::new();
        ctl.click(&mut doc, &HitTarget::Canvas, PointerButton::Secondary);
        assert_eq!(doc.selected(), Some(&id));
    }

    #[test]
    fn test_delete_key_and_affordance_agree() {
        let (mut by_key, key_id) = setup(Variant::Shape, 0.0, 0.0);
        let mut ctl = GestureController::new();
        ctl.key_down(&mut by_key, DELETE_KEY);
        assert!(!by_key.contains(&key_id));
        assert_eq!(by_key.selected(), None);

        let (mut by_handle, handle_id) = setup(Variant::Shape, 0.0, 0.0);
        let target = HitTarget::DeleteHandle(handle_id.clone());
        ctl.click(&mut by_handle, &target, PointerButton::Primary);
        assert!(!by_handle.contains(&handle_id));
        assert_eq!(by_handle.selected(), None);
    }

    #[test]
    fn test_other_keys_do_nothing() {
        let (mut doc, id) = setup(Variant::Shape, 0.0, 0.0);
        let mut ctl = GestureController::new();
        ctl.key_down(&mut doc, "Backspace");
        assert!(doc.contains(&id));
    }

    #[test]
    fn test_delete_during_move_drops_gesture() {
        let (mut doc, id) = setup(Variant::Shape, 0.0, 0.0);
        let mut ctl = GestureController::new();

        down(&mut ctl, &mut doc, HitTarget::Element(id), 100.0, 50.0);
        drag(&mut ctl, &mut doc, 150.0, 80.0);
        ctl.key_down(&mut doc, DELETE_KEY);

        assert!(ctl.is_idle());
        assert!(!ctl.needs_frame());
        assert!(doc.is_empty());
    }
}
