//! Editor session: one document, one gesture controller and one snapshot
//! slot, owned together and passed explicitly to whoever drives them.

use crate::config::EditorConfig;
use crate::element::{AttributePatch, Element, ElementId, Variant};
use crate::geometry::{BoundsProvider, Point};
use crate::gesture::{GestureController, Propagation};
use crate::persistence::{LoadOutcome, Persistence, SnapshotStore};
use crate::{Document, InputEvent, PlaygroundResult};

/// A single editing session.
#[derive(Debug)]
pub struct Editor<S> {
    document: Document,
    gestures: GestureController,
    persistence: Persistence<S>,
}

impl<S: SnapshotStore> Editor<S> {
    /// Start a session over `store`.
    ///
    /// If `config.restore_on_startup` is set, the slot is loaded right away;
    /// a missing or broken snapshot leaves the document empty.
    #[must_use]
    pub fn new(config: &EditorConfig, store: S) -> Self {
        let mut editor = Self {
            document: Document::new(),
            gestures: GestureController::with_min_size(config.min_element_size),
            persistence: Persistence::with_key(store, config.storage_key.clone()),
        };
        if config.restore_on_startup {
            editor.persistence.restore_on_startup(&mut editor.document);
        }
        tracing::debug!(
            "Editor session started on slot {} with {} elements",
            editor.persistence.key(),
            editor.document.len()
        );
        editor
    }

    /// The document being edited.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the document, for hosts that edit it directly.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The gesture controller.
    #[must_use]
    pub const fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    /// The persistence adapter.
    #[must_use]
    pub const fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    /// Feed an input event through the gesture controller.
    pub fn handle_event<B: BoundsProvider + ?Sized>(
        &mut self,
        bounds: &B,
        event: &InputEvent,
    ) -> Propagation {
        self.gestures.process_event(&mut self.document, bounds, event)
    }

    /// Create an element from a palette drop at a viewport position.
    pub fn drop_element<B: BoundsProvider + ?Sized>(
        &mut self,
        bounds: &B,
        variant: Variant,
        position: Option<Point>,
    ) -> Option<ElementId> {
        self.gestures.drop_from_palette(&mut self.document, bounds, variant, position)
    }

    /// Apply the coalesced move for this animation frame.
    pub fn flush_frame(&mut self) -> bool {
        self.gestures.flush_frame(&mut self.document)
    }

    /// Check whether the host should schedule an animation frame.
    #[must_use]
    pub const fn needs_frame(&self) -> bool {
        self.gestures.needs_frame()
    }

    /// Delete an element, cancelling any gesture on it.
    pub fn delete_element(&mut self, id: &ElementId) {
        self.gestures.delete(&mut self.document, id);
    }

    /// Merge a panel edit into an element's attributes.
    pub fn edit_attributes(&mut self, id: &ElementId, patch: AttributePatch) {
        self.document.merge_attributes(id, patch);
    }

    /// Merge a panel edit given as a bare JSON properties object, such as
    /// `{"bold": true}`. The object is read against the element's own
    /// variant. An absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PlaygroundError::Serialization`] if the object does
    /// not fit the element's attribute shape.
    pub fn edit_attributes_json(&mut self, id: &ElementId, json: &str) -> PlaygroundResult<()> {
        let Some(variant) = self.document.get(id).map(Element::variant) else {
            tracing::debug!("Ignoring attribute edit for absent element {id}");
            return Ok(());
        };
        let patch = AttributePatch::from_json(variant, json)?;
        self.document.merge_attributes(id, patch);
        Ok(())
    }

    /// Apply a panel size edit. Panel input is not clamped.
    pub fn edit_size(&mut self, id: &ElementId, width: u32, height: u32) {
        self.document.resize_element(id, width, height);
    }

    /// Save the document to the slot. Returns the number of elements saved.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn save(&self) -> PlaygroundResult<usize> {
        self.persistence.save(&self.document)
    }

    /// Replace the document with the slot's snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or decoded; the document
    /// is unchanged in that case.
    pub fn load(&mut self) -> PlaygroundResult<LoadOutcome> {
        self.persistence.load(&mut self.document)
    }

    /// Remove the slot. The document in memory is kept.
    ///
    /// # Errors
    ///
    /// Returns a store error if the slot cannot be removed.
    pub fn clear_saved(&self) -> PlaygroundResult<()> {
        self.persistence.clear()
    }
}
