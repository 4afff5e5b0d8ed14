//! Document store: the ordered element collection and the selection cursor.

use crate::element::{AttributePatch, Element, ElementId, Position, Size, Variant};

/// The ordered collection of elements plus the current selection.
///
/// Order is paint order: later elements paint over earlier ones. Every
/// operation is total; targeting an id that is not in the document is a
/// silent no-op.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    selected: Option<ElementId>,
    revision: u64,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element of `variant` at canvas-local `(x, y)`.
    ///
    /// The element gets registry defaults, is appended on top of every
    /// other element and becomes the selection.
    pub fn create_element(&mut self, variant: Variant, x: f64, y: f64) -> ElementId {
        let element = Element::new(variant, Position::rounded(x, y));
        let id = element.id.clone();
        tracing::debug!("Created {variant} element {id} at ({x}, {y})");
        self.elements.push(element);
        self.selected = Some(id.clone());
        self.touch();
        id
    }

    /// Select `id`, or clear the selection when `id` is `None` or absent.
    pub fn select(&mut self, id: Option<ElementId>) {
        let next = id.filter(|id| self.contains(id));
        if next != self.selected {
            self.selected = next;
            self.touch();
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.select(None);
    }

    /// Move an element, rounding to the nearest integer position.
    pub fn move_element(&mut self, id: &ElementId, x: f64, y: f64) {
        let position = Position::rounded(x, y);
        let Some(element) = self.get_mut(id) else {
            return;
        };
        if element.position != position {
            element.position = position;
            self.touch();
        }
    }

    /// Replace an element's size verbatim.
    ///
    /// No minimum is applied here; interactive resizes are clamped by the
    /// gesture controller before they reach the store.
    pub fn resize_element(&mut self, id: &ElementId, width: u32, height: u32) {
        let size = Size::new(width, height);
        let Some(element) = self.get_mut(id) else {
            return;
        };
        if element.size != size {
            element.size = size;
            self.touch();
        }
    }

    /// Shallow-merge `patch` into an element's attributes.
    pub fn merge_attributes(&mut self, id: &ElementId, patch: AttributePatch) {
        let Some(element) = self.get_mut(id) else {
            return;
        };
        let before = element.kind.clone();
        let variant = element.variant();
        if !element.kind.merge(patch) {
            tracing::warn!(
                "Ignoring attribute patch of another variant for {variant} element {id}"
            );
            return;
        }
        if element.kind != before {
            self.touch();
        }
    }

    /// Remove an element, clearing the selection if it was selected.
    pub fn delete_element(&mut self, id: &ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        let removed = self.elements.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        tracing::debug!("Deleted element {id}");
        self.touch();
        Some(removed)
    }

    /// Copy of the element collection in paint order. Selection is excluded.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Element> {
        self.elements.clone()
    }

    /// Replace the entire collection and clear the selection.
    pub fn restore(&mut self, elements: Vec<Element>) {
        tracing::debug!("Restoring document with {} elements", elements.len());
        self.elements = elements;
        self.selected = None;
        self.touch();
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|element| &element.id == id)
    }

    /// Check whether an element with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// All elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The selected element ID, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// The selected element, if any.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Counter bumped by every mutation that changed something.
    ///
    /// Renderers compare it against the last value they drew.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|element| &element.id == id)
    }

    fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|element| &element.id == id)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
