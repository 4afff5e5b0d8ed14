//! WebAssembly bindings for the browser host.
//!
//! The page renders the document however it likes and forwards resolved
//! input events here as JSON. Bounding boxes are read from the live DOM on
//! every gesture step, and the snapshot slot lives in `localStorage`.

use wasm_bindgen::prelude::*;

use crate::{
    BoundsProvider, Document, Editor, EditorConfig, ElementId, InputEvent, LoadOutcome, Point,
    PlaygroundError, PlaygroundResult, Propagation, Rect, SnapshotStore, Variant,
};

/// Attribute carrying an element's id on its rendered node.
pub const ELEMENT_ID_ATTRIBUTE: &str = "data-element-id";

/// Initialize the playground WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(err: &PlaygroundError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn storage_error(context: &str, value: &JsValue) -> PlaygroundError {
    PlaygroundError::Storage(format!("{context}: {value:?}"))
}

/// Snapshot slots kept in the browser's `localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorageSnapshotStore {
    storage: web_sys::Storage,
}

impl LocalStorageSnapshotStore {
    /// Open the window's `localStorage`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaygroundError::Storage`] if there is no window or storage
    /// is disabled.
    pub fn open() -> PlaygroundResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| PlaygroundError::Storage("no window available".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| storage_error("localStorage unavailable", &e))?
            .ok_or_else(|| PlaygroundError::Storage("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl SnapshotStore for LocalStorageSnapshotStore {
    fn read(&self, key: &str) -> PlaygroundResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| storage_error("read failed", &e))
    }

    fn write(&self, key: &str, value: &str) -> PlaygroundResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| storage_error("write failed", &e))
    }

    fn remove(&self, key: &str) -> PlaygroundResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| storage_error("remove failed", &e))
    }
}

/// Bounding boxes read from the rendered DOM.
#[derive(Debug, Clone)]
pub struct DomBounds {
    canvas_id: String,
}

impl DomBounds {
    /// Track the canvas node with the given DOM id.
    #[must_use]
    pub fn new(canvas_id: impl Into<String>) -> Self {
        Self {
            canvas_id: canvas_id.into(),
        }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }
}

fn to_rect(rect: &web_sys::DomRect) -> Rect {
    Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
}

fn element_selector(id: &ElementId) -> String {
    let escaped = id.as_str().replace('\\', "\\\\").replace('"', "\\\"");
    format!("[{ELEMENT_ID_ATTRIBUTE}=\"{escaped}\"]")
}

impl BoundsProvider for DomBounds {
    fn canvas_bounds(&self) -> Option<Rect> {
        let node = Self::document()?.get_element_by_id(&self.canvas_id)?;
        Some(to_rect(&node.get_bounding_client_rect()))
    }

    fn element_bounds(&self, _doc: &Document, id: &ElementId) -> Option<Rect> {
        let node = Self::document()?
            .query_selector(&element_selector(id))
            .ok()
            .flatten()?;
        Some(to_rect(&node.get_bounding_client_rect()))
    }
}

/// Playground session exposed to JavaScript.
#[wasm_bindgen]
pub struct WasmPlayground {
    editor: Editor<LocalStorageSnapshotStore>,
    bounds: DomBounds,
}

#[wasm_bindgen]
impl WasmPlayground {
    /// Start a session over the canvas node `canvas_id`, restoring the
    /// saved slot if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if `localStorage` cannot be opened.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, storage_key: Option<String>) -> Result<WasmPlayground, JsValue> {
        let store = LocalStorageSnapshotStore::open().map_err(|e| js_error(&e))?;
        let mut config = EditorConfig::default();
        if let Some(key) = storage_key {
            config = config.with_storage_key(key);
        }
        Ok(Self {
            editor: Editor::new(&config, store),
            bounds: DomBounds::new(canvas_id),
        })
    }

    /// Handle a palette drop at viewport coordinates. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns an error if `variant` is not a known element type.
    #[wasm_bindgen(js_name = dropElement)]
    pub fn drop_element(
        &mut self,
        variant: &str,
        client_x: Option<f64>,
        client_y: Option<f64>,
    ) -> Result<Option<String>, JsValue> {
        let variant: Variant = variant.parse().map_err(|e| js_error(&e))?;
        let position = client_x.zip(client_y).map(|(x, y)| Point::new(x, y));
        Ok(self
            .editor
            .drop_element(&self.bounds, variant, position)
            .map(|id| id.to_string()))
    }

    /// Feed a JSON-encoded input event. Returns `true` if an element
    /// consumed it and propagation should stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the event JSON is invalid.
    #[wasm_bindgen(js_name = handleEvent)]
    pub fn handle_event(&mut self, json: &str) -> Result<bool, JsValue> {
        let event: InputEvent = serde_json::from_str(json)
            .map_err(|e| js_error(&PlaygroundError::Serialization(e)))?;
        Ok(self.editor.handle_event(&self.bounds, &event) == Propagation::Stop)
    }

    /// Handle a key press on the document.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) {
        self.editor.handle_event(&self.bounds, &InputEvent::key(key));
    }

    /// Apply the coalesced move. Call from `requestAnimationFrame`.
    #[wasm_bindgen(js_name = flushFrame)]
    pub fn flush_frame(&mut self) -> bool {
        self.editor.flush_frame()
    }

    /// Check whether a frame should be requested.
    #[wasm_bindgen(js_name = needsFrame)]
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.editor.needs_frame()
    }

    /// Merge a JSON attribute patch from the side panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the id or the patch is invalid.
    #[wasm_bindgen(js_name = editAttributes)]
    pub fn edit_attributes(&mut self, id: &str, patch_json: &str) -> Result<(), JsValue> {
        let id = ElementId::parse(id).map_err(|e| js_error(&e))?;
        self.editor
            .edit_attributes_json(&id, patch_json)
            .map_err(|e| js_error(&e))
    }

    /// Apply a size edit from the side panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is invalid.
    #[wasm_bindgen(js_name = editSize)]
    pub fn edit_size(&mut self, id: &str, width: u32, height: u32) -> Result<(), JsValue> {
        let id = ElementId::parse(id).map_err(|e| js_error(&e))?;
        self.editor.edit_size(&id, width, height);
        Ok(())
    }

    /// Delete an element.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is invalid.
    #[wasm_bindgen(js_name = deleteElement)]
    pub fn delete_element(&mut self, id: &str) -> Result<(), JsValue> {
        let id = ElementId::parse(id).map_err(|e| js_error(&e))?;
        self.editor.delete_element(&id);
        Ok(())
    }

    /// Save to `localStorage`. Returns the number of elements saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (e.g. quota exceeded).
    pub fn save(&self) -> Result<usize, JsValue> {
        self.editor.save().map_err(|e| js_error(&e))
    }

    /// Load from `localStorage`. Returns `false` if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is malformed; the document is kept.
    pub fn load(&mut self) -> Result<bool, JsValue> {
        match self.editor.load().map_err(|e| js_error(&e))? {
            LoadOutcome::Restored { .. } => Ok(true),
            LoadOutcome::NothingToLoad => Ok(false),
        }
    }

    /// The element list in snapshot format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[wasm_bindgen(js_name = getElementsJson)]
    pub fn get_elements_json(&self) -> Result<String, JsValue> {
        crate::persistence::snapshot::encode(self.editor.document().elements())
            .map_err(|e| js_error(&e))
    }

    /// Id of the selected element, if any.
    #[wasm_bindgen(js_name = selectedId)]
    #[must_use]
    pub fn selected_id(&self) -> Option<String> {
        self.editor.document().selected().map(|id| id.to_string())
    }

    /// Change counter; re-render when it moves.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.editor.document().revision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_selector_quotes_id() {
        let id = ElementId::new();
        assert_eq!(element_selector(&id), format!("[data-element-id=\"{id}\"]"));
    }

    #[test]
    fn element_selector_escapes_quotes() {
        let id = ElementId::parse(r#"a"b\c"#).expect("id");
        assert_eq!(element_selector(&id), r#"[data-element-id="a\"b\\c"]"#);
    }
}
