//! Persistence adapter: saves the element collection to a single named
//! slot in a key-value snapshot store and restores it.

mod file;
mod memory;
pub mod snapshot;

pub use file::FileSnapshotStore;
pub use memory::MemorySnapshotStore;

use crate::{Document, PlaygroundResult};

/// Slot name used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "playgroundState";

/// A key-value store holding serialized snapshots.
///
/// Implementations can keep slots in memory, on disk, or in the browser's
/// `localStorage`. Calls are synchronous; the editor is single-threaded.
pub trait SnapshotStore {
    /// Read a slot. `Ok(None)` means nothing was ever saved there.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> PlaygroundResult<Option<String>>;

    /// Overwrite a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write (e.g. quota exceeded).
    fn write(&self, key: &str, value: &str) -> PlaygroundResult<()>;

    /// Remove a slot. Removing an empty slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be modified.
    fn remove(&self, key: &str) -> PlaygroundResult<()>;
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for &T {
    fn read(&self, key: &str) -> PlaygroundResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> PlaygroundResult<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> PlaygroundResult<()> {
        (**self).remove(key)
    }
}

/// Result of a successful [`Persistence::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The document was replaced by the stored snapshot.
    Restored {
        /// Number of elements restored.
        count: usize,
    },
    /// The slot is empty; the document was left untouched.
    NothingToLoad,
}

/// Saves and restores a [`Document`] through a [`SnapshotStore`].
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    key: String,
}

impl<S: SnapshotStore> Persistence<S> {
    /// Create an adapter using [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Create an adapter using a custom slot name.
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The slot name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Serialize the document's elements (not its selection) into the slot.
    ///
    /// Returns the number of elements saved.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the store rejects the write.
    pub fn save(&self, doc: &Document) -> PlaygroundResult<usize> {
        let json = snapshot::encode(doc.elements())?;
        self.store.write(&self.key, &json)?;
        tracing::info!("Saved {} elements to slot {}", doc.len(), self.key);
        Ok(doc.len())
    }

    /// Replace the document with the slot's snapshot.
    ///
    /// Loading is all-or-nothing: on any error the document is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PlaygroundError::MalformedSnapshot`] if the snapshot
    /// cannot be decoded, or a store error if the slot cannot be read.
    pub fn load(&self, doc: &mut Document) -> PlaygroundResult<LoadOutcome> {
        let Some(json) = self.store.read(&self.key)? else {
            tracing::info!("Nothing to load from slot {}", self.key);
            return Ok(LoadOutcome::NothingToLoad);
        };
        let elements = snapshot::decode(&json)?;
        let count = elements.len();
        doc.restore(elements);
        tracing::info!("Loaded {count} elements from slot {}", self.key);
        Ok(LoadOutcome::Restored { count })
    }

    /// Load the slot at session start without surfacing failures.
    ///
    /// Returns `true` if a snapshot was restored. A broken snapshot is logged
    /// and the document is left as it was.
    pub fn restore_on_startup(&self, doc: &mut Document) -> bool {
        match self.load(doc) {
            Ok(LoadOutcome::Restored { .. }) => true,
            Ok(LoadOutcome::NothingToLoad) => false,
            Err(e) => {
                tracing::warn!("Failed to restore saved state from slot {}: {e}", self.key);
                false
            }
        }
    }

    /// Check whether the slot holds a snapshot.
    ///
    /// # Errors
    ///
    /// Returns a store error if the slot cannot be read.
    pub fn has_snapshot(&self) -> PlaygroundResult<bool> {
        Ok(self.store.read(&self.key)?.is_some())
    }

    /// Remove the slot.
    ///
    /// # Errors
    ///
    /// Returns a store error if the slot cannot be removed.
    pub fn clear(&self) -> PlaygroundResult<()> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlaygroundError, Variant};

    #[test]
    fn test_save_then_load_in_fresh_session() {
        let store = MemorySnapshotStore::new();
        let persistence = Persistence::new(&store);

        let mut doc = Document::new();
        doc.create_element(Variant::Text, 10.0, 10.0);
        doc.create_element(Variant::Shape, 40.0, 80.0);
        assert_eq!(persistence.save(&doc).expect("save"), 2);

        let mut fresh = Document::new();
        let outcome = persistence.load(&mut fresh).expect("load");
        assert_eq!(outcome, LoadOutcome::Restored { count: 2 });
        assert_eq!(fresh.snapshot(), doc.snapshot());
        assert_eq!(fresh.selected(), None);
    }

    #[test]
    fn test_load_slot_written_by_browser_editor() {
        let store = MemorySnapshotStore::new();
        let saved = r#"[{"id":"V1StGXR8_Z5jdHi6B-myT","type":"text","x":10.5,"y":10,
            "width":200,"height":50,"properties":{"content":"Edit this text",
            "fontFamily":"sans-serif","fontSize":16,"bold":false,"italic":false,
            "underline":false}}]"#;
        store.write(DEFAULT_STORAGE_KEY, saved).expect("write");

        let mut doc = Document::new();
        let outcome = Persistence::new(&store).load(&mut doc).expect("load");
        assert_eq!(outcome, LoadOutcome::Restored { count: 1 });

        let id = crate::ElementId::parse("V1StGXR8_Z5jdHi6B-myT").expect("id");
        assert!(doc.contains(&id));
    }

    #[test]
    fn test_load_empty_slot_reports_nothing() {
        let persistence = Persistence::new(MemorySnapshotStore::new());
        let mut doc = Document::new();
        let revision = doc.revision();

        assert_eq!(persistence.load(&mut doc).expect("load"), LoadOutcome::NothingToLoad);
        assert!(doc.is_empty());
        assert_eq!(doc.revision(), revision);
    }

    #[test]
    fn test_malformed_snapshot_leaves_document_untouched() {
        let store = MemorySnapshotStore::new();
        store.write(DEFAULT_STORAGE_KEY, "[{\"id\":").expect("write");
        let persistence = Persistence::new(&store);

        let mut doc = Document::new();
        let id = doc.create_element(Variant::Image, 5.0, 5.0);
        let before = doc.snapshot();

        let err = persistence.load(&mut doc).expect_err("malformed");
        assert!(matches!(err, PlaygroundError::MalformedSnapshot(_)));
        assert_eq!(doc.snapshot(), before);
        assert_eq!(doc.selected(), Some(&id));
    }

    #[test]
    fn test_save_reports_quota_failure() {
        let persistence = Persistence::new(MemorySnapshotStore::with_quota(8));
        let mut doc = Document::new();
        doc.create_element(Variant::Text, 0.0, 0.0);
        assert!(matches!(persistence.save(&doc), Err(PlaygroundError::Storage(_))));
        assert!(!persistence.has_snapshot().expect("read"));
    }

    #[test]
    fn test_restore_on_startup_swallows_errors() {
        let store = MemorySnapshotStore::new();
        store.write("custom", "garbage").expect("write");
        let persistence = Persistence::with_key(&store, "custom");

        let mut doc = Document::new();
        assert!(!persistence.restore_on_startup(&mut doc));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_clear_removes_slot() {
        let persistence = Persistence::new(MemorySnapshotStore::new());
        persistence.save(&Document::new()).expect("save");
        assert!(persistence.has_snapshot().expect("read"));
        persistence.clear().expect("clear");
        assert!(!persistence.has_snapshot().expect("read"));
    }

    #[test]
    fn test_save_excludes_selection() {
        let store = MemorySnapshotStore::new();
        let persistence = Persistence::new(&store);
        let mut doc = Document::new();
        doc.create_element(Variant::Text, 0.0, 0.0);
        persistence.save(&doc).expect("save");

        let raw = store.read(DEFAULT_STORAGE_KEY).expect("read").expect("saved");
        assert!(!raw.contains("selected"));
    }
}
