//! In-memory snapshot store.

use std::collections::HashMap;
use std::sync::RwLock;

use super::SnapshotStore;
use crate::{PlaygroundError, PlaygroundResult};

/// In-memory snapshot store for tests and ephemeral sessions.
///
/// An optional quota mimics the browser's storage limit.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slots: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemorySnapshotStore {
    /// Create an empty store without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects values longer than `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            slots: RwLock::default(),
            quota: Some(bytes),
        }
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn read(&self, key: &str) -> PlaygroundResult<Option<String>> {
        let slots = self
            .slots
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> PlaygroundResult<()> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(PlaygroundError::Storage(format!(
                    "quota exceeded: {} bytes > {quota}",
                    value.len()
                )));
            }
        }
        let mut slots = self
            .slots
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PlaygroundResult<()> {
        let mut slots = self
            .slots
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read() {
        let store = MemorySnapshotStore::new();
        assert_eq!(store.read("slot").expect("read"), None);
        store.write("slot", "[]").expect("write");
        assert_eq!(store.read("slot").expect("read").as_deref(), Some("[]"));
    }

    #[test]
    fn test_remove() {
        let store = MemorySnapshotStore::new();
        store.write("slot", "[]").expect("write");
        store.remove("slot").expect("remove");
        assert_eq!(store.read("slot").expect("read"), None);
    }

    #[test]
    fn test_quota_rejects_large_values() {
        let store = MemorySnapshotStore::with_quota(4);
        store.write("slot", "[]").expect("fits");
        let err = store.write("slot", "[1,2,3]").expect_err("over quota");
        assert!(matches!(err, PlaygroundError::Storage(_)));
        assert_eq!(store.read("slot").expect("read").as_deref(), Some("[]"));
    }
}
