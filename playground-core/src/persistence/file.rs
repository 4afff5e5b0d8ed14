//! Filesystem snapshot store.

use std::path::{Path, PathBuf};

use super::SnapshotStore;
use crate::PlaygroundResult;

/// Snapshot store keeping each slot as `<key>.json` in a data directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    data_dir: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PlaygroundError::Io`] if the directory cannot be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> PlaygroundResult<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", sanitize_filename(key)))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read(&self, key: &str) -> PlaygroundResult<Option<String>> {
        let path = self.slot_path(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> PlaygroundResult<()> {
        std::fs::write(self.slot_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> PlaygroundResult<()> {
        let path = self.slot_path(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Sanitize a slot key for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_slot_reads_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileSnapshotStore::new(dir.path()).expect("store");
        assert_eq!(store.read("playgroundState").expect("read"), None);
    }

    #[test]
    fn test_write_creates_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileSnapshotStore::new(dir.path()).expect("store");
        store.write("playgroundState", "[]").expect("write");

        let path = dir.path().join("playgroundState.json");
        assert!(path.exists());
        assert_eq!(store.read("playgroundState").expect("read").as_deref(), Some("[]"));
    }

    #[test]
    fn test_nested_data_dir_is_created() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a").join("b");
        let store = FileSnapshotStore::new(&nested).expect("store");
        assert!(store.data_dir().is_dir());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileSnapshotStore::new(dir.path()).expect("store");
        store.write("slot", "[]").expect("write");
        store.remove("slot").expect("remove");
        store.remove("slot").expect("remove again");
        assert!(!store.slot_path("slot").exists());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("playgroundState"), "playgroundState");
        assert_eq!(sanitize_filename("with-dash"), "with-dash");
        assert_eq!(sanitize_filename("has/slash"), "has_slash");
        assert_eq!(sanitize_filename("../escape"), "___escape");
    }
}
