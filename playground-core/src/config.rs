//! Editor session configuration.

use serde::{Deserialize, Serialize};

use crate::gesture::MIN_ELEMENT_SIZE;
use crate::persistence::DEFAULT_STORAGE_KEY;

/// Configuration for an [`crate::Editor`] session.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Snapshot slot name.
    pub storage_key: String,
    /// Smallest width or height an interactive resize can produce.
    pub min_element_size: u32,
    /// Load the snapshot slot when the session starts.
    pub restore_on_startup: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            min_element_size: MIN_ELEMENT_SIZE,
            restore_on_startup: true,
        }
    }
}

impl EditorConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different snapshot slot.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Use a different minimum resize bound.
    #[must_use]
    pub const fn with_min_element_size(mut self, size: u32) -> Self {
        self.min_element_size = size;
        self
    }

    /// Enable or disable the startup load.
    #[must_use]
    pub const fn with_restore_on_startup(mut self, restore: bool) -> Self {
        self.restore_on_startup = restore;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.storage_key, "playgroundState");
        assert_eq!(config.min_element_size, 50);
        assert!(config.restore_on_startup);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"storage_key":"scratch"}"#).expect("parse");
        assert_eq!(config.storage_key, "scratch");
        assert_eq!(config.min_element_size, MIN_ELEMENT_SIZE);
        assert!(config.restore_on_startup);
    }

    #[test]
    fn test_builders() {
        let config = EditorConfig::new()
            .with_storage_key("other")
            .with_min_element_size(10)
            .with_restore_on_startup(false);
        assert_eq!(config.storage_key, "other");
        assert_eq!(config.min_element_size, 10);
        assert!(!config.restore_on_startup);
    }
}
