//! Error types for playground operations.
//!
//! Document mutations are total and never fail; these errors only surface
//! from parsing untrusted input (variant tags, element ids, snapshots) and
//! from the snapshot store.

use thiserror::Error;

/// Result type for playground operations.
pub type PlaygroundResult<T> = Result<T, PlaygroundError>;

/// Errors that can occur in playground operations.
#[derive(Debug, Error)]
pub enum PlaygroundError {
    /// A variant tag did not name a known element variant.
    #[error("Invalid element variant: {0}")]
    InvalidVariant(String),

    /// An element id could not be parsed.
    #[error("Invalid element id: {0}")]
    InvalidElementId(String),

    /// A stored snapshot could not be decoded into an element collection.
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// The snapshot store rejected a read or write (e.g. quota exceeded).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem error from a file-backed snapshot store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization of a snapshot failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
