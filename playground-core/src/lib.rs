//! # Playground Core
//!
//! Scene document model and direct-manipulation controller for the
//! drag-and-drop playground editor. Compiles to WASM for the browser host.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              playground-core.wasm             │
//! ├───────────────────────────────────────────────┤
//! │  Element Registry   │  Gesture Controller     │
//! │  - Variant defaults │  - Move (frame-batched) │
//! │  - Panel catalogues │  - Resize (min 50px)    │
//! │                     │  - Click / Delete key   │
//! ├───────────────────────────────────────────────┤
//! │  Document Store     │  Persistence Adapter    │
//! │  - Elements         │  - Snapshot codec       │
//! │  - Selection        │  - Memory / file /      │
//! │  - Revision counter │    localStorage slots   │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! The presentation layer resolves DOM events into [`InputEvent`]s and
//! supplies bounding boxes through [`BoundsProvider`]; it never mutates the
//! [`Document`] except through the operations exposed here.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod persistence;
pub mod registry;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::EditorConfig;
pub use document::Document;
pub use editor::Editor;
pub use element::{
    AttributePatch, Element, ElementId, ElementKind, ImageAttributes, ImagePatch, Position,
    ShapeAttributes, ShapePatch, Size, TextAttributes, TextPatch, Variant,
};
pub use error::{PlaygroundError, PlaygroundResult};
pub use event::{HitTarget, InputEvent, PointerButton, PointerEvent, PointerPhase};
pub use geometry::{BoundsProvider, FixedCanvas, Point, Rect};
pub use gesture::{GestureController, GestureState, Propagation, DELETE_KEY, MIN_ELEMENT_SIZE};
pub use persistence::{
    FileSnapshotStore, LoadOutcome, MemorySnapshotStore, Persistence, SnapshotStore,
    DEFAULT_STORAGE_KEY,
};
pub use registry::ShapePreset;

/// Playground core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
