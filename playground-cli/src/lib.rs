//! # Playground CLI
//!
//! Native host for the playground editor. The scene lives in a snapshot
//! slot on disk (`<data-dir>/<key>.json`) in the same format the browser
//! editor keeps in `localStorage`.
//!
//! ## Usage
//!
//! ```bash
//! playground add text 10 10
//! playground list
//! playground set <id> '{"bold": true}'
//! playground replay gestures.json --width 1280 --height 720
//! ```
//!
//! Every mutating command loads the slot, applies the change and saves.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use playground_core::{
    AttributePatch, Editor, EditorConfig, ElementId, FileSnapshotStore, FixedCanvas, InputEvent,
    LoadOutcome, SnapshotStore, Variant, DEFAULT_STORAGE_KEY,
};

/// Command-line arguments for the playground host.
#[derive(Debug, Clone, Parser)]
#[command(name = "playground")]
#[command(about = "Drag-and-drop playground editor, native host")]
#[command(version)]
pub struct CliArgs {
    /// Directory holding snapshot slots
    #[arg(long, env = "PLAYGROUND_DATA_DIR", default_value = ".playground")]
    pub data_dir: PathBuf,

    /// Snapshot slot name
    #[arg(long, env = "PLAYGROUND_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY)]
    pub key: String,

    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Operations on the saved scene.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print every element in paint order
    List,
    /// Create an element at canvas-local coordinates
    #[command(allow_negative_numbers = true)]
    Add {
        /// Element type: text, image or shape
        variant: Variant,
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
    },
    /// Move an element; negative coordinates are floored at 0 like a drag
    #[command(name = "move", allow_negative_numbers = true)]
    Move {
        /// Element id
        id: ElementId,
        /// New left edge
        x: f64,
        /// New top edge
        y: f64,
    },
    /// Set an element's size (not clamped)
    Resize {
        /// Element id
        id: ElementId,
        /// New width
        width: u32,
        /// New height
        height: u32,
    },
    /// Merge a JSON attribute patch into an element
    Set {
        /// Element id
        id: ElementId,
        /// Patch object, e.g. '{"fontSize": 24}'
        patch: String,
    },
    /// Delete an element
    Delete {
        /// Element id
        id: ElementId,
    },
    /// Feed a JSON array of input events through the gesture controller
    Replay {
        /// Script file
        script: PathBuf,
        /// Canvas width in pixels
        #[arg(long, default_value = "1280")]
        width: f64,
        /// Canvas height in pixels
        #[arg(long, default_value = "720")]
        height: f64,
    },
    /// Remove the saved slot
    Clear,
}

/// Host configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding snapshot slots.
    pub data_dir: PathBuf,
    /// Editor session settings.
    pub editor: EditorConfig,
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            data_dir: args.data_dir.clone(),
            // load explicitly so a broken slot is reported, not overwritten
            editor: EditorConfig::default()
                .with_storage_key(args.key.clone())
                .with_restore_on_startup(false),
        }
    }
}

/// Open the slot and run one command, writing results to `out`.
///
/// # Errors
///
/// Returns an error if the slot cannot be read or written, the snapshot is
/// malformed, an id does not exist, or input cannot be parsed.
pub fn run(config: &CliConfig, command: &Command, out: &mut impl Write) -> anyhow::Result<()> {
    let store = FileSnapshotStore::new(&config.data_dir)
        .with_context(|| format!("opening data directory {}", config.data_dir.display()))?;
    let mut editor = Editor::new(&config.editor, store);

    if !matches!(command, Command::Clear) {
        if let LoadOutcome::Restored { count } = editor
            .load()
            .with_context(|| format!("loading slot {}", config.editor.storage_key))?
        {
            tracing::debug!("Loaded {count} elements");
        }
    }

    match command {
        Command::List => {
            list(&editor, out)?;
            return Ok(());
        }
        Command::Add { variant, x, y } => {
            let id = editor.document_mut().create_element(*variant, *x, *y);
            writeln!(out, "{id}")?;
        }
        Command::Move { id, x, y } => {
            require(&editor, id)?;
            editor.document_mut().move_element(id, x.max(0.0), y.max(0.0));
        }
        Command::Resize { id, width, height } => {
            require(&editor, id)?;
            editor.edit_size(id, *width, *height);
        }
        Command::Set { id, patch } => {
            let variant = require(&editor, id)?;
            let patch = AttributePatch::from_json(variant, patch)
                .with_context(|| format!("invalid {variant} patch"))?;
            editor.edit_attributes(id, patch);
        }
        Command::Delete { id } => {
            require(&editor, id)?;
            editor.delete_element(id);
        }
        Command::Replay {
            script,
            width,
            height,
        } => {
            let json = std::fs::read_to_string(script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let events: Vec<InputEvent> =
                serde_json::from_str(&json).context("parsing input event script")?;
            let bounds = FixedCanvas::at_origin(*width, *height);
            for event in &events {
                editor.handle_event(&bounds, event);
            }
            editor.flush_frame();
            writeln!(out, "replayed {} events", events.len())?;
        }
        Command::Clear => {
            editor.clear_saved()?;
            writeln!(out, "cleared slot {}", config.editor.storage_key)?;
            return Ok(());
        }
    }

    let saved = editor.save()?;
    tracing::debug!("Saved {saved} elements");
    Ok(())
}

fn require<S: SnapshotStore>(editor: &Editor<S>, id: &ElementId) -> anyhow::Result<Variant> {
    match editor.document().get(id) {
        Some(element) => Ok(element.variant()),
        None => bail!("no element with id {id}"),
    }
}

fn list<S: SnapshotStore>(editor: &Editor<S>, out: &mut impl Write) -> anyhow::Result<()> {
    for element in editor.document().elements() {
        writeln!(
            out,
            "{}\t{}\t{},{}\t{}x{}",
            element.id,
            element.variant(),
            element.position.x,
            element.position.y,
            element.size.width,
            element.size.height
        )?;
    }
    Ok(())
}
