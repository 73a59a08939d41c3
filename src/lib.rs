//! celedit - Undoable Cel Editing
//!
//! Batch edits over the cels of a raster animation sprite. A cel is the
//! pixel content one layer holds on one frame.
//!
//! # Architecture
//!
//! - `doc`: sprite, layers, cels and the on-disk document
//! - `timeline`: layer/frame indices and the selection range
//! - `state`: undo history and scoped transactions
//! - `commands`: command trait, context and the Clear Cel command
//! - `notify`: where user tips and refresh requests go

pub mod cli;
pub mod commands;
pub mod config;
pub mod doc;
pub mod error;
pub mod notify;
pub mod state;
pub mod timeline;

pub use commands::{clear_cels, ClearCelCommand, ClearReport, Command, Context};
pub use config::EditorConfig;
pub use doc::{Document, Image, Layer, Sprite};
pub use error::{CelEditError, Result};
pub use timeline::{CelFocus, FrameIndex, FrameOrder, LayerIndex, SelectionRange, Span};
