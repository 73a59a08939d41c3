//! CLI Module
//!
//! Command-line interface for editing celedit documents.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// celedit - undoable cel editing for sprite documents
#[derive(Parser, Debug)]
#[command(name = "celedit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Editor config file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new document with filled cels
    #[command(name = "new")]
    New {
        /// Document directory to create
        path: PathBuf,

        /// Sprite width in pixels
        #[arg(long, default_value_t = 32)]
        width: u32,

        /// Sprite height in pixels
        #[arg(long, default_value_t = 32)]
        height: u32,

        /// Number of frames
        #[arg(long, default_value_t = 3)]
        frames: u32,

        /// Number of image layers
        #[arg(long, default_value_t = 2)]
        layers: usize,

        /// Number of group layers stacked on top
        #[arg(long, default_value_t = 0)]
        groups: usize,
    },

    /// Clear the cels of a layer x frame range, or of one focused cel
    #[command(name = "clear-cel")]
    ClearCel {
        /// Document directory
        path: PathBuf,

        /// Layer range, e.g. "0..2" (requires --frames)
        #[arg(long, requires = "frames")]
        layers: Option<String>,

        /// Frame range, e.g. "1..4" (requires --layers)
        #[arg(long, requires = "layers")]
        frames: Option<String>,

        /// Focused layer when no range is given
        #[arg(long, requires = "frame", conflicts_with = "layers")]
        layer: Option<usize>,

        /// Focused frame when no range is given
        #[arg(long, requires = "layer", conflicts_with = "frames")]
        frame: Option<u32>,
    },

    /// Lock a layer against edits
    #[command(name = "lock")]
    Lock {
        /// Document directory
        path: PathBuf,

        /// Layer index
        layer: usize,
    },

    /// Unlock a layer
    #[command(name = "unlock")]
    Unlock {
        /// Document directory
        path: PathBuf,

        /// Layer index
        layer: usize,
    },

    /// Undo the last action
    #[command(name = "undo")]
    Undo {
        /// Document directory
        path: PathBuf,
    },

    /// Redo the last undone action
    #[command(name = "redo")]
    Redo {
        /// Document directory
        path: PathBuf,
    },

    /// Show undo history
    #[command(name = "history")]
    History {
        /// Document directory
        path: PathBuf,
    },

    /// Print layers and cels
    #[command(name = "print-state")]
    PrintState {
        /// Document directory
        path: PathBuf,
    },
}
