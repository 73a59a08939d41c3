//! Error handling for celedit
//!
//! Skipping a cel because its layer is locked is not an error and never
//! shows up here. These variants are the faults that abort an operation.

use std::path::PathBuf;

use thiserror::Error;

use crate::timeline::{FrameIndex, LayerIndex};

/// Result type alias for celedit operations
pub type Result<T> = std::result::Result<T, CelEditError>;

/// Main error type for celedit operations
#[derive(Error, Debug)]
pub enum CelEditError {
    // Canvas Errors
    #[error("Layer {index} does not exist (sprite has {layer_count} layers)")]
    LayerOutOfRange {
        index: LayerIndex,
        layer_count: usize,
    },

    #[error("Frame {frame} does not exist (sprite has {frame_count} frames)")]
    FrameOutOfRange { frame: FrameIndex, frame_count: u32 },

    #[error("No cel at layer {layer}, frame {frame}")]
    CelNotFound { layer: LayerIndex, frame: FrameIndex },

    #[error("Layer {layer} does not hold image content")]
    NotImageLayer { layer: LayerIndex },

    // Transaction Errors
    #[error("Undo budget exceeded: transaction needs {needed_bytes} bytes, limit is {limit_bytes}")]
    UndoBudgetExceeded {
        needed_bytes: usize,
        limit_bytes: usize,
    },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    // Command Errors
    #[error("Command '{command}' is not enabled in the current context")]
    CommandDisabled { command: &'static str },

    #[error("Invalid range '{input}': {reason}")]
    InvalidRange { input: String, reason: String },

    // File Errors
    #[error("Document already exists: {path}")]
    DocumentAlreadyExists { path: PathBuf },

    #[error("Document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization Errors
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CelEditError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            CelEditError::LayerOutOfRange { .. } => "LAYER_OUT_OF_RANGE",
            CelEditError::FrameOutOfRange { .. } => "FRAME_OUT_OF_RANGE",
            CelEditError::CelNotFound { .. } => "CEL_NOT_FOUND",
            CelEditError::NotImageLayer { .. } => "NOT_IMAGE_LAYER",
            CelEditError::UndoBudgetExceeded { .. } => "UNDO_BUDGET_EXCEEDED",
            CelEditError::NothingToUndo => "NOTHING_TO_UNDO",
            CelEditError::NothingToRedo => "NOTHING_TO_REDO",
            CelEditError::CommandDisabled { .. } => "COMMAND_DISABLED",
            CelEditError::InvalidRange { .. } => "INVALID_RANGE",
            CelEditError::DocumentAlreadyExists { .. } => "DOCUMENT_ALREADY_EXISTS",
            CelEditError::DocumentNotFound { .. } => "DOCUMENT_NOT_FOUND",
            CelEditError::FileReadError { .. } => "FILE_READ_ERROR",
            CelEditError::FileWriteError { .. } => "FILE_WRITE_ERROR",
            CelEditError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns true if the user can fix the cause and run the command again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CelEditError::LayerOutOfRange { .. }
                | CelEditError::FrameOutOfRange { .. }
                | CelEditError::UndoBudgetExceeded { .. }
                | CelEditError::CommandDisabled { .. }
                | CelEditError::InvalidRange { .. }
        )
    }

    /// Returns a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            CelEditError::LayerOutOfRange { .. } | CelEditError::FrameOutOfRange { .. } => {
                Some("Select a range inside the sprite's layers and frames.")
            }
            CelEditError::UndoBudgetExceeded { .. } => {
                Some("Select fewer cels or raise max_undo_bytes in the config.")
            }
            CelEditError::CommandDisabled { .. } => {
                Some("Open a document that is not read-only first.")
            }
            CelEditError::InvalidRange { .. } => Some("Ranges look like '2' or '0..3'."),
            CelEditError::NothingToUndo => Some("There are no actions to undo."),
            CelEditError::NothingToRedo => Some("There are no undone actions to redo."),
            CelEditError::DocumentNotFound { .. } => {
                Some("Create one first with 'celedit-cli new <path>'.")
            }
            _ => None,
        }
    }
}
