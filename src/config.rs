//! Editor configuration
//!
//! Loaded from a JSON file; every field has a default so partial files
//! are fine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CelEditError, Result};
use crate::state::DEFAULT_MAX_UNDO_LEVELS;
use crate::timeline::FrameOrder;

/// How long status-bar tips stay up, in milliseconds.
pub const DEFAULT_TIP_DURATION_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo steps kept per document.
    pub max_undo_levels: usize,

    /// Duration of transient status tips.
    pub tip_duration_ms: u32,

    /// Order in which batch commands visit the frames of a layer.
    pub frame_order: FrameOrder,

    /// Upper bound on pixel data one transaction may retain for undo.
    /// `None` means unlimited.
    pub max_undo_bytes: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_undo_levels: DEFAULT_MAX_UNDO_LEVELS,
            tip_duration_ms: DEFAULT_TIP_DURATION_MS,
            frame_order: FrameOrder::Descending,
            max_undo_bytes: None,
        }
    }
}

impl EditorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CelEditError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Like [`EditorConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
