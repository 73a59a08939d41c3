//! Document Container
//!
//! A document is a sprite plus its undo history. On disk it is a
//! directory:
//!
//! ```text
//! doc_dir/
//!   sprite.json          # manifest + layer stack + cels
//!   history/
//!     undo_stack.json
//!     redo_stack.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use super::sprite::Sprite;
use crate::error::{CelEditError, Result};
use crate::state::{UndoHistory, DEFAULT_MAX_UNDO_LEVELS};

/// Manifest file name inside the document directory.
pub const SPRITE_FILE: &str = "sprite.json";
/// History directory name inside the document directory.
pub const HISTORY_DIR: &str = "history";

#[derive(Debug, Serialize, Deserialize)]
struct DocumentManifest {
    name: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    #[serde(default)]
    read_only: bool,
    sprite: Sprite,
}

/// An open sprite with its undo history.
#[derive(Debug)]
pub struct Document {
    pub name: String,
    sprite: Sprite,
    history: UndoHistory,
    read_only: bool,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl Document {
    pub fn new(name: impl Into<String>, sprite: Sprite) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            sprite,
            history: UndoHistory::default(),
            read_only: false,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut UndoHistory {
        &mut self.history
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn mark_modified(&mut self) {
        self.modified_at = Utc::now();
    }

    /// Revert the last undo step.
    pub fn undo(&mut self) -> Result<String> {
        let entry = self.history.undo(&mut self.sprite)?;
        self.mark_modified();
        Ok(entry.label)
    }

    /// Re-apply the last undone step.
    pub fn redo(&mut self) -> Result<String> {
        let entry = self.history.redo(&mut self.sprite)?;
        self.mark_modified();
        Ok(entry.label)
    }

    /// Load a document directory.
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_with_undo_levels(dir, DEFAULT_MAX_UNDO_LEVELS)
    }

    /// Load a document directory, keeping at most `max_undo_levels` steps.
    pub fn load_with_undo_levels(dir: &Path, max_undo_levels: usize) -> Result<Self> {
        let manifest_path = dir.join(SPRITE_FILE);
        if !manifest_path.exists() {
            return Err(CelEditError::DocumentNotFound {
                path: dir.to_path_buf(),
            });
        }
        let content =
            fs::read_to_string(&manifest_path).map_err(|e| CelEditError::FileReadError {
                path: manifest_path.clone(),
                source: e,
            })?;
        let manifest: DocumentManifest = serde_json::from_str(&content)?;
        let history = UndoHistory::load(&history_dir(dir), max_undo_levels)?;

        info!(
            "Loaded document '{}' ({} layers, {} frames, {} undo steps)",
            manifest.name,
            manifest.sprite.layer_count(),
            manifest.sprite.frame_count(),
            history.undo_count()
        );

        Ok(Self {
            name: manifest.name,
            sprite: manifest.sprite,
            history,
            read_only: manifest.read_only,
            created_at: manifest.created_at,
            modified_at: manifest.modified_at,
        })
    }

    /// Write the sprite and its history into `dir`, creating it if needed.
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| CelEditError::FileWriteError {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let manifest = DocumentManifest {
            name: self.name.clone(),
            created_at: self.created_at,
            modified_at: self.modified_at,
            read_only: self.read_only,
            sprite: self.sprite.clone(),
        };
        let manifest_path = dir.join(SPRITE_FILE);
        let content = serde_json::to_string_pretty(&manifest)?;
        fs::write(&manifest_path, content).map_err(|e| CelEditError::FileWriteError {
            path: manifest_path,
            source: e,
        })?;

        self.history.save(&history_dir(dir))
    }
}

/// History directory of a document directory.
pub fn history_dir(dir: &Path) -> PathBuf {
    dir.join(HISTORY_DIR)
}
