//! Undo/Redo History
//!
//! Each committed transaction becomes one [`UndoEntry`] holding the cel
//! operations it applied, in application order. Undo reverts them last
//! to first; redo applies them again first to last.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::doc::{Image, Sprite};
use crate::error::{CelEditError, Result};
use crate::timeline::{FrameIndex, LayerIndex};

/// Default maximum number of undo levels to keep.
pub const DEFAULT_MAX_UNDO_LEVELS: usize = 50;

/// File name for the undo stack persistence.
const UNDO_STACK_FILE: &str = "undo_stack.json";

/// File name for the redo stack persistence.
const REDO_STACK_FILE: &str = "redo_stack.json";

/// A reversible mutation of one cel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CelOperation {
    /// The cel's content was replaced by transparent pixels.
    Clear {
        layer: LayerIndex,
        frame: FrameIndex,
        previous: Image,
    },
}

impl CelOperation {
    pub fn target(&self) -> (LayerIndex, FrameIndex) {
        match self {
            CelOperation::Clear { layer, frame, .. } => (*layer, *frame),
        }
    }

    /// Undo bytes retained by this operation.
    pub fn byte_size(&self) -> usize {
        match self {
            CelOperation::Clear { previous, .. } => previous.byte_size(),
        }
    }

    /// Fails if the target cel no longer exists.
    pub fn check(&self, sprite: &Sprite) -> Result<()> {
        let (layer, frame) = self.target();
        sprite
            .cel_at(layer, frame)
            .map(|_| ())
            .ok_or(CelEditError::CelNotFound { layer, frame })
    }

    /// Put the cel back the way it was before the operation.
    pub fn revert(&self, sprite: &mut Sprite) -> Result<()> {
        match self {
            CelOperation::Clear {
                layer,
                frame,
                previous,
            } => {
                *sprite.cel_image_mut(*layer, *frame)? = previous.clone();
            }
        }
        Ok(())
    }

    /// Perform the operation again.
    pub fn apply(&self, sprite: &mut Sprite) -> Result<()> {
        match self {
            CelOperation::Clear { layer, frame, .. } => {
                sprite.cel_image_mut(*layer, *frame)?.take_cleared();
            }
        }
        Ok(())
    }
}

/// One undo step: everything a committed transaction did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoEntry {
    /// Unique identifier for this entry.
    pub id: String,

    /// Label shown in the history, e.g. "Clear Cel".
    pub label: String,

    /// When the transaction was committed.
    pub timestamp: DateTime<Utc>,

    /// Operations in the order they were applied.
    pub operations: Vec<CelOperation>,
}

impl UndoEntry {
    pub fn new(label: impl Into<String>, operations: Vec<CelOperation>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            timestamp: Utc::now(),
            operations,
        }
    }

    /// An entry that changed nothing.
    pub fn is_noop(&self) -> bool {
        self.operations.is_empty()
    }

    fn revert(&self, sprite: &mut Sprite) -> Result<()> {
        for op in &self.operations {
            op.check(sprite)?;
        }
        for op in self.operations.iter().rev() {
            op.revert(sprite)?;
        }
        Ok(())
    }

    fn apply(&self, sprite: &mut Sprite) -> Result<()> {
        for op in &self.operations {
            op.check(sprite)?;
        }
        for op in &self.operations {
            op.apply(sprite)?;
        }
        Ok(())
    }
}

/// Undo and redo stacks for one document.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    /// Stack of entries that can be undone.
    undo_stack: Vec<UndoEntry>,

    /// Stack of entries that can be redone.
    redo_stack: Vec<UndoEntry>,

    /// Maximum number of undo levels to keep.
    max_undo_levels: usize,

    /// IDs of entries dropped by trimming or clearing.
    discarded_entry_ids: Vec<String>,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNDO_LEVELS)
    }
}

impl UndoHistory {
    pub fn new(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo_levels: max_levels,
            discarded_entry_ids: Vec::new(),
        }
    }

    /// Load the stacks from `history_dir`. Missing files mean empty stacks.
    pub fn load(history_dir: &Path, max_levels: usize) -> Result<Self> {
        let undo_stack = read_stack(&history_dir.join(UNDO_STACK_FILE))?;
        let redo_stack = read_stack(&history_dir.join(REDO_STACK_FILE))?;

        let mut history = Self {
            undo_stack,
            redo_stack,
            max_undo_levels: max_levels,
            discarded_entry_ids: Vec::new(),
        };
        history.trim_history();
        Ok(history)
    }

    pub fn save(&self, history_dir: &Path) -> Result<()> {
        fs::create_dir_all(history_dir).map_err(|e| CelEditError::FileWriteError {
            path: history_dir.to_path_buf(),
            source: e,
        })?;
        write_stack(&history_dir.join(UNDO_STACK_FILE), &self.undo_stack)?;
        write_stack(&history_dir.join(REDO_STACK_FILE), &self.redo_stack)?;
        Ok(())
    }

    /// Push a committed entry. Clears the redo stack and trims.
    pub fn push(&mut self, entry: UndoEntry) {
        self.redo_stack.clear();
        self.undo_stack.push(entry);
        self.trim_history();
    }

    /// Revert the most recent entry on `sprite`.
    ///
    /// Returns the undone entry on success.
    pub fn undo(&mut self, sprite: &mut Sprite) -> Result<UndoEntry> {
        let entry = self.undo_stack.pop().ok_or(CelEditError::NothingToUndo)?;
        if let Err(e) = entry.revert(sprite) {
            self.undo_stack.push(entry);
            return Err(e);
        }
        info!("Undone: {} ({} cels)", entry.label, entry.operations.len());
        self.redo_stack.push(entry.clone());
        Ok(entry)
    }

    /// Re-apply the most recently undone entry on `sprite`.
    ///
    /// Returns the redone entry on success.
    pub fn redo(&mut self, sprite: &mut Sprite) -> Result<UndoEntry> {
        let entry = self.redo_stack.pop().ok_or(CelEditError::NothingToRedo)?;
        if let Err(e) = entry.apply(sprite) {
            self.redo_stack.push(entry);
            return Err(e);
        }
        info!("Redone: {} ({} cels)", entry.label, entry.operations.len());
        self.undo_stack.push(entry.clone());
        Ok(entry)
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn peek_undo(&self) -> Option<&UndoEntry> {
        self.undo_stack.last()
    }

    pub fn peek_redo(&self) -> Option<&UndoEntry> {
        self.redo_stack.last()
    }

    /// Undoable entries, oldest first.
    pub fn entries(&self) -> &[UndoEntry] {
        &self.undo_stack
    }

    /// Undone entries, most recently undone last.
    pub fn redo_entries(&self) -> &[UndoEntry] {
        &self.redo_stack
    }

    pub fn max_undo_levels(&self) -> usize {
        self.max_undo_levels
    }

    pub fn set_max_undo_levels(&mut self, max_levels: usize) {
        self.max_undo_levels = max_levels;
        self.trim_history();
    }

    pub fn discarded_entry_ids(&self) -> &[String] {
        &self.discarded_entry_ids
    }

    /// Drop the oldest entries beyond `max_undo_levels`.
    pub fn trim_history(&mut self) {
        if self.undo_stack.len() > self.max_undo_levels {
            let excess = self.undo_stack.len() - self.max_undo_levels;
            self.discarded_entry_ids
                .extend(self.undo_stack.drain(..excess).map(|entry| entry.id));
        }
    }

    pub fn clear(&mut self) {
        self.discarded_entry_ids.extend(
            self.undo_stack
                .drain(..)
                .chain(self.redo_stack.drain(..))
                .map(|entry| entry.id),
        );
    }
}

fn read_stack(path: &Path) -> Result<Vec<UndoEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(|e| CelEditError::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_str(&content)?)
}

fn write_stack(path: &Path, stack: &[UndoEntry]) -> Result<()> {
    let content = serde_json::to_string_pretty(stack)?;
    fs::write(path, content).map_err(|e| CelEditError::FileWriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Layer;
    use tempfile::TempDir;

    fn sprite_with_cel() -> Sprite {
        let mut sprite = Sprite::new(2, 2, 2);
        let layer = sprite.add_layer(Layer::image("Layer 1"));
        sprite
            .set_cel(layer, FrameIndex(0), Image::filled(2, 2, 0xabcd))
            .unwrap();
        sprite
    }

    fn clear_entry(sprite: &mut Sprite) -> UndoEntry {
        let previous = sprite
            .cel_image_mut(LayerIndex(0), FrameIndex(0))
            .unwrap()
            .take_cleared();
        UndoEntry::new(
            "Clear Cel",
            vec![CelOperation::Clear {
                layer: LayerIndex(0),
                frame: FrameIndex(0),
                previous,
            }],
        )
    }

    #[test]
    fn test_new_history() {
        let history = UndoHistory::new(10);
        assert_eq!(history.max_undo_levels(), 10);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_round() {
        let mut sprite = sprite_with_cel();
        let mut history = UndoHistory::default();
        let entry = clear_entry(&mut sprite);
        history.push(entry);

        assert!(sprite.cel_at(LayerIndex(0), FrameIndex(0)).unwrap().is_empty());

        let undone = history.undo(&mut sprite).unwrap();
        assert_eq!(undone.label, "Clear Cel");
        assert_eq!(
            sprite.cel_at(LayerIndex(0), FrameIndex(0)).unwrap().image,
            Image::filled(2, 2, 0xabcd)
        );
        assert_eq!(history.redo_count(), 1);

        history.redo(&mut sprite).unwrap();
        assert!(sprite.cel_at(LayerIndex(0), FrameIndex(0)).unwrap().is_empty());
        assert_eq!(history.undo_count(), 1);
    }

    #[test]
    fn test_nothing_to_undo() {
        let mut sprite = sprite_with_cel();
        let mut history = UndoHistory::default();
        assert!(matches!(
            history.undo(&mut sprite),
            Err(CelEditError::NothingToUndo)
        ));
        assert!(matches!(
            history.redo(&mut sprite),
            Err(CelEditError::NothingToRedo)
        ));
    }

    #[test]
    fn test_push_clears_redo_stack() {
        let mut sprite = sprite_with_cel();
        let mut history = UndoHistory::default();
        history.push(clear_entry(&mut sprite));
        history.undo(&mut sprite).unwrap();
        assert_eq!(history.redo_count(), 1);

        history.push(UndoEntry::new("Clear Cel", Vec::new()));
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn test_trim_history() {
        let mut history = UndoHistory::new(3);
        for i in 0..5 {
            history.push(UndoEntry::new(format!("Entry {}", i), Vec::new()));
        }

        assert_eq!(history.undo_count(), 3);
        assert_eq!(history.discarded_entry_ids().len(), 2);
        assert_eq!(history.entries()[0].label, "Entry 2");
    }

    #[test]
    fn test_clear_tracks_discarded() {
        let mut history = UndoHistory::new(10);
        for i in 0..3 {
            history.push(UndoEntry::new(format!("Entry {}", i), Vec::new()));
        }
        history.clear();

        assert_eq!(history.undo_count(), 0);
        assert_eq!(history.discarded_entry_ids().len(), 3);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let mut sprite = sprite_with_cel();

        let mut history = UndoHistory::new(10);
        history.push(clear_entry(&mut sprite));
        history.save(temp_dir.path()).unwrap();

        let loaded = UndoHistory::load(temp_dir.path(), 10).unwrap();
        assert_eq!(loaded.undo_count(), 1);
        assert_eq!(loaded.peek_undo().unwrap().operations.len(), 1);
        assert_eq!(loaded.redo_count(), 0);
    }
}
