//! Scoped undo transactions
//!
//! A [`Transaction`] holds the document's exclusive borrow for the whole
//! batch. Operations hit the sprite as soon as they are recorded. If the
//! transaction is dropped without [`Transaction::commit`], every recorded
//! operation is reverted last to first and no undo entry is created.

use log::{debug, info, warn};

use super::undo::{CelOperation, UndoEntry};
use crate::doc::{Document, Sprite};
use crate::error::{CelEditError, Result};
use crate::timeline::{FrameIndex, LayerIndex};

pub struct Transaction<'a> {
    document: &'a mut Document,
    label: String,
    operations: Vec<CelOperation>,
    /// Undo bytes recorded so far.
    bytes: usize,
    byte_limit: Option<usize>,
    committed: bool,
}

impl<'a> Transaction<'a> {
    /// Open a transaction labeled `label` in the undo history.
    pub fn begin(document: &'a mut Document, label: impl Into<String>) -> Self {
        let label = label.into();
        debug!("Begin transaction '{}'", label);
        Self {
            document,
            label,
            operations: Vec::new(),
            bytes: 0,
            byte_limit: None,
            committed: false,
        }
    }

    /// Fail any record that would push retained undo data past `limit` bytes.
    pub fn with_byte_limit(mut self, limit: Option<usize>) -> Self {
        self.byte_limit = limit;
        self
    }

    /// Read access to the model while the transaction is open.
    pub fn sprite(&self) -> &Sprite {
        self.document.sprite()
    }

    pub fn operations(&self) -> &[CelOperation] {
        &self.operations
    }

    /// Clear the cel at (layer, frame) and remember its old content.
    pub fn record_clear(&mut self, layer: LayerIndex, frame: FrameIndex) -> Result<()> {
        let image = self.document.sprite_mut().cel_image_mut(layer, frame)?;

        let needed_bytes = self.bytes + image.byte_size();
        if let Some(limit_bytes) = self.byte_limit {
            if needed_bytes > limit_bytes {
                return Err(CelEditError::UndoBudgetExceeded {
                    needed_bytes,
                    limit_bytes,
                });
            }
        }

        let previous = image.take_cleared();
        self.bytes = needed_bytes;
        self.operations.push(CelOperation::Clear {
            layer,
            frame,
            previous,
        });
        debug!("Cleared cel at layer {}, frame {}", layer, frame);
        Ok(())
    }

    /// Keep everything recorded as one undo step.
    pub fn commit(mut self) {
        let operations = std::mem::take(&mut self.operations);
        info!(
            "Commit transaction '{}' ({} operations, {} bytes)",
            self.label,
            operations.len(),
            self.bytes
        );
        let entry = UndoEntry::new(self.label.clone(), operations);
        self.document.history_mut().push(entry);
        self.document.mark_modified();
        self.committed = true;
    }

    fn rollback(&mut self) {
        if self.operations.is_empty() {
            return;
        }
        warn!(
            "Rolling back transaction '{}' ({} operations)",
            self.label,
            self.operations.len()
        );
        let sprite = self.document.sprite_mut();
        for op in self.operations.drain(..).rev() {
            if let Err(e) = op.revert(sprite) {
                warn!("Could not revert {:?}: {}", op.target(), e);
            }
        }
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.rollback();
        }
    }
}
