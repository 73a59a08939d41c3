//! Clear Cel
//!
//! Empties the content of every cel covered by the timeline selection, or
//! of the focused cel when no range is selected, as one undo step. Cels on
//! locked layers are left alone and reported back as a single flag.

use log::debug;

use super::context::Context;
use super::eligibility::Eligibility;
use super::{Command, CommandFlags};
use crate::config::EditorConfig;
use crate::doc::Document;
use crate::error::{CelEditError, Result};
use crate::state::Transaction;
use crate::timeline::{CelFocus, FrameIndex, LayerIndex, SelectionRange};

/// Undo history label of the command.
pub const CLEAR_CEL_LABEL: &str = "Clear Cel";

/// Tip shown when locked layers were skipped.
pub const LOCKED_LAYERS_TIP: &str = "There are locked layers";

/// Outcome of one clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Cels whose content was cleared.
    pub cleared: usize,
    /// At least one cel was skipped because its layer is locked.
    pub skipped_locked: bool,
}

impl ClearReport {
    fn visit(
        &mut self,
        transaction: &mut Transaction<'_>,
        eligibility: Eligibility,
        layer: LayerIndex,
        frame: FrameIndex,
    ) -> Result<()> {
        match eligibility {
            Eligibility::Editable => {
                transaction.record_clear(layer, frame)?;
                self.cleared += 1;
            }
            Eligibility::Locked => {
                debug!("Layer {} is locked, skipping frame {}", layer, frame);
                self.skipped_locked = true;
            }
        }
        Ok(())
    }
}

/// Clear every eligible cel of `range` (or `focus` when the range is
/// disabled) inside one "Clear Cel" transaction.
///
/// A range reaching past the last layer is an error. Any error rolls back
/// the cels already cleared and leaves the undo history untouched.
pub fn clear_cels(
    document: &mut Document,
    range: &SelectionRange,
    focus: Option<CelFocus>,
    config: &EditorConfig,
) -> Result<ClearReport> {
    let mut transaction =
        Transaction::begin(document, CLEAR_CEL_LABEL).with_byte_limit(config.max_undo_bytes);
    let mut report = ClearReport::default();

    match range {
        SelectionRange::Enabled { layers, frames } => {
            for layer_index in layers.iter() {
                let layer = transaction.sprite().layer(layer_index)?;
                if !layer.is_image() {
                    continue;
                }
                let eligibility = Eligibility::of(layer);
                let targets: Vec<FrameIndex> = frames
                    .iter(config.frame_order)
                    .filter(|&frame| layer.cel_at(frame).is_some())
                    .collect();

                for frame in targets {
                    report.visit(&mut transaction, eligibility, layer_index, frame)?;
                }
            }
        }
        SelectionRange::Disabled => {
            let target = focus.and_then(|focus| {
                let layer = transaction.sprite().layer_at(focus.layer)?;
                layer.cel_at(focus.frame)?;
                Some((focus, Eligibility::of(layer)))
            });
            if let Some((focus, eligibility)) = target {
                report.visit(&mut transaction, eligibility, focus.layer, focus.frame)?;
            }
        }
    }

    transaction.commit();
    Ok(report)
}

/// The "Clear Cel" editor command.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClearCelCommand;

impl ClearCelCommand {
    pub fn new() -> Self {
        Self
    }

    /// Execute and hand back the report.
    pub fn run(&self, context: &mut Context) -> Result<ClearReport> {
        let report = {
            let writer = context
                .writer()
                .ok_or(CelEditError::CommandDisabled { command: self.id() })?;
            clear_cels(writer.document, &writer.range, writer.focus, writer.config)?
        };

        if report.skipped_locked {
            let duration_ms = context.config().tip_duration_ms;
            context.show_tip(duration_ms, LOCKED_LAYERS_TIP);
        }
        context.update_screen_for_document();
        Ok(report)
    }
}

impl Command for ClearCelCommand {
    fn id(&self) -> &'static str {
        "ClearCel"
    }

    fn label(&self) -> &'static str {
        CLEAR_CEL_LABEL
    }

    fn flags(&self) -> CommandFlags {
        CommandFlags::RECORDABLE
    }

    fn is_enabled(&self, context: &Context) -> bool {
        context.check_flags(super::ContextFlags::ACTIVE_DOCUMENT_IS_WRITABLE)
    }

    fn execute(&self, context: &mut Context) -> Result<()> {
        self.run(context).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{Image, Layer, Sprite};
    use crate::state::CelOperation;
    use crate::timeline::{FrameOrder, Span};

    const INK: u32 = 0xff20_40ff;

    /// `layers` image layers (editable flags as given) x `frames` frames,
    /// every cel filled.
    fn document(editable: &[bool], frames: u32) -> Document {
        let mut sprite = Sprite::new(2, 2, frames);
        for (i, &is_editable) in editable.iter().enumerate() {
            let mut layer = Layer::image(format!("Layer {}", i));
            layer.set_editable(is_editable);
            let index = sprite.add_layer(layer);
            for frame in 0..frames {
                sprite
                    .set_cel(index, FrameIndex(frame), Image::filled(2, 2, INK))
                    .unwrap();
            }
        }
        Document::new("test", sprite)
    }

    fn range(layers: (usize, usize), frames: (u32, u32)) -> SelectionRange {
        SelectionRange::enabled(
            Span::new(LayerIndex(layers.0), LayerIndex(layers.1)),
            Span::new(FrameIndex(frames.0), FrameIndex(frames.1)),
        )
    }

    fn is_empty(doc: &Document, layer: usize, frame: u32) -> bool {
        doc.sprite()
            .cel_at(LayerIndex(layer), FrameIndex(frame))
            .unwrap()
            .is_empty()
    }

    #[test]
    fn test_range_with_locked_layer() {
        let mut doc = document(&[true, false], 3);
        let report =
            clear_cels(&mut doc, &range((0, 1), (0, 2)), None, &EditorConfig::default()).unwrap();

        assert_eq!(report.cleared, 3);
        assert!(report.skipped_locked);
        for frame in 0..3 {
            assert!(is_empty(&doc, 0, frame));
            assert!(!is_empty(&doc, 1, frame));
        }
        assert_eq!(doc.history().undo_count(), 1);
    }

    #[test]
    fn test_frames_visited_last_to_first() {
        let mut doc = document(&[true, true], 3);
        clear_cels(&mut doc, &range((0, 1), (0, 2)), None, &EditorConfig::default()).unwrap();

        let order: Vec<(usize, u32)> = doc
            .history()
            .peek_undo()
            .unwrap()
            .operations
            .iter()
            .map(|op| {
                let (layer, frame) = op.target();
                (layer.0, frame.0)
            })
            .collect();
        assert_eq!(order, vec![(0, 2), (0, 1), (0, 0), (1, 2), (1, 1), (1, 0)]);
    }

    #[test]
    fn test_ascending_frame_order_config() {
        let mut doc = document(&[true], 3);
        let config = EditorConfig {
            frame_order: FrameOrder::Ascending,
            ..EditorConfig::default()
        };
        clear_cels(&mut doc, &range((0, 0), (0, 2)), None, &config).unwrap();

        let frames: Vec<u32> = doc
            .history()
            .peek_undo()
            .unwrap()
            .operations
            .iter()
            .map(|op| op.target().1 .0)
            .collect();
        assert_eq!(frames, vec![0, 1, 2]);
    }

    #[test]
    fn test_cels_outside_range_untouched() {
        let mut doc = document(&[true, true, true], 4);
        clear_cels(&mut doc, &range((1, 2), (1, 2)), None, &EditorConfig::default()).unwrap();

        for layer in 0..3 {
            for frame in 0..4 {
                let inside = (1..=2).contains(&layer) && (1..=2).contains(&frame);
                assert_eq!(is_empty(&doc, layer, frame), inside, "layer {layer} frame {frame}");
            }
        }
    }

    #[test]
    fn test_missing_cels_skipped() {
        let mut sprite = Sprite::new(2, 2, 3);
        let layer = sprite.add_layer(Layer::image("Sparse"));
        sprite
            .set_cel(layer, FrameIndex(1), Image::filled(2, 2, INK))
            .unwrap();
        let mut doc = Document::new("sparse", sprite);

        let report =
            clear_cels(&mut doc, &range((0, 0), (0, 2)), None, &EditorConfig::default()).unwrap();
        assert_eq!(report.cleared, 1);
        assert!(!report.skipped_locked);
        assert_eq!(doc.sprite().cel_count(), 1);
    }

    #[test]
    fn test_group_layers_only() {
        let mut sprite = Sprite::new(2, 2, 2);
        sprite.add_layer(Layer::group("Group 1"));
        sprite.add_layer(Layer::group("Group 2"));
        let mut doc = Document::new("groups", sprite);
        let before = doc.sprite().clone();

        let report =
            clear_cels(&mut doc, &range((0, 1), (0, 1)), None, &EditorConfig::default()).unwrap();
        assert_eq!(report, ClearReport::default());
        assert_eq!(doc.sprite(), &before);
        assert_eq!(doc.history().undo_count(), 1);
        assert!(doc.history().peek_undo().unwrap().is_noop());
    }

    #[test]
    fn test_focus_fallback() {
        let mut doc = document(&[true, false], 2);
        let config = EditorConfig::default();

        let focus = CelFocus::new(LayerIndex(0), FrameIndex(1));
        let report = clear_cels(&mut doc, &SelectionRange::Disabled, Some(focus), &config).unwrap();
        assert_eq!(report.cleared, 1);
        assert!(!report.skipped_locked);
        assert!(is_empty(&doc, 0, 1));
        assert!(!is_empty(&doc, 0, 0));

        let focus = CelFocus::new(LayerIndex(1), FrameIndex(1));
        let report = clear_cels(&mut doc, &SelectionRange::Disabled, Some(focus), &config).unwrap();
        assert_eq!(report.cleared, 0);
        assert!(report.skipped_locked);
        assert!(!is_empty(&doc, 1, 1));
        assert_eq!(doc.history().undo_count(), 2);
    }

    #[test]
    fn test_no_focus_commits_empty_step() {
        let mut doc = document(&[true], 1);
        let report =
            clear_cels(&mut doc, &SelectionRange::Disabled, None, &EditorConfig::default())
                .unwrap();
        assert_eq!(report, ClearReport::default());
        assert_eq!(doc.history().undo_count(), 1);
    }

    #[test]
    fn test_clearing_empty_cel_is_noop() {
        let mut doc = document(&[true], 1);
        let config = EditorConfig::default();
        let focus = Some(CelFocus::new(LayerIndex(0), FrameIndex(0)));

        clear_cels(&mut doc, &SelectionRange::Disabled, focus, &config).unwrap();
        let after_first = doc.sprite().clone();
        let report = clear_cels(&mut doc, &SelectionRange::Disabled, focus, &config).unwrap();

        assert_eq!(report.cleared, 1);
        assert_eq!(doc.sprite(), &after_first);
        assert_eq!(doc.history().undo_count(), 2);
        match &doc.history().peek_undo().unwrap().operations[0] {
            CelOperation::Clear { previous, .. } => assert!(previous.is_empty()),
        }
    }

    #[test]
    fn test_layer_past_end_rolls_back() {
        let mut doc = document(&[true, true], 2);
        let before = doc.sprite().clone();

        let err = clear_cels(&mut doc, &range((0, 2), (0, 1)), None, &EditorConfig::default())
            .unwrap_err();
        assert!(matches!(err, CelEditError::LayerOutOfRange { .. }));
        assert_eq!(doc.sprite(), &before);
        assert_eq!(doc.history().undo_count(), 0);
    }

    #[test]
    fn test_byte_budget_rolls_back() {
        let mut doc = document(&[true, true], 3);
        let before = doc.sprite().clone();
        let config = EditorConfig {
            // Room for four 2x2 cels, the range holds six.
            max_undo_bytes: Some(64),
            ..EditorConfig::default()
        };

        let err = clear_cels(&mut doc, &range((0, 1), (0, 2)), None, &config).unwrap_err();
        assert_eq!(err.error_code(), "UNDO_BUDGET_EXCEEDED");
        assert_eq!(doc.sprite(), &before);
        assert_eq!(doc.history().undo_count(), 0);
    }

    #[test]
    fn test_command_enabled_only_for_writable_document() {
        let command = ClearCelCommand::new();
        let mut ctx = Context::new(EditorConfig::default());
        assert!(!command.is_enabled(&ctx));

        let mut doc = document(&[true], 1);
        doc.set_read_only(true);
        ctx.open(doc);
        assert!(!command.is_enabled(&ctx));
        assert!(matches!(
            command.execute(&mut ctx),
            Err(CelEditError::CommandDisabled { command: "ClearCel" })
        ));

        ctx.open(document(&[true], 1));
        assert!(command.is_enabled(&ctx));
        assert_eq!(command.label(), "Clear Cel");
        assert!(command.flags().contains(CommandFlags::RECORDABLE));
    }
}
