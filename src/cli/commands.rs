//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::info;

use crate::commands::{ClearCelCommand, Context};
use crate::config::EditorConfig;
use crate::doc::{Document, Image, Layer, LayerKind, Sprite, SPRITE_FILE};
use crate::error::{CelEditError, Result};
use crate::timeline::{CelFocus, FrameIndex, LayerIndex, SelectionRange, Span};

/// Options for `new`.
#[derive(Debug, Clone, Copy)]
pub struct NewDocumentOptions {
    pub width: u32,
    pub height: u32,
    pub frames: u32,
    pub image_layers: usize,
    pub group_layers: usize,
}

/// Opaque color for the sample content of (layer, frame).
fn sample_color(layer: usize, frame: u32) -> u32 {
    0xff00_0000 | ((layer as u32 & 0xff) << 16) | ((frame & 0xff) << 8) | 0x80
}

/// Create a new document directory whose image layers hold filled cels.
pub fn create_document(path: &Path, options: NewDocumentOptions) -> Result<()> {
    info!("Creating new document at: {}", path.display());

    if path.join(SPRITE_FILE).exists() {
        return Err(CelEditError::DocumentAlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let mut sprite = Sprite::new(options.width, options.height, options.frames);
    for i in 0..options.image_layers {
        let layer = sprite.add_layer(Layer::image(format!("Layer {}", i + 1)));
        for frame in 0..options.frames {
            let image = Image::filled(options.width, options.height, sample_color(i, frame));
            sprite.set_cel(layer, FrameIndex(frame), image)?;
        }
    }
    for i in 0..options.group_layers {
        sprite.add_layer(Layer::group(format!("Group {}", i + 1)));
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("untitled")
        .to_string();
    Document::new(name, sprite).save(path)?;

    println!("Document created: {}", path.display());
    Ok(())
}

/// Selection given on the command line for `clear-cel`.
#[derive(Debug, Clone, Default)]
pub struct ClearTarget<'a> {
    pub layers: Option<&'a str>,
    pub frames: Option<&'a str>,
    pub layer: Option<usize>,
    pub frame: Option<u32>,
}

impl ClearTarget<'_> {
    fn range(&self) -> Result<SelectionRange> {
        match (self.layers, self.frames) {
            (Some(layers), Some(frames)) => Ok(SelectionRange::enabled(
                layers.parse::<Span<LayerIndex>>()?,
                frames.parse::<Span<FrameIndex>>()?,
            )),
            (None, None) => Ok(SelectionRange::Disabled),
            (Some(text), None) | (None, Some(text)) => Err(CelEditError::InvalidRange {
                input: text.to_string(),
                reason: "--layers and --frames must be given together".to_string(),
            }),
        }
    }

    fn focus(&self) -> Option<CelFocus> {
        Some(CelFocus::new(LayerIndex(self.layer?), FrameIndex(self.frame?)))
    }
}

/// Clear the selected cels and save the document.
pub fn clear_cel(path: &Path, target: &ClearTarget<'_>, config: &EditorConfig) -> Result<()> {
    info!("Clearing cels in: {}", path.display());

    let document = Document::load_with_undo_levels(path, config.max_undo_levels)?;
    let mut context = Context::new(config.clone()).with_document(document);
    context.set_range(target.range()?);
    context.set_focus(target.focus());

    let report = ClearCelCommand::new().run(&mut context)?;

    if let Some(document) = context.close() {
        document.save(path)?;
    }

    println!("Cleared {} cel(s)", report.cleared);
    if report.skipped_locked {
        println!("Some cels were skipped: there are locked layers");
    }
    Ok(())
}

/// Lock or unlock a layer.
pub fn set_layer_editable(
    path: &Path,
    layer: usize,
    editable: bool,
    config: &EditorConfig,
) -> Result<()> {
    let mut document = Document::load_with_undo_levels(path, config.max_undo_levels)?;
    document
        .sprite_mut()
        .set_layer_editable(LayerIndex(layer), editable)?;
    document.mark_modified();
    document.save(path)?;

    let state = if editable { "unlocked" } else { "locked" };
    println!("Layer {} {}", layer, state);
    Ok(())
}

/// Undo the last action.
pub fn undo(path: &Path, config: &EditorConfig) -> Result<()> {
    info!("Undoing last action in: {}", path.display());

    let mut document = Document::load_with_undo_levels(path, config.max_undo_levels)?;
    let label = document.undo()?;
    document.save(path)?;

    println!("Undone: {}", label);
    Ok(())
}

/// Redo the last undone action.
pub fn redo(path: &Path, config: &EditorConfig) -> Result<()> {
    info!("Redoing last undone action in: {}", path.display());

    let mut document = Document::load_with_undo_levels(path, config.max_undo_levels)?;
    let label = document.redo()?;
    document.save(path)?;

    println!("Redone: {}", label);
    Ok(())
}

/// Show undo history.
pub fn show_history(path: &Path, config: &EditorConfig) -> Result<()> {
    let document = Document::load_with_undo_levels(path, config.max_undo_levels)?;
    let history = document.history();

    if !history.can_undo() && !history.can_redo() {
        println!("No actions in history.");
        return Ok(());
    }

    println!("Undo History:");
    println!("{:-<60}", "");
    for entry in history.entries() {
        println!(
            "    {}: {} [{} cels] ({})",
            entry.id,
            entry.label,
            entry.operations.len(),
            entry.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
    }
    println!(">>> current");
    for entry in history.redo_entries().iter().rev() {
        println!("    {}: {} (undone)", entry.id, entry.label);
    }
    println!("{:-<60}", "");
    println!(
        "Undo stack: {} | Redo stack: {}",
        history.undo_count(),
        history.redo_count()
    );
    Ok(())
}

/// Print the layer stack with one column per frame.
///
/// `#` filled cel, `.` empty cel, blank: no cel.
pub fn print_state(path: &Path, config: &EditorConfig) -> Result<()> {
    let document = Document::load_with_undo_levels(path, config.max_undo_levels)?;
    let sprite = document.sprite();

    println!(
        "{} ({}x{}, {} frames, read-only: {})",
        document.name,
        sprite.width(),
        sprite.height(),
        sprite.frame_count(),
        document.is_read_only()
    );

    for (index, layer) in sprite.layers().collect::<Vec<_>>().into_iter().rev() {
        let lock = if layer.is_editable() { ' ' } else { 'L' };
        let cells: String = match layer.kind() {
            LayerKind::Image { .. } => (0..sprite.frame_count())
                .map(|frame| match layer.cel_at(FrameIndex(frame)) {
                    Some(cel) if cel.is_empty() => '.',
                    Some(_) => '#',
                    None => ' ',
                })
                .collect(),
            LayerKind::Group => "(group)".to_string(),
        };
        println!("{:>3} {} {:<16} |{}|", index, lock, layer.name, cells);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UndoEntry;
    use tempfile::TempDir;

    fn options() -> NewDocumentOptions {
        NewDocumentOptions {
            width: 2,
            height: 2,
            frames: 3,
            image_layers: 2,
            group_layers: 1,
        }
    }

    #[test]
    fn test_create_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc");
        create_document(&path, options()).unwrap();

        let target = ClearTarget {
            layers: Some("0..2"),
            frames: Some("0..2"),
            ..ClearTarget::default()
        };
        clear_cel(&path, &target, &EditorConfig::default()).unwrap();

        let document = Document::load(&path).unwrap();
        assert_eq!(document.sprite().layer_count(), 3);
        assert!(document
            .sprite()
            .cel_at(LayerIndex(1), FrameIndex(2))
            .unwrap()
            .is_empty());
        assert_eq!(document.history().undo_count(), 1);
    }

    #[test]
    fn test_create_twice_fails() {
        let temp_dir = TempDir::new().unwrap();
        create_document(temp_dir.path(), options()).unwrap();
        let err = create_document(temp_dir.path(), options()).unwrap_err();
        assert_eq!(err.error_code(), "DOCUMENT_ALREADY_EXISTS");
    }

    #[test]
    fn test_locked_then_undo() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path();
        let config = EditorConfig::default();
        create_document(path, options()).unwrap();
        set_layer_editable(path, 0, false, &config).unwrap();

        let target = ClearTarget {
            layer: Some(0),
            frame: Some(1),
            ..ClearTarget::default()
        };
        clear_cel(path, &target, &config).unwrap();
        let document = Document::load(path).unwrap();
        assert!(!document
            .sprite()
            .cel_at(LayerIndex(0), FrameIndex(1))
            .unwrap()
            .is_empty());

        undo(path, &config).unwrap();
        redo(path, &config).unwrap();
        assert!(matches!(
            redo(path, &config),
            Err(CelEditError::NothingToRedo)
        ));
    }

    #[test]
    fn test_lock_keeps_configured_history_depth() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path();
        let config = EditorConfig {
            max_undo_levels: 100,
            ..EditorConfig::default()
        };
        create_document(path, options()).unwrap();

        let mut document = Document::load_with_undo_levels(path, config.max_undo_levels).unwrap();
        for i in 0..80 {
            document
                .history_mut()
                .push(UndoEntry::new(format!("Step {}", i), Vec::new()));
        }
        document.save(path).unwrap();

        set_layer_editable(path, 0, false, &config).unwrap();
        set_layer_editable(path, 0, true, &config).unwrap();
        show_history(path, &config).unwrap();
        print_state(path, &config).unwrap();

        let document = Document::load_with_undo_levels(path, config.max_undo_levels).unwrap();
        assert_eq!(document.history().undo_count(), 80);
        assert_eq!(document.history().entries()[0].label, "Step 0");
        assert!(document
            .sprite()
            .layer(LayerIndex(0))
            .unwrap()
            .is_editable());
    }

    #[test]
    fn test_half_range_rejected() {
        let target = ClearTarget {
            layers: Some("0..1"),
            ..ClearTarget::default()
        };
        assert_eq!(target.range().unwrap_err().error_code(), "INVALID_RANGE");
    }
}
