//! Canvas Model Module
//!
//! - Image: packed RGBA pixel buffers
//! - Layer / Cel: the layer stack entries and their per-frame content
//! - Sprite: layers x frames
//! - Document: a sprite, its undo history and its on-disk form

mod document;
mod image;
mod layer;
mod sprite;

pub use document::{history_dir, Document, HISTORY_DIR, SPRITE_FILE};
pub use image::{Image, TRANSPARENT};
pub use layer::{Cel, Layer, LayerKind};
pub use sprite::Sprite;
