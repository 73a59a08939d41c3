//! Timeline Module
//!
//! Layer and frame coordinates plus the rectangular selection range the
//! timeline hands to batch commands.

mod range;

pub use range::{FrameOrder, SelectionRange, Span};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a layer in the sprite's layer stack (0 = bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerIndex(pub usize);

/// A discrete frame in the animation timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameIndex(pub u32);

impl fmt::Display for LayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The single cel the editor is focused on when no range is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelFocus {
    pub layer: LayerIndex,
    pub frame: FrameIndex,
}

impl CelFocus {
    pub fn new(layer: LayerIndex, frame: FrameIndex) -> Self {
        Self { layer, frame }
    }
}
