//! Sprite: the layer stack and its frames

use serde::{Deserialize, Serialize};

use super::image::Image;
use super::layer::{Cel, Layer};
use crate::error::{CelEditError, Result};
use crate::timeline::{FrameIndex, LayerIndex};

/// Canvas model of one animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    width: u32,
    height: u32,
    frame_count: u32,
    /// Bottom layer first.
    layers: Vec<Layer>,
}

impl Sprite {
    pub fn new(width: u32, height: u32, frame_count: u32) -> Self {
        Self {
            width,
            height,
            frame_count,
            layers: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Push a layer on top of the stack.
    pub fn add_layer(&mut self, layer: Layer) -> LayerIndex {
        self.layers.push(layer);
        LayerIndex(self.layers.len() - 1)
    }

    pub fn layers(&self) -> impl Iterator<Item = (LayerIndex, &Layer)> {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, layer)| (LayerIndex(i), layer))
    }

    pub fn layer_at(&self, index: LayerIndex) -> Option<&Layer> {
        self.layers.get(index.0)
    }

    /// Like [`Sprite::layer_at`] but a missing layer is an error.
    pub fn layer(&self, index: LayerIndex) -> Result<&Layer> {
        let layer_count = self.layers.len();
        self.layers
            .get(index.0)
            .ok_or(CelEditError::LayerOutOfRange { index, layer_count })
    }

    pub fn layer_mut(&mut self, index: LayerIndex) -> Result<&mut Layer> {
        let layer_count = self.layers.len();
        self.layers
            .get_mut(index.0)
            .ok_or(CelEditError::LayerOutOfRange { index, layer_count })
    }

    pub fn set_layer_editable(&mut self, index: LayerIndex, editable: bool) -> Result<()> {
        self.layer_mut(index)?.set_editable(editable);
        Ok(())
    }

    pub fn cel_at(&self, layer: LayerIndex, frame: FrameIndex) -> Option<&Cel> {
        self.layer_at(layer)?.cel_at(frame)
    }

    /// Attach `image` as the cel at (layer, frame), replacing any existing one.
    pub fn set_cel(&mut self, layer: LayerIndex, frame: FrameIndex, image: Image) -> Result<()> {
        if frame.0 >= self.frame_count {
            return Err(CelEditError::FrameOutOfRange {
                frame,
                frame_count: self.frame_count,
            });
        }
        let cels = self
            .layer_mut(layer)?
            .cels_mut()
            .ok_or(CelEditError::NotImageLayer { layer })?;
        cels.insert(frame, Cel::new(image));
        Ok(())
    }

    /// Mutable access to the image of an existing cel.
    pub fn cel_image_mut(&mut self, layer: LayerIndex, frame: FrameIndex) -> Result<&mut Image> {
        let target = self.layer_mut(layer)?;
        if !target.is_image() {
            return Err(CelEditError::NotImageLayer { layer });
        }
        target
            .cel_at_mut(frame)
            .map(|cel| &mut cel.image)
            .ok_or(CelEditError::CelNotFound { layer, frame })
    }

    /// Number of cels across all image layers.
    pub fn cel_count(&self) -> usize {
        self.layers
            .iter()
            .filter_map(|layer| layer.cels())
            .map(|cels| cels.len())
            .sum()
    }
}
