//! Raster image storage for cels
//!
//! Pixels are packed RGBA, one `u32` per pixel, row-major. A pixel value
//! of zero is fully transparent.

use serde::{Deserialize, Serialize};

/// Fully transparent pixel.
pub const TRANSPARENT: u32 = 0;

/// A `width x height` RGBA image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Image {
    /// Create a fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    /// Create an image with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// True when no pixel is visible.
    pub fn is_empty(&self) -> bool {
        self.pixels.iter().all(|&p| p == TRANSPARENT)
    }

    /// Replace the content with transparent pixels of the same size and
    /// hand back the previous content.
    pub fn take_cleared(&mut self) -> Image {
        let blank = Image::new(self.width, self.height);
        std::mem::replace(self, blank)
    }

    /// Memory held by the pixel buffer.
    pub fn byte_size(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<u32>()
    }
}
