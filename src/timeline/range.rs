//! Selection Range
//!
//! A rectangular, inclusive region over (layer, frame) space, or nothing
//! at all when the timeline has no range selected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{FrameIndex, LayerIndex};
use crate::error::{CelEditError, Result};

/// Inclusive `begin..=end` span. `begin <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "SpanBounds<T>",
    bound(deserialize = "T: Deserialize<'de> + Copy + Ord")
)]
pub struct Span<T> {
    begin: T,
    end: T,
}

/// Bounds as stored, before normalization.
#[derive(Deserialize)]
struct SpanBounds<T> {
    begin: T,
    end: T,
}

impl<T: Copy + Ord> From<SpanBounds<T>> for Span<T> {
    fn from(bounds: SpanBounds<T>) -> Self {
        Span::new(bounds.begin, bounds.end)
    }
}

impl<T: Copy + Ord> Span<T> {
    /// Create a span, swapping the bounds if they arrive reversed.
    pub fn new(a: T, b: T) -> Self {
        if a <= b {
            Self { begin: a, end: b }
        } else {
            Self { begin: b, end: a }
        }
    }

    /// Span covering exactly one index.
    pub fn single(index: T) -> Self {
        Self {
            begin: index,
            end: index,
        }
    }

    pub fn begin(&self) -> T {
        self.begin
    }

    pub fn end(&self) -> T {
        self.end
    }

    pub fn contains(&self, index: T) -> bool {
        self.begin <= index && index <= self.end
    }
}

impl Span<LayerIndex> {
    /// Layers in ascending stack order.
    pub fn iter(&self) -> impl Iterator<Item = LayerIndex> {
        (self.begin.0..=self.end.0).map(LayerIndex)
    }
}

impl Span<FrameIndex> {
    /// Frames in the requested traversal order.
    pub fn iter(&self, order: FrameOrder) -> impl Iterator<Item = FrameIndex> {
        let mut frames = self.begin.0..=self.end.0;
        std::iter::from_fn(move || match order {
            FrameOrder::Ascending => frames.next(),
            FrameOrder::Descending => frames.next_back(),
        })
        .map(FrameIndex)
    }
}

impl<T: fmt::Display> fmt::Display for Span<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}

/// Parse `"N"` or `"A..B"` into inclusive bounds.
fn parse_bounds(input: &str) -> Result<(u32, u32)> {
    let invalid = |reason: &str| CelEditError::InvalidRange {
        input: input.to_string(),
        reason: reason.to_string(),
    };
    let parse_one = |text: &str| {
        text.trim()
            .parse::<u32>()
            .map_err(|_| invalid("bounds must be non-negative integers"))
    };

    match input.split_once("..") {
        Some((a, b)) => {
            let b = b.strip_prefix('=').unwrap_or(b);
            Ok((parse_one(a)?, parse_one(b)?))
        }
        None => {
            let n = parse_one(input)?;
            Ok((n, n))
        }
    }
}

impl FromStr for Span<LayerIndex> {
    type Err = CelEditError;

    fn from_str(s: &str) -> Result<Self> {
        let (a, b) = parse_bounds(s)?;
        Ok(Span::new(LayerIndex(a as usize), LayerIndex(b as usize)))
    }
}

impl FromStr for Span<FrameIndex> {
    type Err = CelEditError;

    fn from_str(s: &str) -> Result<Self> {
        let (a, b) = parse_bounds(s)?;
        Ok(Span::new(FrameIndex(a), FrameIndex(b)))
    }
}

/// Direction in which frames of one layer are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameOrder {
    Ascending,
    /// Last frame first.
    #[default]
    Descending,
}

/// The timeline's current range selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionRange {
    /// No range; commands fall back to the focused cel.
    #[default]
    Disabled,
    Enabled {
        layers: Span<LayerIndex>,
        frames: Span<FrameIndex>,
    },
}

impl SelectionRange {
    pub fn enabled(layers: Span<LayerIndex>, frames: Span<FrameIndex>) -> Self {
        SelectionRange::Enabled { layers, frames }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, SelectionRange::Enabled { .. })
    }

    /// Layer bounds, meaningful only when enabled.
    pub fn layers(&self) -> Option<Span<LayerIndex>> {
        match self {
            SelectionRange::Enabled { layers, .. } => Some(*layers),
            SelectionRange::Disabled => None,
        }
    }

    /// Frame bounds, meaningful only when enabled.
    pub fn frames(&self) -> Option<Span<FrameIndex>> {
        match self {
            SelectionRange::Enabled { frames, .. } => Some(*frames),
            SelectionRange::Disabled => None,
        }
    }

    /// True if the (layer, frame) cell lies inside an enabled range.
    pub fn contains(&self, layer: LayerIndex, frame: FrameIndex) -> bool {
        match self {
            SelectionRange::Enabled { layers, frames } => {
                layers.contains(layer) && frames.contains(frame)
            }
            SelectionRange::Disabled => false,
        }
    }
}
