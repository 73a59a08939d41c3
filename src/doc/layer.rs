//! Layers and cels
//!
//! A layer is either image-bearing, holding at most one cel per frame, or
//! a group that never holds cels. The kind is an enum so cel access needs
//! no downcast.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::image::Image;
use crate::timeline::FrameIndex;

/// Pixel content a layer holds on one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cel {
    pub image: Image,
}

impl Cel {
    pub fn new(image: Image) -> Self {
        Self { image }
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_empty()
    }
}

/// What a layer holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerKind {
    Image {
        #[serde(default, with = "cel_list")]
        cels: BTreeMap<FrameIndex, Cel>,
    },
    Group,
}

/// Cels on disk: a list of `{frame, image}` records in frame order.
///
/// Internally tagged enums buffer their content before dispatch, and a
/// buffered JSON object key stays a string, so a frame-keyed map cannot
/// be read back inside `LayerKind`.
mod cel_list {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Cel, Image};
    use crate::timeline::FrameIndex;

    #[derive(Serialize)]
    struct CelRecordRef<'a> {
        frame: FrameIndex,
        image: &'a Image,
    }

    #[derive(Deserialize)]
    struct CelRecord {
        frame: FrameIndex,
        image: Image,
    }

    pub fn serialize<S>(cels: &BTreeMap<FrameIndex, Cel>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(cels.iter().map(|(frame, cel)| CelRecordRef {
            frame: *frame,
            image: &cel.image,
        }))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<FrameIndex, Cel>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let records = Vec::<CelRecord>::deserialize(deserializer)?;
        Ok(records
            .into_iter()
            .map(|record| (record.frame, Cel::new(record.image)))
            .collect())
    }
}

/// One entry of the sprite's layer stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    editable: bool,
    kind: LayerKind,
}

impl Layer {
    /// New editable image layer with no cels.
    pub fn image(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            editable: true,
            kind: LayerKind::Image {
                cels: BTreeMap::new(),
            },
        }
    }

    /// New editable group layer.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            editable: true,
            kind: LayerKind::Group,
        }
    }

    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    pub fn is_image(&self) -> bool {
        matches!(self.kind, LayerKind::Image { .. })
    }

    /// Editable layers accept mutations; locked ones do not.
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Cel on `frame`, always `None` for group layers.
    pub fn cel_at(&self, frame: FrameIndex) -> Option<&Cel> {
        match &self.kind {
            LayerKind::Image { cels } => cels.get(&frame),
            LayerKind::Group => None,
        }
    }

    pub fn cel_at_mut(&mut self, frame: FrameIndex) -> Option<&mut Cel> {
        match &mut self.kind {
            LayerKind::Image { cels } => cels.get_mut(&frame),
            LayerKind::Group => None,
        }
    }

    /// Cel storage, `None` for group layers.
    pub fn cels(&self) -> Option<&BTreeMap<FrameIndex, Cel>> {
        match &self.kind {
            LayerKind::Image { cels } => Some(cels),
            LayerKind::Group => None,
        }
    }

    pub(crate) fn cels_mut(&mut self) -> Option<&mut BTreeMap<FrameIndex, Cel>> {
        match &mut self.kind {
            LayerKind::Image { cels } => Some(cels),
            LayerKind::Group => None,
        }
    }
}
