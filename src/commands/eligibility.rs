//! Per-cel eligibility gate

use crate::doc::Layer;

/// Whether a cel on a given layer may be mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Editable,
    Locked,
}

impl Eligibility {
    pub fn of(layer: &Layer) -> Self {
        if layer.is_editable() {
            Eligibility::Editable
        } else {
            Eligibility::Locked
        }
    }
}
