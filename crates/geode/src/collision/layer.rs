use std::ops::BitOr;

use log::warn;

pub type Layer = u32;

/// Set of layers `0..32`.
///
/// An empty mask matches every layer, see [`LayerMask::matches_layer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask {
    bits: u32,
}

impl LayerMask {
    pub const MAX_LAYERS: Layer = u32::BITS;

    pub const fn new(bits: u32) -> Self {
        Self { bits }
    }

    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn from_layers(layers: impl IntoIterator<Item = Layer>) -> Self {
        layers
            .into_iter()
            .fold(Self::empty(), |mask, layer| mask.with_layer(layer))
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.add(layer);
        self
    }

    pub fn add(&mut self, layer: Layer) {
        if layer >= Self::MAX_LAYERS {
            warn!("layer {} does not fit in a layer mask, ignored", layer);
            return;
        }
        self.bits |= 1 << layer;
    }

    pub fn remove(&mut self, layer: Layer) {
        if layer < Self::MAX_LAYERS {
            self.bits &= !(1 << layer);
        }
    }

    /// whether the bit of `layer` is set, ignores the empty mask rule
    pub fn contains(&self, layer: Layer) -> bool {
        layer < Self::MAX_LAYERS && self.bits & (1 << layer) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn matches_layer(&self, layer: Layer) -> bool {
        matches_layer(self, layer)
    }
}

impl From<u32> for LayerMask {
    fn from(bits: u32) -> Self {
        Self::new(bits)
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::new(self.bits | rhs.bits)
    }
}

/// An empty mask matches every layer, not none of them.
pub fn matches_layer(mask: &LayerMask, layer: Layer) -> bool {
    mask.is_empty() || mask.contains(layer)
}
