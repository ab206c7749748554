use crate::types::Layer;

/// Active-layer bitmask. Bit `n` set means layer `n` is on; the base layer is
/// always implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerState(u32);

impl LayerState {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn is_on(self, layer: Layer) -> bool {
        self.0 & (1 << layer.index()) != 0
    }

    pub fn layer_on(&mut self, layer: Layer) {
        self.0 |= 1 << layer.index();
    }

    pub fn layer_off(&mut self, layer: Layer) {
        self.0 &= !(1 << layer.index());
    }

    pub fn invert(&mut self, layer: Layer) {
        self.0 ^= 1 << layer.index();
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Keeps only layers also on in `other`.
    pub fn retain(&mut self, other: LayerState) {
        self.0 &= other.0;
    }

    /// Layers set here but not in `other`.
    pub const fn difference(self, other: LayerState) -> LayerState {
        LayerState(self.0 & !other.0)
    }

    /// Highest active layer, falling back to the base layer.
    pub fn highest_layer(self) -> Layer {
        Layer::ALL
            .iter()
            .rev()
            .copied()
            .find(|layer| self.is_on(*layer))
            .unwrap_or(Layer::Qwerty)
    }

    pub fn iter(self) -> impl Iterator<Item = Layer> {
        Layer::ALL.into_iter().filter(move |layer| self.is_on(*layer))
    }
}
