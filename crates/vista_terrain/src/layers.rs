//! Texture layer bindings
//!
//! The terrain only stores which texture sits in which slot; pixels are the
//! renderer's business.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

/// Maximum number of texture layers a terrain can bind
pub const MAX_LAYERS: usize = 8;

/// A texture bound to a terrain layer slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerBinding {
    /// Asset identifier of the texture
    pub texture: String,
    /// UV repeat count across the terrain
    pub tiling: f32,
}

impl LayerBinding {
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            tiling: 1.0,
        }
    }

    pub fn with_tiling(mut self, tiling: f32) -> Self {
        self.tiling = tiling;
        self
    }
}

/// Fixed set of texture slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerrainLayers {
    slots: [Option<LayerBinding>; MAX_LAYERS],
}

impl TerrainLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a texture to a slot, returning the previous binding
    pub fn bind(&mut self, slot: usize, binding: LayerBinding) -> Result<Option<LayerBinding>> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(TerrainError::LayerSlotOutOfRange(slot))?;
        Ok(entry.replace(binding))
    }

    /// Clear a slot, returning what was bound
    pub fn unbind(&mut self, slot: usize) -> Result<Option<LayerBinding>> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(TerrainError::LayerSlotOutOfRange(slot))?;
        Ok(entry.take())
    }

    pub fn get(&self, slot: usize) -> Option<&LayerBinding> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Bound slots in slot order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LayerBinding)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, binding)| binding.as_ref().map(|b| (slot, b)))
    }

    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_replace() {
        let mut layers = TerrainLayers::new();
        assert_eq!(layers.bind(0, LayerBinding::new("grass")).unwrap(), None);
        let previous = layers.bind(0, LayerBinding::new("rock")).unwrap();
        assert_eq!(previous.map(|b| b.texture), Some("grass".to_string()));
        assert_eq!(layers.get(0).map(|b| b.texture.as_str()), Some("rock"));
    }

    #[test]
    fn test_slot_out_of_range() {
        let mut layers = TerrainLayers::new();
        assert_eq!(
            layers.bind(MAX_LAYERS, LayerBinding::new("sand")),
            Err(TerrainError::LayerSlotOutOfRange(MAX_LAYERS))
        );
        assert!(layers.unbind(99).is_err());
    }

    #[test]
    fn test_iter_skips_empty_slots() {
        let mut layers = TerrainLayers::new();
        layers.bind(2, LayerBinding::new("snow").with_tiling(4.0)).unwrap();
        layers.bind(7, LayerBinding::new("mud")).unwrap();
        let slots: Vec<usize> = layers.iter().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![2, 7]);
        assert_eq!(layers.bound_count(), 2);

        layers.unbind(2).unwrap();
        assert_eq!(layers.bound_count(), 1);
    }
}
