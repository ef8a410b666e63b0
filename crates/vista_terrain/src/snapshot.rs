//! Serializable terrain state for save/load

use serde::{Deserialize, Serialize};
use vista_math::Transform;

use crate::config::TerrainConfig;
use crate::error::Result;
use crate::layers::TerrainLayers;
use crate::terrain::Terrain;

/// Everything needed to rebuild a terrain. Render buffers are derived and
/// not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainSnapshot {
    pub config: TerrainConfig,
    pub transform: Transform,
    pub heights: Vec<f32>,
    pub splat: Vec<f32>,
    #[serde(default)]
    pub layers: TerrainLayers,
}

impl Terrain {
    /// Capture the editable state. The model matrix is not stored, so the
    /// owner passes the transform it was built from.
    pub fn snapshot(&self, transform: Transform) -> TerrainSnapshot {
        TerrainSnapshot {
            config: self.config.clone(),
            transform,
            heights: self.heights.clone(),
            splat: self.splat.clone(),
            layers: self.layers.clone(),
        }
    }

    /// Rebuild a terrain, validating buffer sizes against the config
    pub fn from_snapshot(snapshot: TerrainSnapshot) -> Result<Self> {
        let TerrainSnapshot { config, transform, heights, splat, layers } = snapshot;
        config.validate()?;
        let expected = config.vertex_count();
        if heights.len() != expected {
            return Err(crate::TerrainError::BufferSizeMismatch {
                expected,
                found: heights.len(),
            });
        }
        let mut terrain = Self::assemble(config, heights, Some(splat))?;
        terrain.layers = layers;
        terrain.set_transform(&transform);
        Ok(terrain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayerBinding, TerrainError};
    use vista_math::Vec3;

    #[test]
    fn test_snapshot_round_trip_through_json() {
        let transform = Transform::from_position(Vec3::new(3.0, 1.0, -2.0));
        let mut terrain = Terrain::flat(4, 1.0, 0.0).unwrap().with_transform(&transform);
        terrain.sculpt(3.0, -2.0, 2.0, 1.0, false);
        terrain.paint(3.0, -2.0, 2.0, 1.0, 1).unwrap();
        terrain.layers_mut().bind(1, LayerBinding::new("rock")).unwrap();

        let json = serde_json::to_string(&terrain.snapshot(transform)).unwrap();
        let restored = Terrain::from_snapshot(serde_json::from_str(&json).unwrap()).unwrap();

        assert_eq!(restored.heights(), terrain.heights());
        assert_eq!(restored.splat_weights(), terrain.splat_weights());
        assert_eq!(restored.model_matrix(), terrain.model_matrix());
        assert_eq!(restored.layers().bound_count(), 1);
        assert_eq!(restored.positions(), terrain.positions());
    }

    #[test]
    fn test_snapshot_with_wrong_sizes_is_rejected() {
        let terrain = Terrain::flat(4, 1.0, 0.0).unwrap();
        let mut snapshot = terrain.snapshot(Transform::IDENTITY);
        snapshot.splat.pop();
        assert!(matches!(
            Terrain::from_snapshot(snapshot),
            Err(TerrainError::BufferSizeMismatch { expected: 75, found: 74 })
        ));
    }
}
