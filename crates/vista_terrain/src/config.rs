//! Terrain configuration

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

/// Terrain grid and brush configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Number of cells per side; the grid has `(grid_size + 1)²` vertices
    pub grid_size: usize,

    /// World units per cell
    pub cell_size: f32,

    /// Height every vertex starts at
    pub initial_height: f32,

    /// Height change per sculpt call at full strength, brush centre
    pub sculpt_rate: f32,

    /// Blend factor per paint call at full strength, brush centre
    pub paint_rate: f32,

    /// Ray-march step as a fraction of `cell_size`
    pub march_step_factor: f32,

    /// Maximum march length as a multiple of the grid extent
    pub march_distance_factor: f32,

    /// Local Y below which a marching ray is abandoned
    pub below_ground_cutoff: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            grid_size: 64,
            cell_size: 1.0,
            initial_height: 0.0,
            sculpt_rate: 0.1,
            paint_rate: 0.1,
            march_step_factor: 0.25,
            march_distance_factor: 1.5,
            below_ground_cutoff: -50.0,
        }
    }
}

impl TerrainConfig {
    /// Set grid dimensions
    pub fn with_grid(mut self, grid_size: usize, cell_size: f32) -> Self {
        self.grid_size = grid_size;
        self.cell_size = cell_size;
        self
    }

    /// Set starting height
    pub fn with_initial_height(mut self, height: f32) -> Self {
        self.initial_height = height;
        self
    }

    /// Vertices per row (`grid_size + 1`)
    #[inline]
    pub fn row_len(&self) -> usize {
        self.grid_size + 1
    }

    /// Total vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.row_len() * self.row_len()
    }

    /// Side length of the terrain in local units
    #[inline]
    pub fn extent(&self) -> f32 {
        self.grid_size as f32 * self.cell_size
    }

    pub fn march_step(&self) -> f32 {
        self.cell_size * self.march_step_factor
    }

    pub fn march_distance(&self) -> f32 {
        self.march_distance_factor * self.extent()
    }

    /// Reject grids the engine cannot index
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(TerrainError::InvalidConfig("grid_size must be at least 1".into()));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(TerrainError::InvalidConfig(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if !(self.march_step_factor > 0.0) {
            return Err(TerrainError::InvalidConfig(format!(
                "march_step_factor must be positive, got {}",
                self.march_step_factor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TerrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = TerrainConfig::default().with_grid(0, 1.0);
        assert!(matches!(config.validate(), Err(TerrainError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_non_positive_cell() {
        assert!(TerrainConfig::default().with_grid(4, 0.0).validate().is_err());
        assert!(TerrainConfig::default().with_grid(4, -1.0).validate().is_err());
        assert!(TerrainConfig::default().with_grid(4, f32::NAN).validate().is_err());
    }

    #[test]
    fn test_derived_sizes() {
        let config = TerrainConfig::default().with_grid(4, 2.0);
        assert_eq!(config.vertex_count(), 25);
        assert_eq!(config.extent(), 8.0);
        assert_eq!(config.march_step(), 0.5);
        assert_eq!(config.march_distance(), 12.0);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: TerrainConfig = serde_json::from_str(r#"{ "grid_size": 8 }"#).unwrap();
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.cell_size, 1.0);
    }
}
