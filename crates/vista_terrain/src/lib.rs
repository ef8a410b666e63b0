//! # vista_terrain - Editable Heightfield Terrain
//!
//! A square grid of `(N+1)²` height samples plus three splat weights per
//! vertex, placed in the world by a model matrix.
//!
//! Features:
//! - Bilinear height queries with a "no ground" sentinel outside the grid
//! - Cosine-falloff sculpt and paint brushes
//! - Fixed-step ray marching for cursor placement
//! - Position/normal/splat buffers ready for GPU upload
//!
//! ## Example
//!
//! ```ignore
//! use vista_terrain::prelude::*;
//!
//! let mut terrain = Terrain::flat(64, 1.0, 0.0)?;
//! if let Some(hit) = terrain.raycast(camera_pos, ray_dir) {
//!     terrain.sculpt(hit.x, hit.z, 4.0, 1.0, false);
//! }
//! ```

pub mod brush;
pub mod config;
pub mod error;
pub mod layers;
pub mod raycast;
pub mod snapshot;
pub mod terrain;

pub use brush::{BrushFootprint, BrushSample};
pub use config::TerrainConfig;
pub use error::{Result, TerrainError};
pub use layers::{LayerBinding, TerrainLayers, MAX_LAYERS};
pub use snapshot::TerrainSnapshot;
pub use terrain::{Terrain, TerrainDirty, NO_GROUND_HEIGHT, SPLAT_CHANNELS};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::TerrainConfig;
    pub use crate::error::{Result, TerrainError};
    pub use crate::layers::{LayerBinding, TerrainLayers};
    pub use crate::snapshot::TerrainSnapshot;
    pub use crate::terrain::{Terrain, TerrainDirty, NO_GROUND_HEIGHT};
}
