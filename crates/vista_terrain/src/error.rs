//! Error types for the terrain engine

use thiserror::Error;

/// Terrain engine errors
///
/// Geometry misses are not errors; these only cover invalid requests.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TerrainError {
    /// Invalid grid configuration
    #[error("Invalid terrain configuration: {0}")]
    InvalidConfig(String),

    /// Paint target outside the three splat channels
    #[error("Invalid splat layer {0} (expected 0, 1 or 2)")]
    InvalidLayer(usize),

    /// Texture binding slot outside the supported range
    #[error("Texture layer slot {0} out of range (expected < {})", crate::layers::MAX_LAYERS)]
    LayerSlotOutOfRange(usize),

    /// Buffer length does not match the grid
    #[error("Buffer size mismatch: expected {expected} values, found {found}")]
    BufferSizeMismatch { expected: usize, found: usize },
}

/// Result type for terrain operations
pub type Result<T> = std::result::Result<T, TerrainError>;
