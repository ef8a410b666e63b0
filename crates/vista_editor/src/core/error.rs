//! Error types for scene editing and preferences

use thiserror::Error;

use super::EntityId;

/// Scene and hierarchy errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("{0} not found")]
    EntityNotFound(EntityId),

    /// Parenting would make an entity its own ancestor
    #[error("Cannot parent {child} under {parent}: would create a cycle")]
    CycleDetected { child: EntityId, parent: EntityId },

    #[error("{0} is not a terrain")]
    NotATerrain(EntityId),
}

/// Result type for scene operations
pub type SceneResult<T> = std::result::Result<T, SceneError>;

/// Preferences persistence errors
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Preferences I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid preferences file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}
