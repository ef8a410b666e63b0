//! Core editor types and state management.
//!
//! The scene, selection, preferences and the per-tick `EditorContext`
//! that ties them to input.

mod context;
mod error;
mod preferences;
pub mod scene;
mod selection;

pub use context::{EditorContext, FrameOutput, TerrainEdit};
pub use error::{PreferencesError, SceneError, SceneResult};
pub use preferences::{BrushPreferences, EditorPreferences, GizmoPreferences};
pub use scene::{EntityKind, MeshType, Scene, SceneEntity};
pub use selection::{SelectionManager, SelectionMode};

use serde::{Deserialize, Serialize};

/// Entity identifier used throughout the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
