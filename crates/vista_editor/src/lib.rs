//! Vista Editor manipulation core
//!
//! The interactive layer of a 3D scene editor, independent of any window
//! system or GPU backend.
//!
//! ## Features
//!
//! - **Ray Casting**: Screen pixels to world-space rays
//! - **Picking**: Nearest visible entity under the cursor, terrain included
//! - **Transform Gizmos**: Axis-constrained move and snapped ring rotation
//! - **Terrain Tools**: Sculpt and paint brushes driven by terrain ray hits
//! - **Multi-Select**: Shift/Ctrl click selection
//! - **TOML Preferences**: Gizmo and brush settings on disk
//!
//! ## Architecture
//!
//! Every frame the host hands the context an input sample and a camera:
//!
//! ```text
//! InputSource → EditorContext::tick → FrameOutput → renderer
//! ```
//!
//! The host owns rendering; the core only reports which models, handles and
//! terrain buffers changed.

pub mod core;
pub mod input;
pub mod tools;
pub mod viewport;

// Re-export commonly used types
pub use core::{
    EditorContext,
    EditorPreferences,
    EntityId,
    EntityKind,
    FrameOutput,
    MeshType,
    Scene,
    SceneEntity,
    SceneError,
    SelectionManager,
    SelectionMode,
    TerrainEdit,
};

pub use input::{InputSnapshot, InputSource, Key, Modifiers, MouseButton};

pub use tools::{pick, pick_terrain, PickResult, Tool, ToolId, ToolRegistry, ToolResult};

pub use viewport::{
    build_ray,
    gizmos::{Axis, GizmoMode, GizmoPart},
    CameraState,
    GizmoPhase,
    GizmoState,
};

pub use vista_math::{Mat4, Ray, Transform, Vec3};
pub use vista_terrain::{Terrain, TerrainConfig};

/// Editor version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Editor name
pub const NAME: &str = "Vista Editor";
