//! Transform gizmos for visual manipulation.
//!
//! Axis arrows move an entity along one world axis, rings rotate it about
//! one. `GizmoState` owns the phase machine; the gizmos here are pure hit
//! and drag math.

mod gizmo;
mod rotate;
mod translate;

pub use gizmo::{Axis, DragState, Gizmo, GizmoMode, GizmoPart, TransformDelta};
pub use rotate::RotateGizmo;
pub use translate::TranslateGizmo;

/// Gizmo handle colors (linear RGBA).
pub mod colors {
    use super::Axis;

    pub const X_AXIS: [f32; 4] = [1.0, 0.39, 0.39, 1.0];
    pub const Y_AXIS: [f32; 4] = [0.39, 1.0, 0.39, 1.0];
    pub const Z_AXIS: [f32; 4] = [0.39, 0.39, 1.0, 1.0];
    pub const HIGHLIGHT: [f32; 4] = [1.0, 1.0, 0.39, 1.0];

    pub fn axis(axis: Axis) -> [f32; 4] {
        match axis {
            Axis::X => X_AXIS,
            Axis::Y => Y_AXIS,
            Axis::Z => Z_AXIS,
        }
    }
}
