//! Viewport camera, screen-to-world rays and transform gizmos.

mod camera;
mod gizmo_state;
pub mod gizmos;
mod ray_caster;

pub use camera::CameraState;
pub use gizmo_state::{GizmoPhase, GizmoState, SnapSettings};
pub use ray_caster::{build_ray, hit_box, hit_sphere};
