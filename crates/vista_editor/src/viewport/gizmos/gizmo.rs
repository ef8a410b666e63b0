//! Gizmo trait and common types.

use vista_math::{Ray, Transform, Vec3};

/// World axis a handle works along
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Hit-test priority order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    #[inline]
    pub fn unit(self) -> Vec3 {
        Vec3::AXES[self.index()]
    }
}

/// Part of a gizmo that can be interacted with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GizmoPart {
    #[default]
    None,
    /// Move arrow
    Axis(Axis),
    /// Rotation ring
    Ring(Axis),
}

impl GizmoPart {
    pub fn axis(&self) -> Option<Axis> {
        match *self {
            GizmoPart::Axis(axis) | GizmoPart::Ring(axis) => Some(axis),
            GizmoPart::None => None,
        }
    }

    pub fn is_axis(&self) -> bool {
        matches!(self, GizmoPart::Axis(_))
    }

    pub fn is_ring(&self) -> bool {
        matches!(self, GizmoPart::Ring(_))
    }
}

/// Current gizmo operation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GizmoMode {
    #[default]
    Move,
    Rotate,
}

/// Snapshot taken when a drag starts
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub part: GizmoPart,
    /// Gizmo centre in world space at drag start
    pub center: Vec3,
    /// Entity transform at drag start
    pub origin: Transform,
    /// Axis parameter (move) or ring angle in radians (rotate) at drag start
    pub reference: f32,
}

/// Change relative to the drag origin
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformDelta {
    pub position: Vec3,
    /// Degrees
    pub rotation: Vec3,
}

impl TransformDelta {
    /// The origin transform with this delta applied. Scale is untouched.
    pub fn apply(&self, origin: &Transform) -> Transform {
        Transform {
            position: origin.position + self.position,
            rotation: origin.rotation + self.rotation,
            scale: origin.scale,
        }
    }
}

/// Trait for transform gizmos.
pub trait Gizmo: Send + Sync {
    fn mode(&self) -> GizmoMode;

    /// First handle the ray touches, in X, Y, Z priority order.
    fn hit_test(&self, center: Vec3, ray: &Ray, scale: f32) -> GizmoPart;

    /// Record the reference for a drag on `part`. `None` when the ray
    /// gives no usable reference.
    fn begin_drag(&self, part: GizmoPart, transform: &Transform, center: Vec3, ray: &Ray) -> Option<DragState>;

    /// Delta for the current ray. `None` skips the frame.
    fn update_drag(&self, drag: &DragState, ray: &Ray, snap: Option<f32>) -> Option<TransformDelta>;
}
