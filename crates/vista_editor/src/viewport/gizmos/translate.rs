//! Translate gizmo implementation.

use vista_math::{ray_aabb, ray_line_parameter, snap, Ray, Transform, Vec3, AABB};

use super::{Axis, DragState, Gizmo, GizmoMode, GizmoPart, TransformDelta};

/// Axis arrows, hit-tested as thin boxes in gizmo-local space
#[derive(Clone, Debug)]
pub struct TranslateGizmo {
    /// Arrow length in gizmo units
    pub handle_length: f32,
    /// Half thickness of the pick box
    pub handle_thickness: f32,
}

impl Default for TranslateGizmo {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslateGizmo {
    pub fn new() -> Self {
        Self {
            handle_length: 1.1,
            handle_thickness: 0.3,
        }
    }

    fn handle_box(&self, axis: Axis) -> AABB {
        let mut min = Vec3::splat(-self.handle_thickness);
        let mut max = Vec3::splat(self.handle_thickness);
        min[axis.index()] = 0.0;
        max[axis.index()] = self.handle_length;
        AABB::new(min, max)
    }
}

impl Gizmo for TranslateGizmo {
    fn mode(&self) -> GizmoMode {
        GizmoMode::Move
    }

    fn hit_test(&self, center: Vec3, ray: &Ray, scale: f32) -> GizmoPart {
        if !(scale > f32::EPSILON) {
            return GizmoPart::None;
        }

        // Into gizmo-local space: unit handles around the origin
        let local = Ray {
            origin: (ray.origin - center) / scale,
            direction: ray.direction,
        };

        Axis::ALL
            .into_iter()
            .find(|&axis| ray_aabb(&local, &self.handle_box(axis)).is_some())
            .map_or(GizmoPart::None, GizmoPart::Axis)
    }

    fn begin_drag(&self, part: GizmoPart, transform: &Transform, center: Vec3, ray: &Ray) -> Option<DragState> {
        let GizmoPart::Axis(axis) = part else {
            return None;
        };
        let reference = ray_line_parameter(ray, center, axis.unit())?;
        Some(DragState {
            part,
            center,
            origin: *transform,
            reference,
        })
    }

    fn update_drag(&self, drag: &DragState, ray: &Ray, snap_step: Option<f32>) -> Option<TransformDelta> {
        let GizmoPart::Axis(axis) = drag.part else {
            return None;
        };
        let current = ray_line_parameter(ray, drag.center, axis.unit())?;

        let mut offset = current - drag.reference;
        if let Some(step) = snap_step {
            offset = snap(offset, step);
        }

        let mut delta = TransformDelta::default();
        delta.position[axis.index()] = offset;
        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_each_arrow() {
        let gizmo = TranslateGizmo::new();
        let down = |x: f32, z: f32| Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y);
        assert_eq!(gizmo.hit_test(Vec3::ZERO, &down(0.8, 0.0), 1.0), GizmoPart::Axis(Axis::X));
        assert_eq!(gizmo.hit_test(Vec3::ZERO, &down(0.0, 0.8), 1.0), GizmoPart::Axis(Axis::Z));
        let side = Ray::new(Vec3::new(10.0, 0.9, 0.0), Vec3::NEG_X);
        assert_eq!(gizmo.hit_test(Vec3::ZERO, &side, 1.0), GizmoPart::Axis(Axis::Y));
    }

    #[test]
    fn test_x_wins_at_the_centre() {
        let gizmo = TranslateGizmo::new();
        let ray = Ray::new(Vec3::new(0.1, 10.0, 0.1), Vec3::NEG_Y);
        assert_eq!(gizmo.hit_test(Vec3::ZERO, &ray, 1.0), GizmoPart::Axis(Axis::X));
    }

    #[test]
    fn test_handles_scale_with_gizmo() {
        let gizmo = TranslateGizmo::new();
        let ray = Ray::new(Vec3::new(5.0, 10.0, 2.0), Vec3::NEG_Y);
        let center = Vec3::new(2.0, 0.0, 2.0);
        assert_eq!(gizmo.hit_test(center, &ray, 1.0), GizmoPart::None);
        assert_eq!(gizmo.hit_test(center, &ray, 3.0), GizmoPart::Axis(Axis::X));
        assert_eq!(gizmo.hit_test(center, &ray, 0.0), GizmoPart::None);
    }

    #[test]
    fn test_drag_moves_along_axis_only() {
        let gizmo = TranslateGizmo::new();
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let center = transform.position;
        let start = Ray::new(Vec3::new(1.5, 12.0, 3.0), Vec3::NEG_Y);
        let drag = gizmo
            .begin_drag(GizmoPart::Axis(Axis::X), &transform, center, &start)
            .unwrap();

        let moved = Ray::new(Vec3::new(4.0, 12.0, 7.0), Vec3::NEG_Y);
        let delta = gizmo.update_drag(&drag, &moved, None).unwrap();
        assert!((delta.position.x - 2.5).abs() < 1e-4);
        assert_eq!(delta.position.y, 0.0);
        assert_eq!(delta.position.z, 0.0);
        assert_eq!(delta.rotation, Vec3::ZERO);

        let result = delta.apply(&transform);
        assert!((result.position.x - 3.5).abs() < 1e-4);
        assert_eq!(result.position.y, 2.0);
        assert_eq!(result.position.z, 3.0);
    }

    #[test]
    fn test_drag_snapping() {
        let gizmo = TranslateGizmo::new();
        let transform = Transform::IDENTITY;
        let start = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        let drag = gizmo
            .begin_drag(GizmoPart::Axis(Axis::Z), &transform, Vec3::ZERO, &start)
            .unwrap();
        let moved = Ray::new(Vec3::new(0.0, 10.0, 1.3), Vec3::NEG_Y);
        let delta = gizmo.update_drag(&drag, &moved, Some(0.5)).unwrap();
        assert!((delta.position.z - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_ray_parallel_to_axis_cannot_drag() {
        let gizmo = TranslateGizmo::new();
        let ray = Ray::new(Vec3::new(-10.0, 0.0, 0.0), Vec3::X);
        assert!(gizmo
            .begin_drag(GizmoPart::Axis(Axis::X), &Transform::IDENTITY, Vec3::ZERO, &ray)
            .is_none());
    }

    #[test]
    fn test_ring_part_is_not_a_move_drag() {
        let gizmo = TranslateGizmo::new();
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        assert!(gizmo
            .begin_drag(GizmoPart::Ring(Axis::Y), &Transform::IDENTITY, Vec3::ZERO, &ray)
            .is_none());
    }
}
