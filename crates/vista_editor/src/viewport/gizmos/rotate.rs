//! Rotate gizmo implementation.

use vista_math::{degrees, ray_plane_point, snap, wrap_angle, Ray, Transform, Vec3};

use super::{Axis, DragState, Gizmo, GizmoMode, GizmoPart, TransformDelta};

/// One ring per world axis, lying in the plane that axis is normal to
#[derive(Clone, Debug)]
pub struct RotateGizmo {
    /// Ring radius in gizmo units
    pub ring_radius: f32,
    /// Accepted distance either side of the ring
    pub ring_tolerance: f32,
}

impl Default for RotateGizmo {
    fn default() -> Self {
        Self::new()
    }
}

impl RotateGizmo {
    pub fn new() -> Self {
        Self {
            ring_radius: 1.5,
            ring_tolerance: 0.2,
        }
    }
}

/// Angle of `offset` around `axis`, measured in the ring plane
fn ring_angle(axis: Axis, offset: Vec3) -> f32 {
    match axis {
        Axis::X => offset.y.atan2(offset.z),
        Axis::Y => offset.x.atan2(offset.z),
        Axis::Z => offset.x.atan2(offset.y),
    }
}

impl Gizmo for RotateGizmo {
    fn mode(&self) -> GizmoMode {
        GizmoMode::Rotate
    }

    fn hit_test(&self, center: Vec3, ray: &Ray, scale: f32) -> GizmoPart {
        let inner = (self.ring_radius - self.ring_tolerance) * scale;
        let outer = (self.ring_radius + self.ring_tolerance) * scale;

        Axis::ALL
            .into_iter()
            .find(|&axis| {
                ray_plane_point(ray, center, axis.unit())
                    .map(|hit| (inner..=outer).contains(&(hit - center).length()))
                    .unwrap_or(false)
            })
            .map_or(GizmoPart::None, GizmoPart::Ring)
    }

    fn begin_drag(&self, part: GizmoPart, transform: &Transform, center: Vec3, ray: &Ray) -> Option<DragState> {
        let GizmoPart::Ring(axis) = part else {
            return None;
        };
        let hit = ray_plane_point(ray, center, axis.unit())?;
        Some(DragState {
            part,
            center,
            origin: *transform,
            reference: ring_angle(axis, hit - center),
        })
    }

    /// Rotation follows the pointer around the ring in `snap` degree
    /// increments. The stored angle is decreased as the pointer angle
    /// grows so the entity turns with the handle on screen.
    fn update_drag(&self, drag: &DragState, ray: &Ray, snap_degrees: Option<f32>) -> Option<TransformDelta> {
        let GizmoPart::Ring(axis) = drag.part else {
            return None;
        };
        let hit = ray_plane_point(ray, drag.center, axis.unit())?;
        let angle = ring_angle(axis, hit - drag.center);

        let swept = degrees(wrap_angle(angle - drag.reference));
        let snapped = snap(swept, snap_degrees.unwrap_or(0.0));

        let mut delta = TransformDelta::default();
        delta.rotation[axis.index()] = -snapped;
        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_at(x: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y)
    }

    #[test]
    fn test_ring_band() {
        let gizmo = RotateGizmo::new();
        // Looking straight down only the Y ring plane is hit
        assert_eq!(gizmo.hit_test(Vec3::ZERO, &down_at(1.5, 0.0), 1.0), GizmoPart::Ring(Axis::Y));
        assert_eq!(gizmo.hit_test(Vec3::ZERO, &down_at(1.31, 0.0), 1.0), GizmoPart::Ring(Axis::Y));
        assert_eq!(gizmo.hit_test(Vec3::ZERO, &down_at(1.0, 0.0), 1.0), GizmoPart::None);
        assert_eq!(gizmo.hit_test(Vec3::ZERO, &down_at(1.8, 0.0), 1.0), GizmoPart::None);
        assert_eq!(gizmo.hit_test(Vec3::ZERO, &down_at(3.0, 0.0), 2.0), GizmoPart::Ring(Axis::Y));
    }

    #[test]
    fn test_ring_priority_is_x_first() {
        let gizmo = RotateGizmo::new();
        // Crosses the X and Z ring planes at the same point
        let ray = Ray::new(Vec3::new(-1.0, 1.5, -1.0), Vec3::new(1.0, 0.0, 1.0));
        let part = gizmo.hit_test(Vec3::ZERO, &ray, 1.0);
        assert_eq!(part, GizmoPart::Ring(Axis::X));
    }

    #[test]
    fn test_rotation_snaps_to_increments() {
        let gizmo = RotateGizmo::new();
        let transform = Transform::IDENTITY.with_rotation(Vec3::new(0.0, 10.0, 0.0));
        let drag = gizmo
            .begin_drag(GizmoPart::Ring(Axis::Y), &transform, Vec3::ZERO, &down_at(0.0, 1.5))
            .unwrap();

        // Sweep 20 degrees around Y; snaps to 15
        let a = 20.0f32.to_radians();
        let ray = down_at(1.5 * a.sin(), 1.5 * a.cos());
        let delta = gizmo.update_drag(&drag, &ray, Some(15.0)).unwrap();
        assert!((delta.rotation.y + 15.0).abs() < 1e-4);
        assert_eq!(delta.rotation.x, 0.0);
        assert_eq!(delta.rotation.z, 0.0);

        let result = delta.apply(&transform);
        assert!((result.rotation.y - -5.0).abs() < 1e-4);
    }

    #[test]
    fn test_snapped_rotation_is_multiple_of_step() {
        let gizmo = RotateGizmo::new();
        let start = Ray::new(Vec3::new(0.0, 1.5, 10.0), Vec3::NEG_Z);
        let drag = gizmo
            .begin_drag(GizmoPart::Ring(Axis::Z), &Transform::IDENTITY, Vec3::ZERO, &start)
            .unwrap();
        for step in 0..24 {
            let a = step as f32 * 0.37;
            let ray = Ray::new(Vec3::new(1.5 * a.sin(), 1.5 * a.cos(), 10.0), Vec3::NEG_Z);
            let delta = gizmo.update_drag(&drag, &ray, Some(15.0)).unwrap();
            let ratio = delta.rotation.z / 15.0;
            assert!((ratio - ratio.round()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sweep_wraps_across_pi() {
        let gizmo = RotateGizmo::new();
        // Start just short of +PI around Y, end just past it
        let start = 175.0f32.to_radians();
        let end = -175.0f32.to_radians();
        let drag = gizmo
            .begin_drag(
                GizmoPart::Ring(Axis::Y),
                &Transform::IDENTITY,
                Vec3::ZERO,
                &down_at(1.5 * start.sin(), 1.5 * start.cos()),
            )
            .unwrap();
        let delta = gizmo
            .update_drag(&drag, &down_at(1.5 * end.sin(), 1.5 * end.cos()), Some(15.0))
            .unwrap();
        assert!((delta.rotation.y + 15.0).abs() < 1e-3);
    }

    #[test]
    fn test_ray_parallel_to_ring_plane_skips() {
        let gizmo = RotateGizmo::new();
        let drag = gizmo
            .begin_drag(GizmoPart::Ring(Axis::Y), &Transform::IDENTITY, Vec3::ZERO, &down_at(1.5, 0.0))
            .unwrap();
        let flat = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);
        assert!(gizmo.update_drag(&drag, &flat, Some(15.0)).is_none());
    }
}
