//! Intersection tests for picking and gizmo interaction
//!
//! Provides ray intersection tests against:
//! - AABB (Axis-Aligned Bounding Box, slab method)
//! - Sphere
//! - Plane
//!
//! plus the closest-approach solve between two (possibly skew) lines that
//! axis-constrained dragging is built on.
//!
//! Misses and degenerate configurations are `None`, never a panic.

use crate::bounds::{Sphere, AABB};
use crate::ray::Ray;
use crate::vector::Vec3;

/// Direction components below this are treated as parallel to a slab
const PARALLEL_EPSILON: f32 = 1e-8;

/// Denominators below this make plane and line solves degenerate
const DENOM_EPSILON: f32 = 1e-4;

/// Ray-AABB intersection using the slab method
///
/// Returns the distance along the ray to the first intersection in front of
/// the origin (the exit distance when the origin is inside the box), or
/// `None` if the ray misses.
pub fn ray_aabb(ray: &Ray, aabb: &AABB) -> Option<f32> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];
        let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

        if dir.abs() < PARALLEL_EPSILON {
            // Parallel to this slab: either always inside it or never
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let t1 = (lo - origin) * inv;
        let t2 = (hi - origin) * inv;
        tmin = tmin.max(t1.min(t2));
        tmax = tmax.min(t1.max(t2));
    }

    // If tmax < 0, the box is behind the ray
    // If tmin > tmax, the ray misses
    if tmax < 0.0 || tmin > tmax {
        None
    } else {
        Some(if tmin < 0.0 { tmax } else { tmin })
    }
}

/// Ray-Sphere intersection
///
/// Returns the distance along the ray to the nearest intersection point in
/// front of the origin.
pub fn ray_sphere(ray: &Ray, sphere: &Sphere) -> Option<f32> {
    ray_sphere_at(ray, sphere.center, sphere.radius)
}

/// Ray-Sphere intersection with center and radius
pub fn ray_sphere_at(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.direction.dot(ray.direction);
    if a < PARALLEL_EPSILON {
        return None;
    }
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * a);
    let t2 = (-b + sqrt_d) / (2.0 * a);

    if t1 > 0.0 {
        Some(t1)
    } else if t2 > 0.0 {
        Some(t2)
    } else {
        None
    }
}

/// Ray-Plane intersection
///
/// Plane is defined by a point on the plane and a normal.
/// Returns the distance to the intersection, or `None` if the ray is
/// parallel to the plane or the plane is behind the origin.
pub fn ray_plane(ray: &Ray, plane_point: Vec3, plane_normal: Vec3) -> Option<f32> {
    let denom = plane_normal.dot(ray.direction);

    if denom.abs() < DENOM_EPSILON {
        return None;
    }

    let t = (plane_point - ray.origin).dot(plane_normal) / denom;

    if t >= 0.0 {
        Some(t)
    } else {
        None
    }
}

/// Ray-Plane intersection returning the hit point
#[inline]
pub fn ray_plane_point(ray: &Ray, plane_point: Vec3, plane_normal: Vec3) -> Option<Vec3> {
    ray_plane(ray, plane_point, plane_normal).map(|t| ray.at(t))
}

/// Closest approach between two infinite lines `p1 + s·d1` and `p2 + t·d2`.
///
/// Returns `(s, t)`, the parameters of the closest points on each line, or
/// `None` when the lines are (nearly) parallel.
pub fn closest_line_parameters(p1: Vec3, d1: Vec3, p2: Vec3, d2: Vec3) -> Option<(f32, f32)> {
    let w = p1 - p2;
    let a = d1.dot(d1);
    let b = d1.dot(d2);
    let c = d2.dot(d2);
    let d = d1.dot(w);
    let e = d2.dot(w);

    let denom = a * c - b * b;
    if denom.abs() < DENOM_EPSILON * a.max(c).max(1.0) {
        return None;
    }

    let s = (b * e - c * d) / denom;
    let t = (a * e - b * d) / denom;
    Some((s, t))
}

/// Parameter along the line `line_origin + s·line_dir` closest to the ray
pub fn ray_line_parameter(ray: &Ray, line_origin: Vec3, line_dir: Vec3) -> Option<f32> {
    closest_line_parameters(line_origin, line_dir, ray.origin, ray.direction).map(|(s, _)| s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_aabb_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let aabb = AABB::new(Vec3::new(-1.0, -1.0, 5.0), Vec3::new(1.0, 1.0, 7.0));
        let hit = ray_aabb(&ray, &aabb).expect("should hit");
        assert!((hit - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_ray_aabb_miss() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let aabb = AABB::new(Vec3::new(-1.0, -1.0, 5.0), Vec3::new(1.0, 1.0, 7.0));
        assert!(ray_aabb(&ray, &aabb).is_none());
    }

    #[test]
    fn test_ray_aabb_inside_returns_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let aabb = AABB::new(Vec3::splat(-1.0), Vec3::ONE);
        let hit = ray_aabb(&ray, &aabb).expect("inside hit");
        assert!((hit - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_ray_aabb_behind() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        let aabb = AABB::new(Vec3::ZERO, Vec3::ONE);
        assert!(ray_aabb(&ray, &aabb).is_none());
    }

    #[test]
    fn test_ray_aabb_axis_parallel_on_face_plane() {
        // Origin lies exactly on the x = 0 face and the ray has no x component
        let ray = Ray::new(Vec3::new(0.0, 0.5, -5.0), Vec3::Z);
        let aabb = AABB::new(Vec3::ZERO, Vec3::ONE);
        let hit = ray_aabb(&ray, &aabb).expect("grazing hit");
        assert!((hit - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_sphere_hit_and_miss() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = ray_sphere(&ray, &Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0)).expect("hit");
        assert!((hit - 4.0).abs() < 0.01);
        assert!(ray_sphere(&ray, &Sphere::new(Vec3::new(10.0, 0.0, 5.0), 1.0)).is_none());
    }

    #[test]
    fn test_ray_sphere_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = ray_sphere(&ray, &Sphere::new(Vec3::ZERO, 5.0)).expect("exit hit");
        assert!((hit - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_ray_plane() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let hit = ray_plane(&ray, Vec3::ZERO, Vec3::Y).expect("hit");
        assert!((hit - 5.0).abs() < 0.01);
        let point = ray_plane_point(&ray, Vec3::ZERO, Vec3::Y).expect("point");
        assert!(point.length() < 1e-5);
    }

    #[test]
    fn test_ray_plane_parallel() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X);
        assert!(ray_plane(&ray, Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn test_closest_line_parameters_skew() {
        // X axis and a line parallel to Z passing through (3, 2, 0)
        let (s, t) = closest_line_parameters(
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(3.0, 2.0, -4.0),
            Vec3::Z,
        )
        .expect("skew lines");
        assert!((s - 3.0).abs() < 1e-5);
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_closest_line_parameters_parallel() {
        assert!(closest_line_parameters(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::X).is_none());
    }

    #[test]
    fn test_ray_line_parameter() {
        let ray = Ray::new(Vec3::new(2.5, 10.0, 0.0), Vec3::NEG_Y);
        let s = ray_line_parameter(&ray, Vec3::ZERO, Vec3::X).expect("not parallel");
        assert!((s - 2.5).abs() < 1e-5);
    }
}
