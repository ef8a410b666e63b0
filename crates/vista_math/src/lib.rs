//! # vista_math - Editor Math Library
//!
//! Small, allocation-free math primitives for interactive 3D editing:
//! vectors, column-major matrices, rays, bounding volumes and the
//! intersection tests picking and gizmos are built on.
//!
//! Degenerate input never panics: singular matrices invert to `None`,
//! parallel rays miss, zero vectors normalize to zero.

pub mod vector;
pub mod matrix;
pub mod transform;
pub mod bounds;
pub mod ray;
pub mod intersect;

pub use vector::*;
pub use matrix::*;
pub use transform::*;
pub use bounds::*;
pub use ray::*;
pub use intersect::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const FRAC_PI_2: f32 = PI / 2.0;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * consts::RAD_TO_DEG
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp value between min and max
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min { min }
    else if value > max { max }
    else { value }
}

/// Round `value` to the nearest multiple of `step` (no-op for `step <= 0`)
#[inline]
pub fn snap(value: f32, step: f32) -> f32 {
    if step > 0.0 {
        (value / step).round() * step
    } else {
        value
    }
}

/// Wrap an angle in radians into `[-PI, PI]`
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + consts::PI).rem_euclid(consts::TAU) - consts::PI;
    if wrapped == -consts::PI && angle > 0.0 { consts::PI } else { wrapped }
}

pub mod prelude {
    pub use crate::vector::{Vec3, Vec4};
    pub use crate::matrix::Mat4;
    pub use crate::transform::Transform;
    pub use crate::bounds::{AABB, Sphere};
    pub use crate::ray::Ray;
    pub use crate::intersect::{
        ray_aabb, ray_sphere, ray_sphere_at, ray_plane, ray_plane_point,
        closest_line_parameters, ray_line_parameter,
    };
    pub use crate::{radians, degrees, lerp, clamp, snap, wrap_angle};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap() {
        assert_eq!(snap(22.0, 15.0), 15.0);
        assert_eq!(snap(23.0, 15.0), 30.0);
        assert_eq!(snap(-8.0, 15.0), -15.0);
        assert_eq!(snap(7.3, 0.0), 7.3);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(3.0 * consts::PI / 2.0) + consts::FRAC_PI_2).abs() < 1e-5);
        assert!((wrap_angle(-3.0 * consts::PI / 2.0) - consts::FRAC_PI_2).abs() < 1e-5);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_degrees_radians() {
        assert!((degrees(radians(45.0)) - 45.0).abs() < 1e-4);
    }
}
