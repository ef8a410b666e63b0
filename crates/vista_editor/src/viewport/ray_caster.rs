//! Screen-to-world ray construction.

use vista_math::{ray_aabb, ray_sphere_at, Mat4, Ray, Vec3, AABB};

/// Build a world-space ray through a pixel.
///
/// The pixel is mapped to NDC, unprojected on the far plane through the
/// inverse projection and inverse view, and joined to the camera position.
/// A zero-sized viewport or a singular projection yields a ray along the
/// camera's forward axis. Pure: the same inputs give the same ray.
pub fn build_ray(
    screen_x: f32,
    screen_y: f32,
    view: &Mat4,
    projection: &Mat4,
    width: f32,
    height: f32,
) -> Ray {
    let Some(inv_view) = view.try_inverse() else {
        return Ray::default();
    };
    let origin = inv_view.translation();
    let forward = Ray::new(origin, inv_view.transform_vector(Vec3::NEG_Z));

    if !(width > 0.0 && height > 0.0) {
        return forward;
    }
    let Some(inv_proj) = projection.try_inverse() else {
        return forward;
    };

    let ndc_x = 2.0 * screen_x / width - 1.0;
    let ndc_y = 1.0 - 2.0 * screen_y / height;

    let view_point = inv_proj.transform_point(Vec3::new(ndc_x, ndc_y, 1.0));
    let world_point = inv_view.transform_point(view_point);

    let ray = Ray::new(origin, world_point - origin);
    if ray.is_valid() { ray } else { forward }
}

/// Distance to a sphere, if hit
pub fn hit_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    ray_sphere_at(ray, center, radius)
}

/// Distance to an axis-aligned box of `size` around `center`, if hit
pub fn hit_box(ray: &Ray, center: Vec3, size: Vec3) -> Option<f32> {
    ray_aabb(ray, &AABB::from_center_size(center, size))
}
