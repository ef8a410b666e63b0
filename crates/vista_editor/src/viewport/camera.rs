//! Camera matrices and viewport size.

use vista_math::{radians, Mat4, Ray, Vec3};

use super::build_ray;

/// View/projection pair plus the viewport it renders into
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub view: Mat4,
    pub projection: Mat4,
    /// Viewport size in pixels
    pub viewport: [f32; 2],
}

impl Default for CameraState {
    fn default() -> Self {
        Self::look_at(Vec3::new(0.0, 2.0, 5.0), Vec3::new(0.0, 1.0, 0.0), 60.0, [1280.0, 720.0])
    }
}

impl CameraState {
    pub fn new(view: Mat4, projection: Mat4, viewport: [f32; 2]) -> Self {
        Self { view, projection, viewport }
    }

    /// Perspective camera at `eye` looking at `target`, Y up
    pub fn look_at(eye: Vec3, target: Vec3, fov_y_degrees: f32, viewport: [f32; 2]) -> Self {
        let view = Mat4::look_at(eye, target, Vec3::Y);
        let projection = Mat4::perspective(radians(fov_y_degrees), Self::aspect(viewport), 0.1, 1000.0);
        Self { view, projection, viewport }
    }

    fn aspect(viewport: [f32; 2]) -> f32 {
        if viewport[1] > 0.0 {
            viewport[0] / viewport[1]
        } else {
            1.0
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        Self::aspect(self.viewport)
    }

    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        self.view.inverse_or_identity().translation()
    }

    /// Unit view direction in world space
    pub fn forward(&self) -> Vec3 {
        self.view.inverse_or_identity().transform_vector(Vec3::NEG_Z).normalize()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// World-space ray through a pixel
    pub fn screen_ray(&self, screen: [f32; 2]) -> Ray {
        build_ray(
            screen[0],
            screen[1],
            &self.view,
            &self.projection,
            self.viewport[0],
            self.viewport[1],
        )
    }
}
