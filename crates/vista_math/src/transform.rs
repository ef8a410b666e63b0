//! Transform component for scene entities
//!
//! Rotation is stored as Euler angles in degrees, which is what the gizmo
//! rings edit and what property panels display.

use crate::matrix::Mat4;
use crate::vector::Vec3;

/// Position, Euler rotation (degrees) and scale of an entity
///
/// Scale components are expected to stay positive; this is not enforced.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    #[inline]
    pub const fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    /// Set position (builder pattern)
    #[inline]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set rotation in degrees (builder pattern)
    #[inline]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set scale (builder pattern)
    #[inline]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local model matrix `T · Rz · Ry · Rx · S`
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation_euler_scale(self.position, self.rotation, self.scale)
    }

    /// Local matrix composed under a parent's world matrix
    pub fn to_world_matrix(&self, parent: Option<&Mat4>) -> Mat4 {
        match parent {
            Some(parent) => *parent * self.to_matrix(),
            None => self.to_matrix(),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
