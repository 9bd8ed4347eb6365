//! This module handles the placement of objects in the scene graph.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A translation, rotation and uniform scale, applied in that order when read right to left
/// (scale first, then rotation, then translation).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Where the object sits relative to its parent.
    pub translation: Vec3,

    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,

    /// A uniform scale factor.
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The transform that does nothing.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: 1.,
    };

    /// A pure translation.
    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Vec3::ZERO,
            scale: 1.,
        }
    }

    /// Replace the rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replace the scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// The rotation as a quaternion.
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// The local-to-parent matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.quat(), self.translation)
    }

    /// Transform a point from local space into parent space.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.translation + self.quat() * (point * self.scale)
    }
}
