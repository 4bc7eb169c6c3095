//! Model transformation of a rendered solid.
//!
//! Rotations are stored in degrees, the unit an editor exposes, and converted to radians when a
//! matrix is built.

use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Translation, rotation, scale and tint of a solid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub translate: Vec3,
    /// Rotation around the x, y and z axes in degrees.
    pub rotate: Vec3,
    pub scale: Vec3,
    /// RGBA color in the `0..=1` range.
    pub color: Vec4,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Vec3::new(45.0, 150.0, 0.0),
            rotate: Vec3::new(40.0, 25.0, 325.0),
            scale: Vec3::ONE,
            color: Vec4::new(rand::random(), rand::random(), rand::random(), 1.0),
        }
    }
}

impl Transform {
    /// Returns the rotation in radians.
    pub fn rotation_radians(&self) -> Vec3 {
        Vec3::new(
            self.rotate.x.to_radians(),
            self.rotate.y.to_radians(),
            self.rotate.z.to_radians(),
        )
    }

    /// Builds the model matrix: translation, then rotation about x, y and z, then scale.
    pub fn to_matrix(&self) -> Mat4 {
        let r = self.rotation_radians();
        Mat4::from_translation(self.translate)
            * Mat4::from_rotation_x(r.x)
            * Mat4::from_rotation_y(r.y)
            * Mat4::from_rotation_z(r.z)
            * Mat4::from_scale(self.scale)
    }
}
