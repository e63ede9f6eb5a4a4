//! Spatial transform value.
//!
//! [`Transform`] is position, rotation, and scale in 3D space. The importer
//! fills it from a scene node's local matrix and the renderer turns it back
//! into a model matrix each frame.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A 3D transform: translation, unit-quaternion rotation, per-axis scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Per-axis scale factor.
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a transform at `position` with identity rotation and scale.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Decompose an affine matrix (as produced by an importer's node
    /// hierarchy) into a transform.
    #[must_use]
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Compute the 4×4 model matrix for this transform.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Translate by `offset`.
    #[must_use]
    pub fn translated(mut self, offset: Vec3) -> Self {
        self.position += offset;
        self
    }

    /// Multiply every axis of the scale by `factor`.
    #[must_use]
    pub fn scaled(mut self, factor: f32) -> Self {
        self.scale *= factor;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
