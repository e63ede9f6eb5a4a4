//! # duniya_math
//!
//! Math types for the Duniya engine. Re-exports [`glam`] for linear algebra
//! and defines engine-specific spatial values that components are built from.

pub mod transform;

// Re-export glam types for convenience.
pub use glam::{EulerRot, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub use transform::Transform;
