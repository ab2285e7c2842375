//! # engine_math
//!
//! Math types for the simulation core. Re-exports [`glam`] for linear
//! algebra and defines engine-specific spatial types. [`Transform`]
//! implements [`Component`](engine_component::Component).

pub mod aabb;
pub mod transform;

// Re-export glam types for convenience.
pub use glam::{EulerRot, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub use aabb::Aabb;
pub use transform::Transform;
