//! 3D transform component.
//!
//! [`Transform`] holds position, rotation and scale, plus the derived world
//! `frame` matrix that renderers consume.

use engine_component::Component;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Position, rotation and per-axis scale in 3D space.
///
/// `frame` is a write-only cache: it is recomputed from the other fields once
/// per frame by [`Transform::refresh_frame`] and never read back by physics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Per-axis scale factor.
    pub scale: Vec3,
    /// Rotation as a 4×4 matrix.
    pub rotation: Mat4,
    /// Cached model matrix.
    pub frame: Mat4,
}

impl Transform {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        scale: Vec3::ONE,
        rotation: Mat4::IDENTITY,
        frame: Mat4::IDENTITY,
    };

    /// Create a new transform with the given position and default rotation/scale.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Set the scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set the rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Mat4) -> Self {
        self.rotation = rotation;
        self
    }

    /// Compute the model matrix: scale first, then rotate, then translate.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * self.rotation * Mat4::from_scale(self.scale)
    }

    /// Recompute `frame` from the current position, rotation and scale.
    pub fn refresh_frame(&mut self) {
        self.frame = self.to_matrix();
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform {
    fn type_name() -> &'static str {
        "Transform"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let t = Transform::IDENTITY;
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_frame_applies_scale_then_rotation_then_translation() {
        let mut t = Transform::from_position(Vec3::new(5.0, 0.0, 0.0))
            .with_scale(Vec3::splat(2.0))
            .with_rotation(Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));
        t.refresh_frame();

        // (1, 0, 0) scaled to (2, 0, 0), rotated to (0, 2, 0), moved to (5, 2, 0).
        let p = t.frame.transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(5.0, 2.0, 0.0), 1e-5), "got {p}");
    }

    #[test]
    fn test_frame_is_stale_until_refreshed() {
        let mut t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.frame, Mat4::IDENTITY);
        t.refresh_frame();
        assert_eq!(t.frame, Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0)).with_scale(Vec3::splat(0.5));
        let json = serde_json::to_string(&t).unwrap();
        let restored: Transform = serde_json::from_str(&json).unwrap();
        assert_eq!(t, restored);
    }
}
