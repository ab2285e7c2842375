//! The rigid body component.

use engine_component::Component;
use engine_math::{Aabb, Vec3};
use serde::{Deserialize, Serialize};

/// A physically simulated sphere.
///
/// `aabb` is used by the broad phase and `radius` by the narrow phase; keeping
/// them consistent is up to the caller. An `inv_mass` of zero marks the body
/// as immovable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Body {
    /// Local-space bounds, relative to `position`.
    pub aabb: Aabb,
    /// Sphere radius used to resolve collisions.
    pub radius: f32,
    /// Inverse mass, in 1/kg. Must not be negative.
    pub inv_mass: f32,
    /// Linear drag coefficient.
    pub linear_drag: f32,
    /// World-space position, in meters.
    pub position: Vec3,
    /// Velocity, in meters per second.
    pub velocity: Vec3,
    /// Coefficient of restitution. Collision resolution does not read it yet:
    /// every body-body collision is perfectly elastic.
    pub restitution: f32,
}

impl Body {
    /// A unit-mass sphere of `radius` with matching bounds.
    #[must_use]
    pub fn sphere(radius: f32) -> Self {
        Self {
            aabb: Aabb::cube(radius),
            radius,
            ..Self::default()
        }
    }

    /// Set the position.
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the inverse mass. Zero makes the body immovable.
    #[must_use]
    pub fn with_inv_mass(mut self, inv_mass: f32) -> Self {
        self.inv_mass = inv_mass;
        self
    }

    /// Set the linear drag coefficient.
    #[must_use]
    pub fn with_linear_drag(mut self, linear_drag: f32) -> Self {
        self.linear_drag = linear_drag;
        self
    }

    /// Bounds in world space.
    #[must_use]
    pub fn world_aabb(&self) -> Aabb {
        self.aabb.translated(self.position)
    }

    /// Linear momentum, treating zero inverse mass as zero momentum.
    #[must_use]
    pub fn momentum(&self) -> Vec3 {
        if self.inv_mass > 0.0 {
            self.velocity / self.inv_mass
        } else {
            Vec3::ZERO
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self {
            aabb: Aabb::cube(1.0),
            radius: 1.0,
            inv_mass: 1.0,
            linear_drag: 0.0,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            restitution: 1.0,
        }
    }
}

impl Component for Body {
    fn type_name() -> &'static str {
        "Body"
    }
}
