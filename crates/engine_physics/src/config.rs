//! World configuration for the physics engine.

use engine_math::{Aabb, Vec3};
use serde::{Deserialize, Serialize};

/// Default gravitational acceleration, in m/s².
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Default half extent of the world bounds, in meters.
pub const DEFAULT_BOUNDS_HALF_EXTENT: f32 = 10.0;

/// How collision resolution combines the masses of two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassModel {
    /// Convert each inverse mass back to a mass, treating an inverse mass
    /// near zero as a mass of zero, and use `1 / (m1 + m2)`.
    ///
    /// Exact for unit masses. Bodies heavier than one unit lose energy and a
    /// zero inverse mass acts as "massless" rather than immovable.
    #[default]
    Legacy,
    /// Use `1 / (inv_mass1 + inv_mass2)`. A zero inverse mass is immovable
    /// and collisions between equal masses are elastic for any mass.
    InverseMassWeighted,
}

/// Mutable world settings, owned by the physics system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Constant acceleration applied to every body.
    pub gravity: Vec3,
    /// Bodies are kept inside this box.
    pub bounds: Aabb,
    /// Mass combination used when resolving collisions.
    pub mass_model: MassModel,
}

impl PhysicsConfig {
    /// Set the gravity vector.
    #[must_use]
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the world bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the mass model.
    #[must_use]
    pub fn with_mass_model(mut self, mass_model: MassModel) -> Self {
        self.mass_model = mass_model;
        self
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            bounds: Aabb::cube(DEFAULT_BOUNDS_HALF_EXTENT),
            mass_model: MassModel::Legacy,
        }
    }
}
