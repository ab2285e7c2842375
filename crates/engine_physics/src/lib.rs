//! # engine_physics
//!
//! Sphere-body physics on top of the component registry.
//!
//! Attach a [`Body`] and a [`Transform`](engine_math::Transform) to an entity
//! and add a [`PhysicsSystem`] to the scene. Each update integrates every body
//! with semi-implicit Euler, reflects it off the world bounds, finds
//! overlapping bounds with a [`BroadPhase`] and resolves touching spheres with
//! an elastic impulse, raising a [`COLLISION_EVENT`] per collision.

pub mod body;
pub mod broad_phase;
pub mod config;
pub mod integrate;
pub mod narrow_phase;
pub mod system;

pub use body::Body;
pub use broad_phase::{AllPairs, BroadPhase, CandidatePair};
pub use config::{MassModel, PhysicsConfig};
pub use narrow_phase::Resolution;
pub use system::{COLLISION_EVENT, CollisionEvent, PhysicsSystem, StepStats};
