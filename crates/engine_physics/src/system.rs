//! The physics system.
//!
//! [`PhysicsSystem::step`] advances every [`Body`] by one timestep:
//!
//! 1. refresh the world frame of every [`Transform`],
//! 2. integrate each body and clamp it to the world bounds, in store order,
//!    copying its position into its transform,
//! 3. gather candidate pairs from the broad phase,
//! 4. resolve each candidate as a sphere pair, raising a
//!    [`COLLISION_EVENT`] for every resolved collision.
//!
//! Positional corrections from step 4 reach the transforms on the next step.

use engine_component::{Entity, Registry, RegistryError};
use engine_math::{Transform, Vec3};
use engine_system::{EventQueue, System, SystemContext, SystemResult};
use tracing::{debug, trace};

use crate::body::Body;
use crate::broad_phase::{AllPairs, BroadPhase, CandidatePair};
use crate::config::PhysicsConfig;
use crate::integrate::{clamp_to_bounds, integrate};
use crate::narrow_phase::resolve;

/// Name of the event raised once per resolved collision.
pub const COLLISION_EVENT: &str = "collision";

/// Payload of a [`COLLISION_EVENT`]. `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    /// The smaller entity handle of the pair.
    pub first: Entity,
    /// The larger entity handle of the pair.
    pub second: Entity,
}

/// Counters from the most recent step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Bodies integrated.
    pub bodies: usize,
    /// Pairs reported by the broad phase.
    pub candidates: usize,
    /// Pairs the narrow phase resolved.
    pub collisions: usize,
}

/// Simulates every [`Body`] in the registry.
///
/// Every entity with a `Body` must also have a [`Transform`].
#[derive(Debug)]
pub struct PhysicsSystem {
    config: PhysicsConfig,
    broad_phase: Box<dyn BroadPhase>,
    /// Reused between steps.
    candidates: Vec<CandidatePair>,
    moved: Vec<(Entity, Vec3)>,
    last_step: StepStats,
}

impl PhysicsSystem {
    /// Create a physics system with an all-pairs broad phase.
    #[must_use]
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            broad_phase: Box::new(AllPairs::new()),
            candidates: Vec::new(),
            moved: Vec::new(),
            last_step: StepStats::default(),
        }
    }

    /// Replace the broad phase.
    #[must_use]
    pub fn with_broad_phase(mut self, broad_phase: impl BroadPhase + 'static) -> Self {
        self.broad_phase = Box::new(broad_phase);
        self
    }

    /// World settings.
    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// World settings. Changes apply from the next step.
    pub fn config_mut(&mut self) -> &mut PhysicsConfig {
        &mut self.config
    }

    /// Counters from the most recent step.
    #[must_use]
    pub fn last_step(&self) -> StepStats {
        self.last_step
    }

    /// Candidate pairs found by the most recent step.
    pub fn candidates(&self) -> &[CandidatePair] {
        &self.candidates
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// # Errors
    ///
    /// [`RegistryError::MissingComponent`] if a body has no [`Transform`].
    /// Every body has already been integrated by then, and only the
    /// transforms before the offending one were written.
    pub fn step(
        &mut self,
        registry: &mut Registry,
        events: &mut EventQueue,
        dt: f32,
    ) -> Result<StepStats, RegistryError> {
        for transform in registry.components_mut::<Transform>().values_mut() {
            transform.refresh_frame();
        }

        let PhysicsConfig {
            gravity,
            bounds,
            mass_model,
        } = self.config;

        self.moved.clear();
        for (entity, body) in registry.components_mut::<Body>().iter_mut() {
            integrate(body, gravity, dt);
            if clamp_to_bounds(body, &bounds) {
                trace!(%entity, "body clamped to world bounds");
            }
            self.moved.push((entity, body.position));
        }
        for &(entity, position) in &self.moved {
            registry.get_component_mut::<Transform>(entity)?.position = position;
        }

        let bodies = registry.components_mut::<Body>();
        self.broad_phase.find_pairs(bodies, &mut self.candidates);

        let mut collisions = 0;
        for pair in &self.candidates {
            let Some((a, b)) = bodies.get_pair_mut(pair.first, pair.second) else {
                continue;
            };
            if !resolve(a, b, mass_model).is_resolved() {
                continue;
            }
            collisions += 1;
            trace!(first = %pair.first, second = %pair.second, "collision resolved");
            events.raise_with(
                COLLISION_EVENT,
                CollisionEvent {
                    first: pair.first,
                    second: pair.second,
                },
            );
        }

        self.last_step = StepStats {
            bodies: self.moved.len(),
            candidates: self.candidates.len(),
            collisions,
        };
        debug!(
            bodies = self.last_step.bodies,
            candidates = self.last_step.candidates,
            collisions,
            dt,
            "physics step"
        );
        Ok(self.last_step)
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl System for PhysicsSystem {
    fn name(&self) -> &str {
        "physics"
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>) -> SystemResult {
        self.step(ctx.registry, ctx.events, ctx.dt)?;
        Ok(())
    }
}
