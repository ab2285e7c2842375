//! The collision playground scene.
//!
//! A row of unit balls launched to the right inside the default world box.
//! Gravity pulls them down, the walls and each other bounce them around.

use std::cell::Cell;
use std::rc::Rc;

use engine_component::{Entity, Registry, RegistryError};
use engine_math::{Transform, Vec3};
use engine_physics::{Body, COLLISION_EVENT, CollisionEvent, PhysicsConfig, PhysicsSystem};
use engine_system::{Logic, LogicSystem, Scene, System, SystemContext, SystemResult};
use tracing::{debug, info, trace};

/// Linear drag given to every ball.
pub const BALL_DRAG: f32 = 0.1;

/// Rate of the per-scene status logic, in hertz.
const STATUS_HZ: f32 = 1.0;

/// Where ball `i` starts.
#[must_use]
pub fn ball_position(i: usize) -> Vec3 {
    let i = i as f32;
    Vec3::new(0.9 * i - 3.5, 0.3 * i, 0.0)
}

/// Spawn a ball with matching body and transform.
///
/// # Errors
///
/// Only if the registry rejects the components, which cannot happen for a
/// freshly created entity.
pub fn spawn_ball(
    registry: &mut Registry,
    position: Vec3,
    velocity: Vec3,
    radius: f32,
) -> Result<Entity, RegistryError> {
    let ball = registry.create_entity();
    let body = Body::sphere(radius)
        .with_linear_drag(BALL_DRAG)
        .with_position(position)
        .with_velocity(velocity);
    registry.add_component(ball, body)?;
    registry.add_component(
        ball,
        Transform::from_position(position).with_scale(Vec3::splat(radius)),
    )?;
    Ok(ball)
}

/// Counts collision events seen by the scene.
#[derive(Debug, Clone, Default)]
pub struct CollisionCounter(Rc<Cell<u64>>);

impl CollisionCounter {
    /// Collisions counted so far.
    #[must_use]
    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

/// Stand-in for a renderer: reads every transform frame in the draw phase.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    frames: u64,
}

impl FrameRecorder {
    /// Draw phases observed so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl System for FrameRecorder {
    fn name(&self) -> &str {
        "frame_recorder"
    }

    fn draw(&mut self, ctx: &mut SystemContext<'_>) -> SystemResult {
        self.frames += 1;
        for (entity, transform) in ctx.registry.components::<Transform>().iter() {
            let translation = transform.frame.w_axis.truncate();
            trace!(%entity, x = translation.x, y = translation.y, z = translation.z, "frame");
        }
        Ok(())
    }

    fn cleanup(&mut self, _ctx: &mut SystemContext<'_>) -> SystemResult {
        debug!(frames = self.frames(), "frame recorder finished");
        Ok(())
    }
}

/// Build and initialise the playground with `balls` balls.
///
/// # Errors
///
/// Propagates registry or system failures during setup.
pub fn build(
    balls: usize,
    physics: PhysicsConfig,
) -> anyhow::Result<(Scene, CollisionCounter)> {
    let mut scene = Scene::new();
    scene.add_system(LogicSystem::new());
    scene.add_system(PhysicsSystem::new(physics));
    scene.add_system(FrameRecorder::default());

    let counter = CollisionCounter::default();
    let hits = Rc::clone(&counter.0);
    scene.on_event(COLLISION_EVENT, move |event, _registry| {
        hits.set(hits.get() + 1);
        if let Some(CollisionEvent { first, second }) = event.data::<CollisionEvent>() {
            debug!(%first, %second, "collision");
        }
    });

    scene.init()?;

    let registry = scene.registry_mut();
    for i in 0..balls {
        spawn_ball(registry, ball_position(i), Vec3::X, 1.0)?;
    }

    let status = registry.create_entity();
    let seen = Rc::clone(&counter.0);
    registry.add_component(
        status,
        Logic::new(move |_, registry: &mut Registry, t, _| {
            info!(
                t,
                collisions = seen.get(),
                bodies = registry.components::<Body>().len(),
                "playground status"
            );
            Ok(())
        })
        .with_rate(STATUS_HZ),
    )?;

    info!(balls, "playground ready");
    Ok((scene, counter))
}
