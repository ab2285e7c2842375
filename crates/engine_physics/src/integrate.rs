//! Per-body state integration and world-boundary collisions.

use engine_math::{Aabb, Vec3};

use crate::body::Body;

/// Advance `body` by `dt` with semi-implicit Euler.
///
/// Velocity is updated first from gravity and drag, then position from the
/// new velocity.
pub fn integrate(body: &mut Body, gravity: Vec3, dt: f32) {
    body.velocity += dt * (gravity - body.inv_mass * body.linear_drag * body.velocity);
    body.position += dt * body.velocity;
}

/// Push `body` back inside `bounds`, reflecting velocity on each axis where
/// its bounds crossed the world's.
///
/// Axes are handled independently; on each axis the lower bound is checked
/// first. Returns `true` if any axis was clamped.
pub fn clamp_to_bounds(body: &mut Body, bounds: &Aabb) -> bool {
    let world = body.world_aabb();
    let mut clamped = false;
    for axis in 0..3 {
        if world.min[axis] < bounds.min[axis] {
            body.position[axis] = bounds.min[axis] - body.aabb.min[axis];
        } else if world.max[axis] > bounds.max[axis] {
            body.position[axis] = bounds.max[axis] - body.aabb.max[axis];
        } else {
            continue;
        }
        body.velocity[axis] = -body.velocity[axis];
        clamped = true;
    }
    clamped
}
