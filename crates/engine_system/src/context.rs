//! Per-call execution context provided to system hooks.

use engine_component::Registry;

use crate::events::EventQueue;

/// Context provided to a system on every lifecycle call.
///
/// Gives the system exclusive access to the registry for the duration of the
/// call, an event queue to raise notifications into, and frame timing.
#[derive(Debug)]
pub struct SystemContext<'a> {
    /// The scene's entities and components.
    pub registry: &'a mut Registry,
    /// Events raised here are dispatched once the current system returns.
    pub events: &'a mut EventQueue,
    /// Total elapsed time, in seconds.
    pub t: f32,
    /// Time since the previous frame, in seconds.
    pub dt: f32,
}

impl<'a> SystemContext<'a> {
    /// Create a context for one call.
    #[must_use]
    pub fn new(registry: &'a mut Registry, events: &'a mut EventQueue, t: f32, dt: f32) -> Self {
        Self {
            registry,
            events,
            t,
            dt,
        }
    }
}
