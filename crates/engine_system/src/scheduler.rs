//! System scheduler — ordered, single-threaded lifecycle dispatch.
//!
//! Systems run strictly in registration order, one at a time. Writes made by
//! a system are visible to every system after it in the same phase. Events a
//! system raises are dispatched as soon as that system returns.

use std::any::Any;

use engine_component::Registry;
use tracing::{debug, error};

use crate::context::SystemContext;
use crate::error::{Phase, SchedulerError};
use crate::events::{EventBus, EventQueue};
use crate::system::System;

/// Borrowed scene state the scheduler threads through every system call.
#[derive(Debug)]
pub struct Frame<'a> {
    /// The scene registry.
    pub registry: &'a mut Registry,
    /// Pending events.
    pub events: &'a mut EventQueue,
    /// Event listeners.
    pub bus: &'a mut EventBus,
    /// Total elapsed time, in seconds.
    pub t: f32,
    /// Time since the previous frame, in seconds.
    pub dt: f32,
}

/// An ordered list of systems.
#[derive(Default)]
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
}

impl Scheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a system. It runs after every system added before it.
    pub fn add_system<S: System>(&mut self, system: S) {
        self.add_boxed(Box::new(system));
    }

    /// Append an already boxed system.
    pub fn add_boxed(&mut self, system: Box<dyn System>) {
        debug!(
            system = system.name(),
            position = self.systems.len(),
            "system registered"
        );
        self.systems.push(system);
    }

    /// Returns the number of registered systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if no systems are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// System names in execution order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// The first registered system of type `S`.
    #[must_use]
    pub fn get<S: System>(&self) -> Option<&S> {
        self.systems
            .iter()
            .find_map(|s| (s.as_ref() as &dyn Any).downcast_ref::<S>())
    }

    /// The first registered system of type `S`, mutably.
    #[must_use]
    pub fn get_mut<S: System>(&mut self) -> Option<&mut S> {
        self.systems
            .iter_mut()
            .find_map(|s| (s.as_mut() as &mut dyn Any).downcast_mut::<S>())
    }

    /// Drop every system.
    pub fn clear(&mut self) {
        self.systems.clear();
    }

    /// Run `phase` on every system in order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing system and returns
    /// [`SchedulerError::SystemFailed`]. Later systems do not run, and events
    /// still waiting for dispatch (those the failing system raised) are
    /// discarded.
    pub fn run(&mut self, phase: Phase, frame: Frame<'_>) -> Result<(), SchedulerError> {
        let Frame {
            registry,
            events,
            bus,
            t,
            dt,
        } = frame;

        for system in &mut self.systems {
            let mut ctx = SystemContext::new(registry, events, t, dt);
            let result = match phase {
                Phase::Init => system.init(&mut ctx),
                Phase::Update => system.update(&mut ctx),
                Phase::Draw => system.draw(&mut ctx),
                Phase::Cleanup => system.cleanup(&mut ctx),
            };

            if let Err(source) = result {
                let dropped = events.len();
                events.clear();
                error!(
                    system = system.name(),
                    %phase,
                    error = %source,
                    dropped_events = dropped,
                    "system failed"
                );
                return Err(SchedulerError::SystemFailed {
                    system: system.name().to_owned(),
                    phase,
                    source,
                });
            }

            bus.dispatch(events, registry);
        }
        Ok(())
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("systems", &self.names())
            .finish()
    }
}
