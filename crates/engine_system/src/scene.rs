//! The [`Scene`] — a registry, its systems and its event listeners.
//!
//! The host loop owns a scene and drives it with [`Scene::update`] and
//! [`Scene::draw`] once per frame. Nothing here is global; every system gets
//! the registry through its [`SystemContext`](crate::SystemContext).

use engine_component::Registry;
use tracing::info;

use crate::error::{Phase, SchedulerError};
use crate::events::{Event, EventBus, EventQueue};
use crate::scheduler::{Frame, Scheduler};
use crate::system::System;

/// One simulated world.
#[derive(Debug, Default)]
pub struct Scene {
    registry: Registry,
    events: EventQueue,
    bus: EventBus,
    scheduler: Scheduler,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The scene's registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The scene's registry, mutably. Use between frames for scene setup.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The scene's systems.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Append a system to the frame.
    pub fn add_system<S: System>(&mut self, system: S) {
        self.scheduler.add_system(system);
    }

    /// The first system of type `S`.
    #[must_use]
    pub fn system<S: System>(&self) -> Option<&S> {
        self.scheduler.get()
    }

    /// The first system of type `S`, mutably.
    #[must_use]
    pub fn system_mut<S: System>(&mut self) -> Option<&mut S> {
        self.scheduler.get_mut()
    }

    /// Subscribe to events named `name` (case-insensitive).
    pub fn on_event<F>(&mut self, name: &str, listener: F)
    where
        F: FnMut(&Event, &mut Registry) + 'static,
    {
        self.bus.on(name, listener);
    }

    /// Raise an event from outside any system. It is delivered with the next
    /// dispatch, i.e. after the first system of the next phase returns.
    pub fn raise(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Run every system's `init` hook.
    ///
    /// # Errors
    ///
    /// Returns the first system failure.
    pub fn init(&mut self) -> Result<(), SchedulerError> {
        self.run(Phase::Init, 0.0, 0.0)?;
        info!(
            systems = self.scheduler.len(),
            entities = self.registry.entity_count(),
            "scene initialised"
        );
        Ok(())
    }

    /// Advance the simulation: every system's `update` hook, in order.
    ///
    /// # Errors
    ///
    /// Returns the first system failure; the rest of the frame is skipped.
    pub fn update(&mut self, t: f32, dt: f32) -> Result<(), SchedulerError> {
        self.run(Phase::Update, t, dt)
    }

    /// Present the frame: every system's `draw` hook, in order.
    ///
    /// # Errors
    ///
    /// Returns the first system failure.
    pub fn draw(&mut self, t: f32, dt: f32) -> Result<(), SchedulerError> {
        self.run(Phase::Draw, t, dt)
    }

    /// Run every system's `cleanup` hook, then drop all systems.
    ///
    /// # Errors
    ///
    /// Returns the first system failure. Systems are dropped regardless.
    pub fn cleanup(&mut self) -> Result<(), SchedulerError> {
        let result = self.run(Phase::Cleanup, 0.0, 0.0);
        self.scheduler.clear();
        info!("scene cleaned up");
        result
    }

    fn run(&mut self, phase: Phase, t: f32, dt: f32) -> Result<(), SchedulerError> {
        self.scheduler.run(
            phase,
            Frame {
                registry: &mut self.registry,
                events: &mut self.events,
                bus: &mut self.bus,
                t,
                dt,
            },
        )
    }
}
