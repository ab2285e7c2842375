//! Fixed-rate game logic callbacks.
//!
//! A [`Logic`] component carries a callback and a period. [`LogicSystem`]
//! accumulates frame time for every `Logic` and fires the callback whenever
//! the accumulated time exceeds the period.

use engine_component::{Component, Entity, Registry};

use crate::context::SystemContext;
use crate::system::{System, SystemResult};

/// Default logic rate, in hertz.
pub const DEFAULT_LOGIC_HZ: f32 = 30.0;

/// Callback receiving `(owner, registry, t, period)`.
///
/// The owning [`Logic`] is detached while the callback runs, so the callback
/// may freely read and write the registry, including its own entity.
pub type LogicFn = Box<dyn FnMut(Entity, &mut Registry, f32, f32) -> SystemResult>;

/// A periodic callback attached to an entity.
pub struct Logic {
    /// `None` only while the callback is running.
    callback: Option<LogicFn>,
    /// Seconds between calls.
    pub inv_hz: f32,
    timer: f32,
}

impl Logic {
    /// Run `callback` at [`DEFAULT_LOGIC_HZ`].
    #[must_use]
    pub fn new<F>(callback: F) -> Self
    where
        F: FnMut(Entity, &mut Registry, f32, f32) -> SystemResult + 'static,
    {
        Self {
            callback: Some(Box::new(callback)),
            inv_hz: 1.0 / DEFAULT_LOGIC_HZ,
            timer: 0.0,
        }
    }

    /// Run at `hz` calls per second instead.
    #[must_use]
    pub fn with_rate(mut self, hz: f32) -> Self {
        self.inv_hz = 1.0 / hz;
        self
    }

    /// Time accumulated since the last call.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.timer
    }

    /// Accumulate `dt`. Returns `true` and resets the timer once the period
    /// is exceeded.
    fn advance(&mut self, dt: f32) -> bool {
        self.timer += dt;
        if self.timer <= self.inv_hz {
            return false;
        }
        self.timer = 0.0;
        true
    }
}

impl Component for Logic {
    fn type_name() -> &'static str {
        "Logic"
    }
}

impl std::fmt::Debug for Logic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logic")
            .field("inv_hz", &self.inv_hz)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

/// Drives every [`Logic`] component in the registry.
///
/// Timers advance for all logics first; the due callbacks then run in store
/// order, each with full registry access.
#[derive(Debug, Default)]
pub struct LogicSystem {
    due: Vec<Entity>,
}

impl LogicSystem {
    /// Create a logic system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for LogicSystem {
    fn name(&self) -> &str {
        "logic"
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>) -> SystemResult {
        let (t, dt) = (ctx.t, ctx.dt);
        self.due.clear();
        self.due.extend(
            ctx.registry
                .components_mut::<Logic>()
                .iter_mut()
                .filter_map(|(entity, logic)| logic.advance(dt).then_some(entity)),
        );

        for &entity in &self.due {
            let Ok(logic) = ctx.registry.get_component_mut::<Logic>(entity) else {
                // Removed by an earlier callback this frame.
                continue;
            };
            let period = logic.inv_hz;
            let Some(mut callback) = logic.callback.take() else {
                continue;
            };

            let result = callback(entity, &mut *ctx.registry, t, period);

            // The callback may have removed or replaced its own logic.
            if let Ok(logic) = ctx.registry.get_component_mut::<Logic>(entity) {
                if logic.callback.is_none() {
                    logic.callback = Some(callback);
                }
            }
            result?;
        }
        Ok(())
    }
}
