//! Fixed-timestep tick loop.
//!
//! Each tick advances the scene clock by one period and runs the scene's
//! `update` phase followed by its `draw` phase.

use std::time::{Duration, Instant};

use engine_system::{Scene, SchedulerError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Configuration for the tick loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
    /// Sleep between ticks to hold `tick_rate` in wall-clock time.
    pub realtime: bool,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 600,
            realtime: false,
        }
    }
}

/// Drives a [`Scene`] at a fixed timestep.
#[derive(Debug)]
pub struct TickLoop {
    /// Current tick counter.
    tick_id: u64,
    /// Seconds simulated so far.
    t: f64,
    config: TickConfig,
    scene: Scene,
}

impl TickLoop {
    /// Create a tick loop around an initialised scene.
    #[must_use]
    pub fn new(config: TickConfig, scene: Scene) -> Self {
        Self {
            tick_id: 0,
            t: 0.0,
            config,
            scene,
        }
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Returns the simulated time, in seconds.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.t
    }

    /// Consume the loop, returning the scene.
    #[must_use]
    pub fn into_scene(self) -> Scene {
        self.scene
    }

    /// Run one tick of `dt` seconds.
    ///
    /// # Errors
    ///
    /// The first system failure in either phase.
    pub fn tick(&mut self, dt: f64) -> Result<(), SchedulerError> {
        self.tick_id += 1;
        self.t += dt;
        debug!(tick_id = self.tick_id, t = self.t, dt, "tick start");

        let (t, dt) = (self.t as f32, dt as f32);
        self.scene.update(t, dt)?;
        self.scene.draw(t, dt)
    }

    /// Run for the configured number of ticks, or until a system fails.
    ///
    /// # Errors
    ///
    /// The first system failure; the loop stops at the failing tick.
    pub fn run(&mut self) -> Result<(), SchedulerError> {
        let tick_duration = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        let dt = tick_duration.as_secs_f64();
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            realtime = self.config.realtime,
            "starting tick loop"
        );

        loop {
            let start = Instant::now();

            self.tick(dt)?;

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, t = self.t, "tick loop complete");
                return Ok(());
            }

            let elapsed = start.elapsed();
            if elapsed > tick_duration {
                warn!(
                    tick_id = self.tick_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            } else if self.config.realtime {
                std::thread::sleep(tick_duration - elapsed);
            }
        }
    }
}
