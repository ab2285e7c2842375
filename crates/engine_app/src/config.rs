//! Host configuration, loaded from an optional JSON file.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use engine_physics::PhysicsConfig;
use serde::{Deserialize, Serialize};

use crate::tick::TickConfig;

/// Number of balls spawned when the configuration does not say.
pub const DEFAULT_BALLS: usize = 10;

/// Everything the playground binary can be configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Tick loop pacing.
    pub tick: TickConfig,
    /// World settings for the physics system.
    pub physics: PhysicsConfig,
    /// Balls spawned in the playground scene.
    pub balls: usize,
}

impl AppConfig {
    /// Read a configuration file. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// If the file cannot be read, is not valid JSON, or fails
    /// [`AppConfig::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the tick loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        let rate = self.tick.tick_rate;
        ensure!(
            rate.is_finite() && rate > 0.0,
            "tick_rate must be a positive number of ticks per second, got {rate}"
        );
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick: TickConfig::default(),
            physics: PhysicsConfig::default(),
            balls: DEFAULT_BALLS,
        }
    }
}
