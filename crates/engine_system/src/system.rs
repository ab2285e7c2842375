//! The [`System`] trait.

use std::any::Any;

use crate::context::SystemContext;
use crate::error::SystemError;

/// Result of a single system hook.
pub type SystemResult = Result<(), SystemError>;

/// A unit of per-frame behaviour driven by the [`Scheduler`](crate::Scheduler).
///
/// All hooks default to doing nothing, so a system only implements the phases
/// it cares about. Hooks receive the registry through [`SystemContext`]; a
/// system holds no reference to the scene between calls.
pub trait System: Any {
    /// Human-readable name used in logs and errors.
    fn name(&self) -> &str;

    /// Called once before the first frame.
    fn init(&mut self, _ctx: &mut SystemContext<'_>) -> SystemResult {
        Ok(())
    }

    /// Advance simulation state by `ctx.dt`.
    fn update(&mut self, _ctx: &mut SystemContext<'_>) -> SystemResult {
        Ok(())
    }

    /// Present state. Runs after every system's `update` for the frame.
    fn draw(&mut self, _ctx: &mut SystemContext<'_>) -> SystemResult {
        Ok(())
    }

    /// Called once when the scene is torn down.
    fn cleanup(&mut self, _ctx: &mut SystemContext<'_>) -> SystemResult {
        Ok(())
    }
}
