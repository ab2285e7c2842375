//! System and scheduler error types.

use engine_component::RegistryError;

/// A lifecycle phase of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// One-time setup, before the first frame.
    Init,
    /// Simulation step.
    Update,
    /// Presentation step, after `Update`.
    Draw,
    /// One-time teardown.
    Cleanup,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::Update => "update",
            Self::Draw => "draw",
            Self::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// Errors a system hook may return.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// A registry operation failed, e.g. a required component is missing.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Any other failure raised by system code.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors surfaced by the scheduler. The first failing system aborts the phase.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// A system hook returned an error.
    #[error("system '{system}' failed during {phase}")]
    SystemFailed {
        /// Name of the failing system.
        system: String,
        /// Phase that was running.
        phase: Phase,
        /// The underlying error.
        #[source]
        source: SystemError,
    },
}
