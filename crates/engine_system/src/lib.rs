//! # engine_system
//!
//! Frame scheduling for the simulation core.
//!
//! A [`Scene`] owns a [`Registry`](engine_component::Registry), an ordered
//! [`Scheduler`] of [`System`]s and an [`EventBus`]. Each frame the host calls
//! [`Scene::update`] then [`Scene::draw`]; systems run one after another in
//! registration order, and events they raise are dispatched as soon as the
//! raising system returns.
//!
//! ## Usage
//!
//! ```rust
//! use engine_system::{Scene, System, SystemContext, SystemResult};
//!
//! struct Spawner;
//!
//! impl System for Spawner {
//!     fn name(&self) -> &str { "spawner" }
//!
//!     fn update(&mut self, ctx: &mut SystemContext<'_>) -> SystemResult {
//!         ctx.registry.create_entity();
//!         Ok(())
//!     }
//! }
//!
//! let mut scene = Scene::new();
//! scene.add_system(Spawner);
//! scene.init().unwrap();
//! scene.update(0.0, 1.0 / 60.0).unwrap();
//! assert_eq!(scene.registry().entity_count(), 1);
//! ```

pub mod context;
pub mod error;
pub mod events;
pub mod group;
pub mod logic;
pub mod scene;
pub mod scheduler;
pub mod system;

pub use context::SystemContext;
pub use error::{Phase, SchedulerError, SystemError};
pub use events::{Event, EventBus, EventQueue, Listener};
pub use group::SystemGroup;
pub use logic::{Logic, LogicSystem};
pub use scene::Scene;
pub use scheduler::{Frame, Scheduler};
pub use system::{System, SystemResult};
