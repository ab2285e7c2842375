//! # engine_component
//!
//! The "E" and "C" of the ECS — entity identity and per-type component
//! storage.
//!
//! This crate provides:
//!
//! - [`Component`] trait — the contract all registry data must satisfy.
//! - [`Entity`] — `index + generation` handles that detect stale references.
//! - [`EntityAllocator`] — handle allocation with generation-checked recycling.
//! - [`ComponentStore`] — dense, insertion-ordered storage for one type.
//! - [`Registry`] — the scene's entity set and type-indexed stores.

pub mod component;
pub mod entity;
pub mod error;
pub mod registry;
pub mod storage;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use error::RegistryError;
pub use registry::{Components, Registry};
pub use storage::ComponentStore;
