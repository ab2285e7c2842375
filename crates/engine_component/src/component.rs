//! Core [`Component`] trait and type identity.
//!
//! Every piece of data stored in the registry must implement [`Component`].
//! Stores are indexed by [`ComponentTypeId`], a compile-time type token, so
//! lookups never inspect values at runtime.

use std::any::TypeId;

/// A unique identifier for a component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentTypeId(TypeId);

impl ComponentTypeId {
    /// Returns the [`ComponentTypeId`] for a component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self(TypeId::of::<T>())
    }
}

/// The core component trait.
///
/// Components are plain values owned by the registry. The trait only asks for
/// a human-readable name, used in errors and diagnostics.
///
/// # Examples
///
/// ```rust
/// use engine_component::Component;
///
/// #[derive(Debug, Clone)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: 'static {
    /// A human-readable name for this component type.
    fn type_name() -> &'static str;

    /// Returns the [`ComponentTypeId`] for this component.
    fn component_type_id() -> ComponentTypeId
    where
        Self: Sized,
    {
        ComponentTypeId::of::<Self>()
    }
}
