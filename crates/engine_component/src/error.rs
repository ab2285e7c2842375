//! Registry error types.

use crate::entity::Entity;

/// Errors raised by [`Registry`](crate::Registry) operations.
///
/// These indicate scene-construction bugs and are not recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The entity has no component of the requested type.
    #[error("{entity} has no {component} component")]
    MissingComponent {
        /// The queried entity.
        entity: Entity,
        /// Name of the missing component type.
        component: &'static str,
    },

    /// The entity already has a component of this type.
    #[error("{entity} already has a {component} component")]
    DuplicateComponent {
        /// The target entity.
        entity: Entity,
        /// Name of the duplicated component type.
        component: &'static str,
    },

    /// The handle refers to an entity that was removed or never allocated.
    #[error("{0} is not alive")]
    DeadEntity(Entity),
}
