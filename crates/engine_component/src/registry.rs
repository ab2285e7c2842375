//! The component registry.
//!
//! The [`Registry`] owns entity allocation and one [`ComponentStore`] per
//! component type. It is the single source of truth every system queries.

use std::collections::HashMap;

use tracing::trace;

use crate::component::{Component, ComponentTypeId};
use crate::entity::{Entity, EntityAllocator};
use crate::error::RegistryError;
use crate::storage::{ComponentStore, ErasedStore};

/// Entity and component storage for one scene.
#[derive(Default)]
pub struct Registry {
    /// Entity handle allocator.
    allocator: EntityAllocator,
    /// Live entities in creation order.
    entities: Vec<Entity>,
    /// One store per component type.
    stores: HashMap<ComponentTypeId, Box<dyn ErasedStore>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity with no components.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.entities.push(entity);
        trace!(%entity, "entity created");
        entity
    }

    /// Remove an entity and every component attached to it.
    ///
    /// Returns `true` if the entity was alive.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        if !self.allocator.free(entity) {
            return false;
        }
        if let Some(pos) = self.entities.iter().position(|&e| e == entity) {
            self.entities.remove(pos);
        }
        let mut purged = 0usize;
        for store in self.stores.values_mut() {
            if store.remove_entity(entity) {
                purged += 1;
            }
        }
        trace!(%entity, purged, "entity removed");
        true
    }

    /// Returns `true` if `entity` is alive in this registry.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Live entities in the order they were created.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Attach `component` to `entity`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateComponent`] if the entity already has a `T`,
    /// [`RegistryError::DeadEntity`] if the handle is stale.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<(), RegistryError> {
        if !self.is_alive(entity) {
            return Err(RegistryError::DeadEntity(entity));
        }
        if self.components_mut::<T>().insert(entity, component) {
            Ok(())
        } else {
            Err(RegistryError::DuplicateComponent {
                entity,
                component: T::type_name(),
            })
        }
    }

    /// Look up the `T` attached to `entity`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::MissingComponent`] if there is none,
    /// [`RegistryError::DeadEntity`] if the handle is stale.
    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, RegistryError> {
        if !self.is_alive(entity) {
            return Err(RegistryError::DeadEntity(entity));
        }
        self.store::<T>()
            .and_then(|store| store.get(entity))
            .ok_or(RegistryError::MissingComponent {
                entity,
                component: T::type_name(),
            })
    }

    /// Look up the `T` attached to `entity` mutably.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::get_component`].
    pub fn get_component_mut<T: Component>(
        &mut self,
        entity: Entity,
    ) -> Result<&mut T, RegistryError> {
        if !self.is_alive(entity) {
            return Err(RegistryError::DeadEntity(entity));
        }
        self.store_mut::<T>()
            .and_then(|store| store.get_mut(entity))
            .ok_or(RegistryError::MissingComponent {
                entity,
                component: T::type_name(),
            })
    }

    /// Returns `true` if `entity` has a `T`.
    #[must_use]
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.store::<T>().is_some_and(|store| store.contains(entity))
    }

    /// Detach and return the `T` attached to `entity`, if any.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.store_mut::<T>()?.remove(entity)
    }

    /// All components of type `T`. Empty if the type was never populated.
    #[must_use]
    pub fn components<T: Component>(&self) -> Components<'_, T> {
        Components {
            store: self.store::<T>(),
        }
    }

    /// The live backing store for `T`, created on first use.
    pub fn components_mut<T: Component>(&mut self) -> &mut ComponentStore<T> {
        let store = self
            .stores
            .entry(ComponentTypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStore::<T>::new()));
        store
            .as_any_mut()
            .downcast_mut::<ComponentStore<T>>()
            .expect("store registered under another type's id")
    }

    fn store<T: Component>(&self) -> Option<&ComponentStore<T>> {
        self.stores
            .get(&ComponentTypeId::of::<T>())
            .and_then(|store| store.as_any().downcast_ref())
    }

    fn store_mut<T: Component>(&mut self) -> Option<&mut ComponentStore<T>> {
        self.stores
            .get_mut(&ComponentTypeId::of::<T>())
            .and_then(|store| store.as_any_mut().downcast_mut())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("entities", &self.entities.len())
            .field("stores", &self.stores.len())
            .finish()
    }
}

/// Read-only view over every `T` in a [`Registry`].
#[derive(Debug)]
pub struct Components<'a, T> {
    store: Option<&'a ComponentStore<T>>,
}

impl<'a, T> Components<'a, T> {
    /// Returns the number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.map_or(0, ComponentStore::len)
    }

    /// Returns `true` if there are no components of this type.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the component owned by `entity`.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&'a T> {
        self.store?.get(entity)
    }

    /// Returns `true` if `entity` owns a component of this type.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.store.is_some_and(|store| store.contains(entity))
    }

    /// The owning entities, in storage order.
    #[must_use]
    pub fn entities(&self) -> &'a [Entity] {
        match self.store {
            Some(store) => store.entities(),
            None => &[],
        }
    }

    /// Iterate `(entity, component)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &'a T)> + 'a {
        self.store.into_iter().flat_map(|store| store.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Health(f32);

    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Name(&'static str);

    impl Component for Name {
        fn type_name() -> &'static str {
            "Name"
        }
    }

    #[test]
    fn test_has_component_after_add_and_remove_entity() {
        let mut registry = Registry::new();
        let e = registry.create_entity();
        assert!(!registry.has_component::<Health>(e));

        registry.add_component(e, Health(10.0)).unwrap();
        assert!(registry.has_component::<Health>(e));

        assert!(registry.remove_entity(e));
        assert!(!registry.has_component::<Health>(e));
        assert!(!registry.is_alive(e));
    }

    #[test]
    fn test_duplicate_component_is_rejected() {
        let mut registry = Registry::new();
        let e = registry.create_entity();
        registry.add_component(e, Health(1.0)).unwrap();

        let err = registry.add_component(e, Health(2.0)).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateComponent {
                entity: e,
                component: "Health"
            }
        );
        // The original value is kept.
        assert_eq!(registry.get_component::<Health>(e).unwrap(), &Health(1.0));
    }

    #[test]
    fn test_missing_component_error() {
        let mut registry = Registry::new();
        let e = registry.create_entity();
        registry.add_component(e, Name("ball")).unwrap();

        let err = registry.get_component::<Health>(e).unwrap_err();
        assert_eq!(
            err,
            RegistryError::MissingComponent {
                entity: e,
                component: "Health"
            }
        );
        assert!(registry.get_component_mut::<Health>(e).is_err());
    }

    #[test]
    fn test_stale_handle_is_detected() {
        let mut registry = Registry::new();
        let old = registry.create_entity();
        registry.remove_entity(old);
        let new = registry.create_entity();
        assert_eq!(new.index(), old.index());

        assert_eq!(
            registry.add_component(old, Health(1.0)),
            Err(RegistryError::DeadEntity(old))
        );
        registry.add_component(new, Health(2.0)).unwrap();
        assert!(!registry.has_component::<Health>(old));
        assert_eq!(
            registry.get_component::<Health>(old),
            Err(RegistryError::DeadEntity(old))
        );
        assert!(!registry.remove_entity(old));
        assert!(registry.is_alive(new));
    }

    #[test]
    fn test_components_of_unpopulated_type_is_empty() {
        let registry = Registry::new();
        let all = registry.components::<Health>();
        assert!(all.is_empty());
        assert_eq!(all.iter().count(), 0);
        assert!(all.entities().is_empty());
    }

    #[test]
    fn test_entities_in_creation_order_modulo_removals() {
        let mut registry = Registry::new();
        let a = registry.create_entity();
        let b = registry.create_entity();
        let c = registry.create_entity();
        registry.remove_entity(b);
        let d = registry.create_entity();
        assert_eq!(registry.entities(), &[a, c, d]);
        assert_eq!(registry.entity_count(), 3);
    }

    #[test]
    fn test_component_entities_are_always_live() {
        let mut registry = Registry::new();
        let mut spawned = Vec::new();
        for i in 0..6 {
            let e = registry.create_entity();
            registry.add_component(e, Health(i as f32)).unwrap();
            if i % 2 == 0 {
                registry.add_component(e, Name("even")).unwrap();
            }
            spawned.push(e);
        }
        registry.remove_entity(spawned[0]);
        registry.remove_entity(spawned[3]);

        for (e, _) in registry.components::<Health>().iter() {
            assert!(registry.entities().contains(&e));
        }
        for (e, _) in registry.components::<Name>().iter() {
            assert!(registry.entities().contains(&e));
        }
        assert_eq!(registry.components::<Health>().len(), 4);
        assert_eq!(registry.components::<Name>().len(), 2);
    }

    #[test]
    fn test_remove_component() {
        let mut registry = Registry::new();
        let e = registry.create_entity();
        registry.add_component(e, Health(3.0)).unwrap();
        assert_eq!(registry.remove_component::<Health>(e), Some(Health(3.0)));
        assert_eq!(registry.remove_component::<Health>(e), None);
        assert_eq!(registry.remove_component::<Name>(e), None);
        assert!(registry.is_alive(e));
    }

    #[test]
    fn test_components_mut_writes_are_visible() {
        let mut registry = Registry::new();
        let e = registry.create_entity();
        registry.add_component(e, Health(1.0)).unwrap();
        for health in registry.components_mut::<Health>().values_mut() {
            health.0 += 1.0;
        }
        assert_eq!(registry.get_component::<Health>(e).unwrap(), &Health(2.0));
    }
}
