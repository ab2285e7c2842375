//! Dense per-type component storage.
//!
//! A [`ComponentStore`] keeps its values in a packed `Vec` with a parallel
//! entity vector and an entity → row index. Iteration follows insertion order
//! until a removal swaps the last row into the hole.

use std::any::Any;
use std::collections::HashMap;

use crate::component::Component;
use crate::entity::Entity;

/// Homogeneous storage for every component of type `T`.
#[derive(Debug)]
pub struct ComponentStore<T> {
    /// `entities[i]` owns `values[i]`.
    entities: Vec<Entity>,
    values: Vec<T>,
    rows: HashMap<Entity, usize>,
}

impl<T> ComponentStore<T> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            values: Vec::new(),
            rows: HashMap::new(),
        }
    }

    /// Returns the number of stored components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the store holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if `entity` has a component in this store.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.rows.contains_key(&entity)
    }

    /// Returns the component owned by `entity`.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.rows.get(&entity).map(|&row| &self.values[row])
    }

    /// Returns the component owned by `entity` mutably.
    #[must_use]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let row = *self.rows.get(&entity)?;
        Some(&mut self.values[row])
    }

    /// Borrow the components of two distinct entities mutably at once.
    ///
    /// Returns `None` if `a == b` or either entity is absent.
    #[must_use]
    pub fn get_pair_mut(&mut self, a: Entity, b: Entity) -> Option<(&mut T, &mut T)> {
        let row_a = *self.rows.get(&a)?;
        let row_b = *self.rows.get(&b)?;
        if row_a == row_b {
            return None;
        }
        if row_a < row_b {
            let (head, tail) = self.values.split_at_mut(row_b);
            Some((&mut head[row_a], &mut tail[0]))
        } else {
            let (head, tail) = self.values.split_at_mut(row_a);
            Some((&mut tail[0], &mut head[row_b]))
        }
    }

    /// The owning entities, in storage order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate `(entity, component)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.values.iter())
    }

    /// Iterate `(entity, component)` pairs mutably in storage order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.values.iter_mut())
    }

    /// Iterate the components mutably, without their owners.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.values.iter_mut()
    }

    /// Structural changes go through the registry so the store never holds an
    /// entity the registry considers dead.
    pub(crate) fn insert(&mut self, entity: Entity, value: T) -> bool {
        if self.rows.contains_key(&entity) {
            return false;
        }
        self.rows.insert(entity, self.values.len());
        self.entities.push(entity);
        self.values.push(value);
        true
    }

    pub(crate) fn remove(&mut self, entity: Entity) -> Option<T> {
        let row = self.rows.remove(&entity)?;
        self.entities.swap_remove(row);
        let value = self.values.swap_remove(row);
        if let Some(&moved) = self.entities.get(row) {
            self.rows.insert(moved, row);
        }
        Some(value)
    }
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a [`ComponentStore`], so the registry can purge an
/// entity from every store without knowing their types.
pub(crate) trait ErasedStore {
    fn remove_entity(&mut self, entity: Entity) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStore for ComponentStore<T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(index: u32) -> Entity {
        Entity::from_raw_parts(index, 0)
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut store = ComponentStore::new();
        for i in [4, 1, 9] {
            assert!(store.insert(e(i), i * 10));
        }
        let order: Vec<_> = store.iter().map(|(ent, &v)| (ent.index(), v)).collect();
        assert_eq!(order, vec![(4, 40), (1, 10), (9, 90)]);
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut store = ComponentStore::new();
        assert!(store.insert(e(1), 1));
        assert!(!store.insert(e(1), 2));
        assert_eq!(store.get(e(1)), Some(&1));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_keeps_rows_consistent() {
        let mut store = ComponentStore::new();
        for i in 0..4 {
            store.insert(e(i), i);
        }
        assert_eq!(store.remove(e(1)), Some(1));
        assert_eq!(store.remove(e(1)), None);
        assert_eq!(store.len(), 3);
        for i in [0, 2, 3] {
            assert_eq!(store.get(e(i)), Some(&i));
        }
        assert!(!store.contains(e(1)));
    }

    #[test]
    fn test_get_pair_mut_both_orders() {
        let mut store = ComponentStore::new();
        store.insert(e(0), 1);
        store.insert(e(1), 2);

        let (a, b) = store.get_pair_mut(e(0), e(1)).unwrap();
        *a += 10;
        *b += 20;
        let (b, a) = store.get_pair_mut(e(1), e(0)).unwrap();
        assert_eq!((*a, *b), (11, 22));
    }

    #[test]
    fn test_get_pair_mut_rejects_same_or_missing() {
        let mut store = ComponentStore::new();
        store.insert(e(0), 1);
        assert!(store.get_pair_mut(e(0), e(0)).is_none());
        assert!(store.get_pair_mut(e(0), e(5)).is_none());
    }
}
