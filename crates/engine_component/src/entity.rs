//! Entity handles and allocation.
//!
//! An [`Entity`] is a lightweight `index + generation` handle with no inherent
//! data. Indices freed by [`EntityAllocator::free`] are recycled with a bumped
//! generation, so a handle that outlives its entity never aliases a newer one.

use serde::{Deserialize, Serialize};

/// A unique entity handle.
///
/// Entities are pure identifiers — they carry no data of their own. Components
/// are attached to entities through the [`Registry`](crate::Registry).
///
/// Handles are totally ordered by index, then generation. Systems that need a
/// canonical order for a pair of entities use this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    /// Build a handle from its raw parts.
    #[must_use]
    pub const fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the slot index of this handle.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the generation of this handle.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

/// Allocates entity handles and tracks which of them are alive.
///
/// This allocator lives inside the registry and is the single source of truth
/// for entity identity.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    /// Current generation of every slot ever handed out.
    generations: Vec<u32>,
    /// Whether the slot's current generation is alive.
    alive: Vec<bool>,
    /// Freed slots waiting to be recycled.
    free: Vec<u32>,
    live: usize,
}

impl EntityAllocator {
    /// Creates a new, empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh entity handle.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` slots are in use at once.
    pub fn allocate(&mut self) -> Entity {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = index as usize;
            self.alive[slot] = true;
            return Entity::from_raw_parts(index, self.generations[slot]);
        }

        let index = u32::try_from(self.generations.len()).expect("entity index space exhausted");
        self.generations.push(0);
        self.alive.push(true);
        Entity::from_raw_parts(index, 0)
    }

    /// Retires a handle. Returns `false` if it was not alive.
    ///
    /// A slot whose generation counter would wrap is never recycled.
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let slot = entity.index as usize;
        self.alive[slot] = false;
        self.live -= 1;
        if let Some(next) = self.generations[slot].checked_add(1) {
            self.generations[slot] = next;
            self.free.push(entity.index);
        }
        true
    }

    /// Returns `true` if `entity` is the current, live generation of its slot.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        let slot = entity.index as usize;
        self.alive.get(slot).copied().unwrap_or(false) && self.generations[slot] == entity.generation
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn count(&self) -> usize {
        self.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_produces_unique_handles() {
        let mut alloc = EntityAllocator::new();
        let e1 = alloc.allocate();
        let e2 = alloc.allocate();
        let e3 = alloc.allocate();
        assert_eq!(e1.index(), 0);
        assert_eq!(e2.index(), 1);
        assert_eq!(e3.index(), 2);
        assert!(e1 < e2 && e2 < e3);
        assert_eq!(alloc.count(), 3);
    }

    #[test]
    fn test_freed_slot_is_recycled_with_new_generation() {
        let mut alloc = EntityAllocator::new();
        let old = alloc.allocate();
        assert!(alloc.free(old));
        assert!(!alloc.is_alive(old));

        let new = alloc.allocate();
        assert_eq!(new.index(), old.index());
        assert_eq!(new.generation(), old.generation() + 1);
        assert_ne!(new, old);
        assert!(alloc.is_alive(new));
        assert!(!alloc.is_alive(old));
    }

    #[test]
    fn test_double_free_is_rejected() {
        let mut alloc = EntityAllocator::new();
        let e = alloc.allocate();
        assert!(alloc.free(e));
        assert!(!alloc.free(e));
        assert_eq!(alloc.count(), 0);
    }

    #[test]
    fn test_unknown_handle_is_not_alive() {
        let alloc = EntityAllocator::new();
        assert!(!alloc.is_alive(Entity::from_raw_parts(7, 0)));
    }

    #[test]
    fn test_exhausted_generation_is_retired() {
        let mut alloc = EntityAllocator::new();
        let e = alloc.allocate();
        alloc.generations[0] = u32::MAX;
        let last = Entity::from_raw_parts(e.index(), u32::MAX);
        assert!(alloc.free(last));
        let fresh = alloc.allocate();
        assert_ne!(fresh.index(), e.index());
    }

    #[test]
    fn test_entity_serialization_roundtrip() {
        let entity = Entity::from_raw_parts(12, 3);
        let json = serde_json::to_string(&entity).unwrap();
        let restored: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(entity, restored);
    }
}
