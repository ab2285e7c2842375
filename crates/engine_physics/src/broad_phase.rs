//! Broad-phase collision detection.
//!
//! A broad phase turns the set of bodies into candidate pairs whose world
//! bounds overlap. Candidates are conservative: the narrow phase decides
//! whether they actually touch.

use engine_component::{ComponentStore, Entity};
use engine_math::Aabb;

use crate::body::Body;

/// Two bodies whose bounds overlap. `first < second` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidatePair {
    /// The smaller entity handle.
    pub first: Entity,
    /// The larger entity handle.
    pub second: Entity,
}

impl CandidatePair {
    /// Order `a` and `b` into a pair. Returns `None` if they are the same.
    #[must_use]
    pub fn new(a: Entity, b: Entity) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Finds candidate pairs among a set of bodies.
pub trait BroadPhase: std::fmt::Debug {
    /// Replace the contents of `out` with every pair of distinct bodies whose
    /// world bounds overlap, each pair exactly once.
    fn find_pairs(&mut self, bodies: &ComponentStore<Body>, out: &mut Vec<CandidatePair>);
}

/// Tests every pair of bodies. Quadratic in the body count.
#[derive(Debug, Default)]
pub struct AllPairs {
    boxes: Vec<(Entity, Aabb)>,
}

impl AllPairs {
    /// Create an all-pairs broad phase with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BroadPhase for AllPairs {
    fn find_pairs(&mut self, bodies: &ComponentStore<Body>, out: &mut Vec<CandidatePair>) {
        out.clear();
        self.boxes.clear();
        self.boxes
            .extend(bodies.iter().map(|(entity, body)| (entity, body.world_aabb())));

        for (i, (a, box_a)) in self.boxes.iter().enumerate() {
            for (b, box_b) in &self.boxes[i + 1..] {
                if !box_a.intersects(box_b) {
                    continue;
                }
                if let Some(pair) = CandidatePair::new(*a, *b) {
                    out.push(pair);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use engine_component::Registry;
    use engine_math::Vec3;

    use super::*;

    fn spawn(registry: &mut Registry, body: Body) -> Entity {
        let e = registry.create_entity();
        registry.add_component(e, body).unwrap();
        e
    }

    #[test]
    fn test_pair_is_ordered_and_unique() {
        let mut registry = Registry::new();
        let low = registry.create_entity();
        let high = spawn(&mut registry, Body::sphere(1.0).with_position(Vec3::X));
        // Inserted after `high`, so storage order is the reverse of handle order.
        registry.add_component(low, Body::sphere(1.0)).unwrap();

        let mut out = Vec::new();
        AllPairs::new().find_pairs(registry.components_mut::<Body>(), &mut out);
        assert_eq!(
            out,
            vec![CandidatePair {
                first: low,
                second: high
            }]
        );
    }

    #[test]
    fn test_disjoint_bounds_never_pair_whatever_the_radius() {
        let mut registry = Registry::new();
        let mut a = Body::sphere(1.0);
        a.radius = 50.0;
        spawn(&mut registry, a);
        spawn(&mut registry, Body::sphere(1.0).with_position(Vec3::new(3.0, 0.0, 0.0)));

        let mut out = Vec::new();
        AllPairs::new().find_pairs(registry.components_mut::<Body>(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_touching_bounds_pair() {
        let mut registry = Registry::new();
        spawn(&mut registry, Body::sphere(1.0));
        spawn(&mut registry, Body::sphere(1.0).with_position(Vec3::new(2.0, 0.0, 0.0)));

        let mut out = Vec::new();
        AllPairs::new().find_pairs(registry.components_mut::<Body>(), &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_previous_results_are_replaced() {
        let mut registry = Registry::new();
        for i in 0..3 {
            spawn(&mut registry, Body::sphere(1.0).with_position(Vec3::splat(i as f32 * 0.5)));
        }
        let mut broad = AllPairs::new();
        let mut out = Vec::new();
        broad.find_pairs(registry.components_mut::<Body>(), &mut out);
        broad.find_pairs(registry.components_mut::<Body>(), &mut out);
        assert_eq!(out.len(), 3);

        let mut sorted = out.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
    }

    #[test]
    fn test_candidate_pair_rejects_self() {
        let e = Entity::from_raw_parts(0, 0);
        assert!(CandidatePair::new(e, e).is_none());
    }
}
