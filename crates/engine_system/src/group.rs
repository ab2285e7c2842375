//! Composite systems.

use tracing::debug;

use crate::context::SystemContext;
use crate::system::{System, SystemResult};

/// Runs a fixed list of child systems, in order, as a single system.
///
/// Children share the group's slot in the scheduler: events they raise are
/// dispatched after the whole group returns.
pub struct SystemGroup {
    name: String,
    systems: Vec<Box<dyn System>>,
}

impl SystemGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            systems: Vec::new(),
        }
    }

    /// Append a child system.
    #[must_use]
    pub fn with<S: System>(mut self, system: S) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    /// Returns the number of child systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if the group has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    fn each(
        &mut self,
        ctx: &mut SystemContext<'_>,
        hook: fn(&mut Box<dyn System>, &mut SystemContext<'_>) -> SystemResult,
    ) -> SystemResult {
        for system in &mut self.systems {
            if let Err(err) = hook(system, ctx) {
                debug!(group = self.name, system = system.name(), "child system failed");
                return Err(err);
            }
        }
        Ok(())
    }
}

impl System for SystemGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, ctx: &mut SystemContext<'_>) -> SystemResult {
        self.each(ctx, |s, ctx| s.init(ctx))
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>) -> SystemResult {
        self.each(ctx, |s, ctx| s.update(ctx))
    }

    fn draw(&mut self, ctx: &mut SystemContext<'_>) -> SystemResult {
        self.each(ctx, |s, ctx| s.draw(ctx))
    }

    fn cleanup(&mut self, ctx: &mut SystemContext<'_>) -> SystemResult {
        self.each(ctx, |s, ctx| s.cleanup(ctx))
    }
}

impl std::fmt::Debug for SystemGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.systems.iter().map(|s| s.name()).collect();
        f.debug_struct("SystemGroup")
            .field("name", &self.name)
            .field("systems", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use engine_component::Registry;

    use super::*;
    use crate::events::EventQueue;

    struct Step {
        tag: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl System for Step {
        fn name(&self) -> &str {
            self.tag
        }

        fn update(&mut self, _ctx: &mut SystemContext<'_>) -> SystemResult {
            self.log.borrow_mut().push(self.tag);
            Ok(())
        }
    }

    #[test]
    fn test_group_runs_children_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut group = SystemGroup::new("logic")
            .with(Step {
                tag: "one",
                log: Rc::clone(&log),
            })
            .with(Step {
                tag: "two",
                log: Rc::clone(&log),
            });
        assert_eq!(group.len(), 2);
        assert_eq!(group.name(), "logic");

        let mut registry = Registry::new();
        let mut events = EventQueue::new();
        let mut ctx = SystemContext::new(&mut registry, &mut events, 0.0, 0.1);
        group.update(&mut ctx).unwrap();
        group.update(&mut ctx).unwrap();
        assert_eq!(*log.borrow(), vec!["one", "two", "one", "two"]);
    }
}
