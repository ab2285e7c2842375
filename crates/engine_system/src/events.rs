//! Named scene events.
//!
//! Systems raise events into an [`EventQueue`] while they run. The scheduler
//! hands the queue to the [`EventBus`] after each system returns, so listeners
//! never observe a half-finished system pass and may mutate the registry.
//!
//! Event names are case-insensitive.

use std::any::Any;
use std::collections::HashMap;

use engine_component::Registry;
use tracing::trace;

/// A raised event with an optional typed payload.
#[derive(Debug)]
pub struct Event {
    name: String,
    data: Option<Box<dyn Any>>,
}

impl Event {
    /// An event with no payload.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            data: None,
        }
    }

    /// An event carrying `data`.
    #[must_use]
    pub fn with_data<T: Any>(name: &str, data: T) -> Self {
        Self {
            name: name.to_lowercase(),
            data: Some(Box::new(data)),
        }
    }

    /// The normalised (lower-case) event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The payload, if present and of type `T`.
    #[must_use]
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.as_deref()?.downcast_ref()
    }
}

/// Events raised during the current system call, waiting for dispatch.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<Event>,
}

impl EventQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event without payload.
    pub fn raise(&mut self, name: &str) {
        self.pending.push(Event::new(name));
    }

    /// Queue an event carrying `data`.
    pub fn raise_with<T: Any>(&mut self, name: &str, data: T) {
        self.pending.push(Event::with_data(name, data));
    }

    /// Queue a prebuilt event.
    pub fn push(&mut self, event: Event) {
        self.pending.push(event);
    }

    /// Number of events waiting for dispatch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The waiting events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.pending.iter()
    }

    /// Drop every waiting event undelivered.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }
}

/// An event callback.
pub type Listener = Box<dyn FnMut(&Event, &mut Registry)>;

/// Listener table, keyed by normalised event name.
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<String, Vec<Listener>>,
}

impl EventBus {
    /// Create a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `listener` to events called `name`.
    pub fn on<F>(&mut self, name: &str, listener: F)
    where
        F: FnMut(&Event, &mut Registry) + 'static,
    {
        self.listeners
            .entry(name.to_lowercase())
            .or_default()
            .push(Box::new(listener));
    }

    /// Number of listeners subscribed to `name`.
    #[must_use]
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners
            .get(&name.to_lowercase())
            .map_or(0, Vec::len)
    }

    /// Deliver every queued event, in raise order, to its listeners.
    ///
    /// Events nobody listens to are dropped. Returns the number of events
    /// drained from the queue.
    pub fn dispatch(&mut self, queue: &mut EventQueue, registry: &mut Registry) -> usize {
        let events = queue.take();
        for event in &events {
            let Some(listeners) = self.listeners.get_mut(event.name()) else {
                continue;
            };
            trace!(event = event.name(), listeners = listeners.len(), "dispatching event");
            for listener in listeners.iter_mut() {
                listener(event, &mut *registry);
            }
        }
        events.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}
