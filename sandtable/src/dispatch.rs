use std::collections::HashMap;

use crate::event::Event;

type Handler<S> = Box<dyn Fn(&mut S, &Event)>;

/// Handler registration table: element ID to handler function.
///
/// Built once at setup; there is no runtime rebinding. A targeted event is
/// routed to at most one handler. Events without a target, or whose target
/// has no registration, are dropped.
pub struct Dispatcher<S> {
    handlers: HashMap<String, Handler<S>>,
}

impl<S> Default for Dispatcher<S> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<S> Dispatcher<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an element ID. Replaces any previous
    /// registration for the same ID.
    pub fn on(mut self, id: impl Into<String>, handler: impl Fn(&mut S, &Event) + 'static) -> Self {
        self.handlers.insert(id.into(), Box::new(handler));
        self
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Route an event to the handler registered for its target.
    /// Returns true if a handler ran.
    pub fn dispatch(&self, state: &mut S, event: &Event) -> bool {
        let target = match event {
            Event::Click {
                target: Some(target),
                ..
            } => target,
            _ => return false,
        };

        match self.handlers.get(target) {
            Some(handler) => {
                log::debug!("[dispatch] {target}");
                handler(state, event);
                true
            }
            None => {
                log::trace!("[dispatch] no handler for {target}, dropped");
                false
            }
        }
    }
}
