//! Broadcasts one event stream to several listeners.

use super::{Listener, Upcoming};
use crate::ir::events::Event;

/// Forwards every event to each registered listener, in registration order.
///
/// An event is delivered to all listeners before the next one is accepted.
#[derive(Default)]
pub struct FanOut<'a> {
    listeners: Vec<Box<dyn Listener + 'a>>,
}

impl<'a> FanOut<'a> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Builder-style registration.
    pub fn with(mut self, listener: impl Listener + 'a) -> Self {
        self.add(listener);
        self
    }

    pub fn add(&mut self, listener: impl Listener + 'a) {
        self.listeners.push(Box::new(listener));
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Listener for FanOut<'_> {
    fn on_event(&mut self, event: &Event) {
        for listener in &mut self.listeners {
            listener.on_event(event);
        }
    }

    fn on_event_with_lookahead(&mut self, event: &Event, upcoming: Upcoming<'_>) {
        for listener in &mut self.listeners {
            listener.on_event_with_lookahead(event, upcoming);
        }
    }
}
