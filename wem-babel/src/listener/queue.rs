//! Record-and-replay buffering of events.

use super::{Listener, Upcoming};
use crate::ir::events::Event;
use std::collections::VecDeque;

/// Records events in arrival order and replays them to another listener.
///
/// While replaying, each event is delivered together with a view of the
/// events still queued behind it, so a consumer can look ahead through
/// [`Listener::on_event_with_lookahead`].
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The queued event at `depth`; `0` is the oldest one.
    pub fn peek(&self, depth: usize) -> Option<&Event> {
        self.events.get(depth)
    }

    pub fn pop_front(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Drops everything queued so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Removes and returns every queued event without replaying it.
    pub fn drain(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    /// Delivers every queued event, oldest first, leaving the queue empty.
    pub fn replay<L: Listener + ?Sized>(&mut self, target: &mut L) {
        while let Some(event) = self.events.pop_front() {
            target.on_event_with_lookahead(&event, Upcoming::new(&self.events));
        }
    }
}

impl Listener for EventQueue {
    fn on_event(&mut self, event: &Event) {
        self.events.push_back(event.clone());
    }
}

impl Drop for EventQueue {
    fn drop(&mut self) {
        if !self.events.is_empty() {
            tracing::warn!(
                pending = self.events.len(),
                "event queue dropped before its events were replayed"
            );
        }
    }
}
