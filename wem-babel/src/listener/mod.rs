//! Listener chain infrastructure.
//!
//! Everything that consumes the event stream implements [`Listener`]: tree
//! builders, renderers, and the small composable stages in this module that
//! sit between a producer and its final consumer.
//!
//! - [`FanOut`] forwards every event to several listeners, in registration order.
//! - [`EventQueue`] records events and replays them later, in order.
//! - [`Wrapper`] forwards events through an [`Intercept`] that may suppress or rewrite them.
//! - [`Lookahead`] holds back up to N events so the consumer can see what comes next.
//! - [`EventTrace`] renders the stream as an indented text trace.
//!
//! The chain is synchronous: every call has been fully handled downstream
//! when it returns. Only the queue and the lookahead reorder anything, and
//! only by holding events back.

pub mod fanout;
pub mod lookahead;
pub mod queue;
pub mod trace;
pub mod wrapper;

pub use fanout::FanOut;
pub use lookahead::{Lookahead, TrimTrailingBreaks};
pub use queue::EventQueue;
pub use trace::{EventTrace, TraceOptions};
pub use wrapper::{intercept_fn, FnIntercept, Intercept, PassThrough, Wrapper};

use crate::ir::events::Event;
use std::collections::VecDeque;

/// A consumer of the document event stream.
pub trait Listener {
    fn on_event(&mut self, event: &Event);

    /// Called by buffering stages, which know the events that follow `event`.
    ///
    /// The default ignores the lookahead and delegates to [`Listener::on_event`].
    fn on_event_with_lookahead(&mut self, event: &Event, upcoming: Upcoming<'_>) {
        let _ = upcoming;
        self.on_event(event);
    }
}

/// Read-only view of the events buffered after the one being delivered.
#[derive(Debug, Clone, Copy, Default)]
pub struct Upcoming<'a> {
    events: Option<&'a VecDeque<Event>>,
}

impl<'a> Upcoming<'a> {
    /// A view with nothing buffered.
    pub fn none() -> Self {
        Self { events: None }
    }

    pub(crate) fn new(events: &'a VecDeque<Event>) -> Self {
        Self {
            events: Some(events),
        }
    }

    /// The event `depth` positions ahead; `0` is the very next event.
    pub fn peek(&self, depth: usize) -> Option<&'a Event> {
        self.events.and_then(|events| events.get(depth))
    }

    pub fn len(&self) -> usize {
        self.events.map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collects the stream, the flat representation used throughout the tests.
impl Listener for Vec<Event> {
    fn on_event(&mut self, event: &Event) {
        self.push(event.clone());
    }
}

impl<L: Listener + ?Sized> Listener for &mut L {
    fn on_event(&mut self, event: &Event) {
        (**self).on_event(event);
    }

    fn on_event_with_lookahead(&mut self, event: &Event, upcoming: Upcoming<'_>) {
        (**self).on_event_with_lookahead(event, upcoming);
    }
}

impl<L: Listener + ?Sized> Listener for Box<L> {
    fn on_event(&mut self, event: &Event) {
        (**self).on_event(event);
    }

    fn on_event_with_lookahead(&mut self, event: &Event, upcoming: Upcoming<'_>) {
        (**self).on_event_with_lookahead(event, upcoming);
    }
}
