//! Bounded lookahead over the event stream.
//!
//! [`Lookahead`] delays delivery so that, when its inner listener receives an
//! event, up to `depth` following events are already known. The inner
//! listener sees them through [`Listener::on_event_with_lookahead`]; code that
//! owns the stage can also [`Lookahead::peek`] at what is still held back.

use super::{Listener, Upcoming};
use crate::ir::events::Event;
use std::collections::VecDeque;

pub struct Lookahead<L> {
    inner: L,
    depth: usize,
    buffer: Backlog,
    buffering: bool,
}

/// Events held back by a [`Lookahead`].
#[derive(Debug)]
struct Backlog(VecDeque<Event>);

impl Drop for Backlog {
    fn drop(&mut self) {
        if !self.0.is_empty() {
            tracing::warn!(
                pending = self.0.len(),
                "lookahead dropped before its events were flushed"
            );
        }
    }
}

impl<L: Listener> Lookahead<L> {
    /// A stage holding back up to `depth` events, armed from the start.
    pub fn new(inner: L, depth: usize) -> Self {
        Self {
            inner,
            depth,
            buffer: Backlog(VecDeque::with_capacity(depth + 1)),
            buffering: true,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The held-back event at `depth`; `0` is the next one to be delivered.
    pub fn peek(&self, depth: usize) -> Option<&Event> {
        self.buffer.0.get(depth)
    }

    pub fn buffered(&self) -> usize {
        self.buffer.0.len()
    }

    pub fn is_buffering(&self) -> bool {
        self.buffering
    }

    /// Delivers everything held back and stops buffering.
    ///
    /// Calling it again without new events in between does nothing.
    pub fn flush(&mut self) {
        if !self.buffering && self.buffer.0.is_empty() {
            return;
        }
        while let Some(event) = self.buffer.0.pop_front() {
            self.inner
                .on_event_with_lookahead(&event, Upcoming::new(&self.buffer.0));
        }
        self.buffering = false;
    }

    /// Resumes buffering after a [`flush`](Self::flush).
    pub fn arm(&mut self) {
        self.buffering = true;
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut L {
        &mut self.inner
    }

    /// Flushes and hands back the inner listener.
    pub fn finish(mut self) -> L {
        self.flush();
        self.inner
    }
}

impl<L: Listener> Listener for Lookahead<L> {
    fn on_event(&mut self, event: &Event) {
        if !self.buffering {
            self.inner.on_event_with_lookahead(event, Upcoming::none());
            return;
        }
        self.buffer.0.push_back(event.clone());
        while self.buffer.0.len() > self.depth {
            if let Some(next) = self.buffer.0.pop_front() {
                self.inner
                    .on_event_with_lookahead(&next, Upcoming::new(&self.buffer.0));
            }
        }
    }
}

/// Drops line breaks and new lines that immediately precede the end of a
/// container.
///
/// Needs to sit behind a [`Lookahead`] of depth one or more; without a view of
/// the next event it forwards everything.
pub struct TrimTrailingBreaks<L> {
    inner: L,
}

impl<L: Listener> TrimTrailingBreaks<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: Listener> Listener for TrimTrailingBreaks<L> {
    fn on_event(&mut self, event: &Event) {
        self.inner.on_event(event);
    }

    fn on_event_with_lookahead(&mut self, event: &Event, upcoming: Upcoming<'_>) {
        let is_break = matches!(event, Event::OnLineBreak | Event::OnNewLine);
        if is_break && upcoming.peek(0).is_some_and(Event::is_end) {
            tracing::trace!(event = event.name(), "dropping trailing break");
            return;
        }
        self.inner.on_event_with_lookahead(event, upcoming);
    }
}
