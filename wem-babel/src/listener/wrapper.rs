//! Selective overriding of a listener's behavior.
//!
//! A [`Wrapper`] owns an inner listener and routes every event through an
//! [`Intercept`]. The intercept decides what reaches the inner listener: the
//! event unchanged (the default), nothing, a rewritten event, or several
//! events. Only the cases it cares about need handling.
//!
//! Behind a [`super::Lookahead`] or an [`super::EventQueue`] replay, whatever
//! the intercept forwards still carries the view of the upcoming events.

use super::{Listener, Upcoming};
use crate::ir::events::Event;

/// Per-event override hook used by [`Wrapper`].
pub trait Intercept {
    /// Handles `event`, forwarding whatever should reach `next`.
    fn intercept(&mut self, event: &Event, next: &mut dyn Listener) {
        next.on_event(event);
    }

    /// Handles `event` delivered together with the events that follow it.
    ///
    /// The default routes through [`Intercept::intercept`], so an intercept
    /// overriding only that method keeps the lookahead on what it forwards.
    fn intercept_with_lookahead(
        &mut self,
        event: &Event,
        upcoming: Upcoming<'_>,
        next: &mut dyn Listener,
    ) {
        let mut ahead = KeepUpcoming { next, upcoming };
        self.intercept(event, &mut ahead);
    }
}

/// Attaches one lookahead view to everything forwarded through it.
struct KeepUpcoming<'a, 'u> {
    next: &'a mut dyn Listener,
    upcoming: Upcoming<'u>,
}

impl Listener for KeepUpcoming<'_, '_> {
    fn on_event(&mut self, event: &Event) {
        self.next.on_event_with_lookahead(event, self.upcoming);
    }

    fn on_event_with_lookahead(&mut self, event: &Event, upcoming: Upcoming<'_>) {
        self.next.on_event_with_lookahead(event, upcoming);
    }
}

/// Forwards everything untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl Intercept for PassThrough {}

/// An [`Intercept`] backed by a closure. See [`intercept_fn`].
pub struct FnIntercept<F>(F);

/// Builds an intercept from a closure receiving the event and the inner listener.
pub fn intercept_fn<F>(f: F) -> FnIntercept<F>
where
    F: FnMut(&Event, &mut dyn Listener),
{
    FnIntercept(f)
}

impl<F> Intercept for FnIntercept<F>
where
    F: FnMut(&Event, &mut dyn Listener),
{
    fn intercept(&mut self, event: &Event, next: &mut dyn Listener) {
        (self.0)(event, next)
    }
}

/// A listener that delegates to `inner` through an intercept.
pub struct Wrapper<I, L> {
    interceptor: I,
    inner: L,
}

impl<I: Intercept, L: Listener> Wrapper<I, L> {
    pub fn new(interceptor: I, inner: L) -> Self {
        Self { interceptor, inner }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut L {
        &mut self.inner
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: Listener> Wrapper<PassThrough, L> {
    /// A wrapper that changes nothing.
    pub fn transparent(inner: L) -> Self {
        Self::new(PassThrough, inner)
    }
}

impl<I: Intercept, L: Listener> Listener for Wrapper<I, L> {
    fn on_event(&mut self, event: &Event) {
        self.interceptor.intercept(event, &mut self.inner);
    }

    fn on_event_with_lookahead(&mut self, event: &Event, upcoming: Upcoming<'_>) {
        self.interceptor
            .intercept_with_lookahead(event, upcoming, &mut self.inner);
    }
}
