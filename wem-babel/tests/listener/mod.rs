
use wem_babel::{Event, Listener, Upcoming};

/// Records each delivered event with the name of the one announced after it.
#[derive(Debug, Default)]
pub struct Recorder {
    pub seen: Vec<(&'static str, Option<&'static str>)>,
}

impl Listener for Recorder {
    fn on_event(&mut self, event: &Event) {
        self.seen.push((event.name(), None));
    }

    fn on_event_with_lookahead(&mut self, event: &Event, upcoming: Upcoming<'_>) {
        self.seen.push((event.name(), upcoming.peek(0).map(Event::name)));
    }
}
