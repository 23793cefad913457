//! Sections derived from header levels.

use crate::ir::events::Event;
use crate::ir::parameters::Parameters;
use crate::listener::Listener;

/// Tracks how many sections are open and opens/closes them around headers.
#[derive(Debug)]
pub(crate) struct SectionTracker {
    depth: usize,
    enabled: bool,
}

impl SectionTracker {
    pub fn new(enabled: bool) -> Self {
        Self { depth: 0, enabled }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Makes a header of `level` the first thing in a section of that depth:
    /// closes sections until the depth is below `level`, then opens sections
    /// until it equals `level`.
    pub fn enter_header(&mut self, level: usize, out: &mut dyn Listener) {
        if !self.enabled {
            return;
        }
        while self.depth >= level && self.depth > 0 {
            self.close_one(out);
        }
        while self.depth < level {
            self.depth += 1;
            out.on_event(&Event::BeginSection {
                level: self.depth,
                params: Parameters::new(),
            });
        }
    }

    pub fn close_all(&mut self, out: &mut dyn Listener) {
        while self.depth > 0 {
            self.close_one(out);
        }
    }

    fn close_one(&mut self, out: &mut dyn Listener) {
        out.on_event(&Event::EndSection {
            level: self.depth,
            params: Parameters::new(),
        });
        self.depth -= 1;
    }
}
