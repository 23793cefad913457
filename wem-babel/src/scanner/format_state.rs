//! Inline format run tracking.

use crate::ir::events::Event;
use crate::ir::format::{Format, Style};
use crate::ir::parameters::Parameters;
use crate::listener::Listener;

/// The format span currently open downstream and the one requested by the
/// tokenizer for the next inline content.
///
/// Toggles only touch the requested format. Spans are reconciled lazily,
/// right before inline content is emitted, so a style toggled off and on
/// again with nothing in between produces no events.
#[derive(Debug, Default)]
pub(crate) struct FormatState {
    current: Format,
    requested: Format,
}

impl FormatState {
    pub fn toggle(&mut self, style: Style) {
        self.requested = self.requested.switch_style(style);
    }

    pub fn set_params(&mut self, params: Parameters) {
        self.requested = self.requested.with_params(params);
    }

    /// Makes the open span match the requested format.
    pub fn sync(&mut self, out: &mut dyn Listener) {
        if self.current == self.requested {
            return;
        }
        if !self.current.is_empty() {
            out.on_event(&Event::EndFormat(self.current.clone()));
        }
        self.current = self.requested.clone();
        if !self.current.is_empty() {
            out.on_event(&Event::BeginFormat(self.current.clone()));
        }
    }

    /// Closes the open span. With `reset` the requested format is dropped
    /// too; otherwise the span reopens before the next inline content.
    pub fn close(&mut self, out: &mut dyn Listener, reset: bool) {
        if !self.current.is_empty() {
            out.on_event(&Event::EndFormat(self.current.clone()));
        }
        self.current = Format::default();
        if reset {
            self.requested = Format::default();
        }
    }
}
