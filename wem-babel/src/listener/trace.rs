//! Indented text rendering of an event stream.
//!
//! Each event becomes one line: its snake-case name, its distinguishing
//! arguments in parentheses, its text content quoted, and its parameters in
//! brackets. Lines between a begin event and its end are indented one level.
//!
//! ```text
//! begin_document
//!   begin_section(level=1)
//!     begin_header(level=1, id=intro)
//!       on_word "Hello"
//!     end_header(level=1, id=intro)
//!   end_section(level=1)
//! end_document
//! ```
//!
//! Traces are what the scanner tests snapshot, and what a developer reaches
//! for when a conversion produces an unexpected tree.

use super::Listener;
use crate::ir::events::Event;
use crate::ir::parameters::Parameters;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceOptions {
    /// Repeated once per nesting level.
    pub indent_string: String,
    /// Append non-empty parameters as `[key="value" ...]`.
    pub show_parameters: bool,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            indent_string: "  ".to_string(),
            show_parameters: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct EventTrace {
    options: TraceOptions,
    depth: usize,
    output: String,
}

impl EventTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TraceOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }
}

impl Listener for EventTrace {
    fn on_event(&mut self, event: &Event) {
        if event.is_end() {
            self.depth = self.depth.saturating_sub(1);
        }
        for _ in 0..self.depth {
            self.output.push_str(&self.options.indent_string);
        }
        self.output
            .push_str(&describe(event, self.options.show_parameters));
        self.output.push('\n');
        if event.is_begin() {
            self.depth += 1;
        }
    }
}

/// Renders a single event as one trace line, without indentation.
pub fn describe(event: &Event, show_parameters: bool) -> String {
    let mut args: Vec<String> = Vec::new();
    let mut params: Option<&Parameters> = None;
    let mut text: Option<&str> = None;

    match event {
        Event::BeginDocument(p)
        | Event::EndDocument(p)
        | Event::BeginParagraph(p)
        | Event::EndParagraph(p)
        | Event::OnHorizontalLine(p)
        | Event::BeginQuotation(p)
        | Event::EndQuotation(p)
        | Event::BeginListItem(p)
        | Event::EndListItem(p)
        | Event::BeginDefinitionList(p)
        | Event::EndDefinitionList(p)
        | Event::BeginTable(p)
        | Event::EndTable(p)
        | Event::BeginTableRow(p)
        | Event::EndTableRow(p)
        | Event::BeginFigure(p)
        | Event::EndFigure(p)
        | Event::BeginFigureCaption(p)
        | Event::EndFigureCaption(p)
        | Event::BeginMetadata(p)
        | Event::EndMetadata(p) => params = Some(p),
        Event::BeginSection { level, params: p } | Event::EndSection { level, params: p } => {
            args.push(format!("level={level}"));
            params = Some(p);
        }
        Event::BeginHeader {
            level,
            id,
            params: p,
        }
        | Event::EndHeader {
            level,
            id,
            params: p,
        } => {
            args.push(format!("level={level}"));
            if let Some(id) = id {
                args.push(format!("id={id}"));
            }
            params = Some(p);
        }
        Event::BeginInfoBlock {
            info_type,
            params: p,
        }
        | Event::EndInfoBlock {
            info_type,
            params: p,
        } => {
            args.push(format!("type={info_type}"));
            params = Some(p);
        }
        Event::BeginList { ordered, params: p } | Event::EndList { ordered, params: p } => {
            args.push(format!("ordered={ordered}"));
            params = Some(p);
        }
        Event::BeginTableCell { head, params: p } | Event::EndTableCell { head, params: p } => {
            args.push(format!("head={head}"));
            params = Some(p);
        }
        Event::BeginFormat(format) | Event::EndFormat(format) => {
            args.extend(format.styles().map(|style| style.name().to_string()));
            params = Some(format.params());
        }
        Event::OnEmptyLines(count) => args.push(count.to_string()),
        Event::OnVerbatimBlock { content, params: p }
        | Event::OnVerbatimInline { content, params: p } => {
            text = Some(content.as_str());
            params = Some(p);
        }
        Event::OnMacroBlock {
            name,
            params: p,
            content,
        }
        | Event::OnMacroInline {
            name,
            params: p,
            content,
        } => {
            args.push(name.clone());
            text = content.as_deref();
            params = Some(p);
        }
        Event::OnRawText { content, syntax } => {
            args.push(syntax.clone());
            text = Some(content.as_str());
        }
        Event::OnReference {
            reference,
            freestanding,
        }
        | Event::OnImage {
            reference,
            freestanding,
        } => {
            args.push(reference.link.clone());
            if *freestanding {
                args.push("freestanding".to_string());
            }
            text = reference.label.as_deref();
            params = Some(&reference.params);
        }
        Event::OnWord(t)
        | Event::OnSpace(t)
        | Event::OnSpecialSymbol(t)
        | Event::OnEscape(t)
        | Event::OnId(t) => text = Some(t.as_str()),
        Event::BeginQuotationLine
        | Event::EndQuotationLine
        | Event::BeginDefinitionTerm
        | Event::EndDefinitionTerm
        | Event::BeginDefinitionDescription
        | Event::EndDefinitionDescription
        | Event::OnNewLine
        | Event::OnLineBreak => {}
    }

    let mut line = event.name().to_string();
    if !args.is_empty() {
        line.push('(');
        line.push_str(&args.join(", "));
        line.push(')');
    }
    if let Some(text) = text {
        line.push_str(&format!(" {text:?}"));
    }
    if show_parameters {
        if let Some(params) = params.filter(|p| !p.is_empty()) {
            line.push_str(&format!(" [{params}]"));
        }
    }
    line
}
