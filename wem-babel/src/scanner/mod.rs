//! Turns loosely ordered tokenizer calls into a well-nested event stream.
//!
//! # The High-Level Concept
//!
//! A syntax-specific tokenizer knows what it sees ("a list item with path
//! `**`", "a word", "a table cell") but not what is currently open. The
//! [`WikiScanner`] keeps that state and emits the begin/end events needed to
//! keep the output well nested, whatever order the calls arrive in:
//!
//! - opening a block first closes the open one (implicit closing);
//! - content outside any block opens a paragraph, content in a table outside
//!   a cell opens the missing row and cell;
//! - headers open and close sections according to their level;
//! - list items and quotation lines are nested by aligning their paths;
//! - macros and verbatim runs seen between blocks are held until the next
//!   call decides whether they are inline or blocks of their own.
//!
//! Nothing here fails: unexpected `end_*` calls are ignored, and
//! [`WikiScanner::finish`] closes everything still open.
//!
//! # Contexts
//!
//! Nested documents, figures, figure captions and metadata containers each
//! get a fresh block context pushed on a stack. An
//! `end_*` call pops contexts down to the innermost one of its kind.

pub mod block_type;
pub(crate) mod context;
pub(crate) mod format_state;
pub(crate) mod nesting;
pub mod options;
pub(crate) mod pending;
pub(crate) mod sections;

pub use block_type::BlockType;
pub use options::ScannerOptions;

use crate::ir::events::Event;
use crate::ir::format::{Reference, Style};
use crate::ir::parameters::Parameters;
use crate::listener::Listener;
use context::{BlockContext, ContextKind};
use pending::Pending;
use tracing::debug;

/// The scanning state machine, writing to the listener `L`.
pub struct WikiScanner<L: Listener> {
    listener: L,
    options: ScannerOptions,
    contexts: Vec<BlockContext>,
}

impl<L: Listener> WikiScanner<L> {
    pub fn new(listener: L) -> Self {
        Self::with_options(listener, ScannerOptions::default())
    }

    pub fn with_options(listener: L, options: ScannerOptions) -> Self {
        Self {
            listener,
            options,
            contexts: Vec::new(),
        }
    }

    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Closes everything still open and hands back the listener.
    pub fn finish(mut self) -> L {
        while let Some(context) = self.contexts.pop() {
            context.close(&mut self.listener);
        }
        self.listener
    }

    // --- State queries ---

    /// Block type of the innermost context; `NONE` before any input.
    pub fn block_type(&self) -> BlockType {
        self.contexts
            .last()
            .map_or(BlockType::NONE, BlockContext::block)
    }

    pub fn table_row_count(&self) -> usize {
        self.contexts
            .last()
            .map_or(0, BlockContext::table_row_count)
    }

    pub fn table_cell_count(&self) -> usize {
        self.contexts
            .last()
            .map_or(0, BlockContext::table_cell_count)
    }

    pub fn section_depth(&self) -> usize {
        self.contexts
            .last()
            .map_or(0, BlockContext::section_depth)
    }

    /// Number of open documents and nested containers.
    pub fn context_depth(&self) -> usize {
        self.contexts.len()
    }

    // --- Documents and nested containers ---

    pub fn begin_document(&mut self, params: Parameters) {
        if self.contexts.is_empty() {
            self.push_context(ContextKind::Document, params);
        } else {
            self.begin_nested(ContextKind::Document, params);
        }
    }

    pub fn end_document(&mut self) {
        self.pop_context(ContextKind::Document);
    }

    pub fn begin_figure(&mut self, params: Parameters) {
        self.begin_nested(ContextKind::Figure, params);
    }

    pub fn end_figure(&mut self) {
        self.pop_context(ContextKind::Figure);
    }

    pub fn begin_figure_caption(&mut self, params: Parameters) {
        self.begin_nested(ContextKind::FigureCaption, params);
    }

    pub fn end_figure_caption(&mut self) {
        self.pop_context(ContextKind::FigureCaption);
    }

    pub fn begin_metadata(&mut self, params: Parameters) {
        self.begin_nested(ContextKind::Metadata, params);
    }

    pub fn end_metadata(&mut self) {
        self.pop_context(ContextKind::Metadata);
    }

    // --- Blocks ---

    /// Opens a header, clamping its level to `1..=max_header_level`.
    pub fn begin_header(&mut self, level: usize, params: Parameters) {
        let level = level.clamp(1, self.options.max_header_level.max(1));
        self.with_context(|context, out| context.begin_header(level, params, out));
    }

    pub fn end_header(&mut self) {
        self.with_context(|context, out| context.end_block(BlockType::HEADER, out));
    }

    pub fn begin_paragraph(&mut self, params: Parameters) {
        self.with_context(|context, out| context.begin_paragraph(params, out));
    }

    pub fn end_paragraph(&mut self) {
        self.with_context(|context, out| context.end_block(BlockType::PARAGRAPH, out));
    }

    pub fn begin_info(&mut self, info_type: impl Into<String>, params: Parameters) {
        let info_type = info_type.into();
        self.with_context(|context, out| context.begin_info(info_type, params, out));
    }

    pub fn end_info(&mut self) {
        self.with_context(|context, out| context.end_block(BlockType::INFO, out));
    }

    pub fn on_empty_lines(&mut self, count: usize) {
        self.with_context(|context, out| context.emit_block(Event::OnEmptyLines(count), out));
    }

    pub fn on_horizontal_line(&mut self, params: Parameters) {
        self.with_context(|context, out| context.emit_block(Event::OnHorizontalLine(params), out));
    }

    // --- Lists and quotations ---

    /// Sets the parameters of the next list opened by a list item.
    pub fn begin_list(&mut self, params: Parameters) {
        self.with_context(|context, out| context.begin_list(params, out));
    }

    /// Opens an item at the position described by `path`: one marker per
    /// level, `*` or `-` for bullets, `#` for numbers, `;` for definition
    /// terms and `:` for definition descriptions.
    pub fn begin_list_item(&mut self, path: &str, params: Parameters) {
        self.with_context(|context, out| context.begin_list_item(path, params, out));
    }

    pub fn end_list(&mut self) {
        self.with_context(|context, out| context.end_list(out));
    }

    /// Opens a quotation line nested `depth` quotations deep.
    pub fn begin_quotation_line(&mut self, depth: usize, params: Parameters) {
        self.with_context(|context, out| context.begin_quotation_line(depth, params, out));
    }

    pub fn end_quotation(&mut self) {
        self.with_context(|context, out| context.end_quotation(out));
    }

    // --- Tables ---

    pub fn begin_table(&mut self, params: Parameters) {
        self.with_context(|context, out| context.begin_table(params, out));
    }

    pub fn begin_table_row(&mut self, params: Parameters) {
        self.with_context(|context, out| context.begin_table_row(params, out));
    }

    pub fn begin_table_cell(&mut self, head: bool, params: Parameters) {
        self.with_context(|context, out| context.begin_table_cell(head, params, out));
    }

    pub fn end_table_cell(&mut self) {
        self.with_context(|context, out| context.close_table_cell(out));
    }

    pub fn end_table_row(&mut self) {
        self.with_context(|context, out| context.close_table_row(out));
    }

    pub fn end_table(&mut self) {
        self.with_context(|context, out| context.close_table(out));
    }

    // --- Inline content ---

    /// Toggles `style` for the inline content that follows.
    pub fn on_format(&mut self, style: Style) {
        self.with_context(|context, _| context.on_format(style));
    }

    pub fn on_format_parameters(&mut self, params: Parameters) {
        self.with_context(|context, _| context.on_format_parameters(params));
    }

    pub fn on_word(&mut self, text: impl Into<String>) {
        self.inline(Event::OnWord(text.into()));
    }

    pub fn on_space(&mut self, text: impl Into<String>) {
        self.inline(Event::OnSpace(text.into()));
    }

    pub fn on_special_symbol(&mut self, text: impl Into<String>) {
        self.inline(Event::OnSpecialSymbol(text.into()));
    }

    pub fn on_escape(&mut self, text: impl Into<String>) {
        self.inline(Event::OnEscape(text.into()));
    }

    pub fn on_id(&mut self, id: impl Into<String>) {
        self.inline(Event::OnId(id.into()));
    }

    pub fn on_line_break(&mut self) {
        self.inline(Event::OnLineBreak);
    }

    /// A line end. Dropped between blocks, where it only settles a pending
    /// macro or verbatim run as a block.
    pub fn on_new_line(&mut self) {
        self.with_context(|context, out| context.on_new_line(out));
    }

    pub fn on_reference(&mut self, reference: Reference, freestanding: bool) {
        self.inline(Event::OnReference {
            reference,
            freestanding,
        });
    }

    pub fn on_image(&mut self, reference: Reference, freestanding: bool) {
        self.inline(Event::OnImage {
            reference,
            freestanding,
        });
    }

    /// Raw target-syntax content: a block of its own between blocks,
    /// inline otherwise.
    pub fn on_raw_text(&mut self, content: impl Into<String>, syntax: impl Into<String>) {
        let event = Event::OnRawText {
            content: content.into(),
            syntax: syntax.into(),
        };
        self.with_context(|context, out| context.on_raw_text(event, out));
    }

    // --- Macros and verbatim ---

    /// A verbatim run whose form is decided by its surroundings.
    pub fn on_verbatim(&mut self, content: impl Into<String>, params: Parameters) {
        let item = Pending::Verbatim {
            content: content.into(),
            params,
        };
        self.with_context(|context, out| context.on_ambiguous(item, out));
    }

    pub fn on_verbatim_block(&mut self, content: impl Into<String>, params: Parameters) {
        let event = Event::OnVerbatimBlock {
            content: content.into(),
            params,
        };
        self.with_context(|context, out| context.emit_block(event, out));
    }

    pub fn on_verbatim_inline(&mut self, content: impl Into<String>, params: Parameters) {
        self.inline(Event::OnVerbatimInline {
            content: content.into(),
            params,
        });
    }

    /// A macro call whose form is decided by its surroundings.
    pub fn on_macro(&mut self, name: impl Into<String>, params: Parameters, content: Option<String>) {
        let item = Pending::Macro {
            name: name.into(),
            params,
            content,
        };
        self.with_context(|context, out| context.on_ambiguous(item, out));
    }

    pub fn on_macro_block(
        &mut self,
        name: impl Into<String>,
        params: Parameters,
        content: Option<String>,
    ) {
        let event = Event::OnMacroBlock {
            name: name.into(),
            params,
            content,
        };
        self.with_context(|context, out| context.emit_block(event, out));
    }

    pub fn on_macro_inline(
        &mut self,
        name: impl Into<String>,
        params: Parameters,
        content: Option<String>,
    ) {
        self.inline(Event::OnMacroInline {
            name: name.into(),
            params,
            content,
        });
    }

    // --- Internals ---

    fn inline(&mut self, event: Event) {
        self.with_context(|context, out| context.emit_inline(event, out));
    }

    /// Runs `f` on the innermost context, opening a document first when
    /// nothing is open.
    fn with_context(&mut self, f: impl FnOnce(&mut BlockContext, &mut dyn Listener)) {
        if self.contexts.is_empty() {
            debug!("content outside of any document, opening one");
            self.push_context(ContextKind::Document, Parameters::new());
        }
        if let Some(context) = self.contexts.last_mut() {
            f(context, &mut self.listener);
        }
    }

    fn push_context(&mut self, kind: ContextKind, params: Parameters) {
        let context = BlockContext::open(kind, params, &self.options, &mut self.listener);
        self.contexts.push(context);
    }

    fn begin_nested(&mut self, kind: ContextKind, params: Parameters) {
        self.with_context(|context, out| context.prepare_nested(out));
        self.push_context(kind, params);
    }

    /// Closes contexts down to and including the innermost one of `kind`.
    fn pop_context(&mut self, kind: ContextKind) {
        let Some(position) = self.contexts.iter().rposition(|context| context.kind() == kind) else {
            debug!(?kind, "ignoring end of a container that is not open");
            return;
        };
        while self.contexts.len() > position {
            if let Some(context) = self.contexts.pop() {
                context.close(&mut self.listener);
            }
        }
    }
}
