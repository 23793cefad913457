//! Scanning state of one document-like container.
//!
//! The root document and every nested document, figure, figure caption and
//! metadata container get their own [`BlockContext`]: a nested document
//! starts with no open block, its own sections and its own format runs,
//! independent of the container it appears in.
//!
//! All block transitions go through [`BlockContext::close_block`], which ends
//! whatever is open (format span, table, list, quotation, header, info block
//! or paragraph) before anything else may begin.

use super::block_type::BlockType;
use super::format_state::FormatState;
use super::nesting::{ListLevel, NestingStack, QuoteLevel};
use super::options::ScannerOptions;
use super::pending::Pending;
use super::sections::SectionTracker;
use crate::ir::events::Event;
use crate::ir::format::Style;
use crate::ir::parameters::Parameters;
use crate::listener::Listener;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContextKind {
    Document,
    Figure,
    FigureCaption,
    Metadata,
}

impl ContextKind {
    fn begin_event(self, params: Parameters) -> Event {
        match self {
            ContextKind::Document => Event::BeginDocument(params),
            ContextKind::Figure => Event::BeginFigure(params),
            ContextKind::FigureCaption => Event::BeginFigureCaption(params),
            ContextKind::Metadata => Event::BeginMetadata(params),
        }
    }
}

/// Open table, row and cell, by the begin events that opened them.
#[derive(Debug, Default)]
struct TableState {
    table: Option<Event>,
    row: Option<Event>,
    cell: Option<Event>,
    rows: usize,
    cells: usize,
}

#[derive(Debug)]
pub(crate) struct BlockContext {
    kind: ContextKind,
    begin: Event,
    block: BlockType,
    /// Begin event of the open header, info block or paragraph.
    block_event: Option<Event>,
    format: FormatState,
    sections: SectionTracker,
    lists: NestingStack<ListLevel>,
    quotes: NestingStack<QuoteLevel>,
    table: TableState,
    pending: Option<Pending>,
    /// Parameters for the next list opened by an item.
    list_params: Option<Parameters>,
    defer: bool,
}

impl BlockContext {
    /// Emits the begin event of the container and returns its fresh state.
    pub fn open(
        kind: ContextKind,
        params: Parameters,
        options: &ScannerOptions,
        out: &mut dyn Listener,
    ) -> Self {
        let begin = kind.begin_event(params);
        out.on_event(&begin);
        Self {
            kind,
            begin,
            block: BlockType::NONE,
            block_event: None,
            format: FormatState::default(),
            sections: SectionTracker::new(options.emit_sections),
            lists: NestingStack::default(),
            quotes: NestingStack::default(),
            table: TableState::default(),
            pending: None,
            list_params: None,
            defer: options.defer_ambiguous_blocks,
        }
    }

    /// Closes everything still open, then the container itself.
    pub fn close(mut self, out: &mut dyn Listener) {
        self.close_block(out);
        self.sections.close_all(out);
        if let Some(end) = self.begin.matching_end() {
            out.on_event(&end);
        }
    }

    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    pub fn block(&self) -> BlockType {
        self.block
    }

    pub fn section_depth(&self) -> usize {
        self.sections.depth()
    }

    pub fn table_row_count(&self) -> usize {
        self.table.rows
    }

    pub fn table_cell_count(&self) -> usize {
        self.table.cells
    }

    pub fn close_block(&mut self, out: &mut dyn Listener) {
        let block = self.block;
        if block == BlockType::NONE {
            self.flush_pending_block(out);
            return;
        }
        trace!(%block, "closing block");
        self.format.close(out, true);
        if block.is_in(BlockType::TABLE) {
            self.close_table(out);
        } else if block.is_in(BlockType::LIST) {
            self.lists.close_all(out);
        } else if block.is_in(BlockType::QUOT) {
            self.quotes.close_all(out);
        } else if let Some(end) = self.block_event.take().and_then(|begin| begin.matching_end()) {
            out.on_event(&end);
        }
        self.block = BlockType::NONE;
    }

    /// Readies the context for a nested container opening inside it.
    ///
    /// Tables, lists and quotations stay open so the nested container lands
    /// in the current cell, item or line; any other block is closed.
    pub fn prepare_nested(&mut self, out: &mut dyn Listener) {
        if self.block.is_in(BlockType::TABLE) {
            self.ensure_table_cell(out);
            self.format.close(out, false);
        } else if self.block.is_in(BlockType::LIST) || self.block.is_in(BlockType::QUOT) {
            self.format.close(out, false);
        } else {
            self.close_block(out);
        }
    }

    // --- Inline content ---

    pub fn on_format(&mut self, style: Style) {
        self.format.toggle(style);
    }

    pub fn on_format_parameters(&mut self, params: Parameters) {
        self.format.set_params(params);
    }

    /// Emits an inline event inside a suitable block, opening one if needed.
    pub fn emit_inline(&mut self, event: Event, out: &mut dyn Listener) {
        if let Some(pending) = self.pending.take() {
            self.ensure_inline_container(out);
            out.on_event(&pending.into_inline());
        }
        self.ensure_inline_container(out);
        self.format.sync(out);
        out.on_event(&event);
    }

    pub fn on_new_line(&mut self, out: &mut dyn Listener) {
        if self.block == BlockType::NONE {
            self.flush_pending_block(out);
            return;
        }
        if self.block.is_in(BlockType::TABLE) && !self.block.is_in(BlockType::TABLE_ROW_CELL) {
            return;
        }
        self.emit_inline(Event::OnNewLine, out);
    }

    pub fn on_raw_text(&mut self, event: Event, out: &mut dyn Listener) {
        if self.block == BlockType::NONE {
            self.flush_pending_block(out);
            out.on_event(&event);
        } else {
            self.emit_inline(event, out);
        }
    }

    /// A macro or verbatim run whose form depends on what follows it.
    pub fn on_ambiguous(&mut self, item: Pending, out: &mut dyn Listener) {
        if self.block != BlockType::NONE {
            self.emit_inline(item.into_inline(), out);
        } else if !self.defer {
            out.on_event(&item.into_block());
        } else if self.pending.is_some() {
            // Two in a row on one line: both are inline.
            self.emit_inline(item.into_inline(), out);
        } else {
            self.pending = Some(item);
        }
    }

    fn ensure_inline_container(&mut self, out: &mut dyn Listener) {
        if self.block.is_in(BlockType::TABLE) {
            self.ensure_table_cell(out);
        } else if self.block == BlockType::NONE {
            self.open_block(BlockType::PARAGRAPH, Event::BeginParagraph(Parameters::new()), out);
        }
    }

    fn flush_pending_block(&mut self, out: &mut dyn Listener) {
        if let Some(pending) = self.pending.take() {
            out.on_event(&pending.into_block());
        }
    }

    // --- Simple blocks ---

    /// Closes the open block and emits a standalone block-level event.
    pub fn emit_block(&mut self, event: Event, out: &mut dyn Listener) {
        self.close_block(out);
        out.on_event(&event);
    }

    pub fn begin_paragraph(&mut self, params: Parameters, out: &mut dyn Listener) {
        self.close_block(out);
        self.open_block(BlockType::PARAGRAPH, Event::BeginParagraph(params), out);
    }

    pub fn begin_header(&mut self, level: usize, params: Parameters, out: &mut dyn Listener) {
        self.close_block(out);
        self.sections.enter_header(level, out);
        let id = params.get("id").map(str::to_string);
        self.open_block(BlockType::HEADER, Event::BeginHeader { level, id, params }, out);
    }

    pub fn begin_info(&mut self, info_type: String, params: Parameters, out: &mut dyn Listener) {
        self.close_block(out);
        self.open_block(BlockType::INFO, Event::BeginInfoBlock { info_type, params }, out);
    }

    /// Closes the open block if it is exactly `block`.
    pub fn end_block(&mut self, block: BlockType, out: &mut dyn Listener) {
        if self.block == block {
            self.close_block(out);
        } else {
            debug!(expected = %block, open = %self.block, "ignoring end of a block that is not open");
        }
    }

    fn open_block(&mut self, block: BlockType, begin: Event, out: &mut dyn Listener) {
        out.on_event(&begin);
        self.block_event = Some(begin);
        self.block = block;
    }

    // --- Lists and quotations ---

    pub fn begin_list(&mut self, params: Parameters, out: &mut dyn Listener) {
        if !self.block.is_in(BlockType::LIST) {
            self.close_block(out);
        }
        self.list_params = Some(params);
    }

    pub fn begin_list_item(&mut self, path: &str, params: Parameters, out: &mut dyn Listener) {
        if self.block.is_in(BlockType::LIST) {
            self.format.close(out, true);
        } else {
            self.close_block(out);
        }
        let list_params = self.list_params.take().unwrap_or_default();
        let levels = ListLevel::parse_path(path, params, list_params);
        self.lists.align(levels, out);
        self.block = self
            .lists
            .top()
            .map_or(BlockType::NONE, ListLevel::block_type);
    }

    pub fn end_list(&mut self, out: &mut dyn Listener) {
        if self.block.is_in(BlockType::LIST) {
            self.close_block(out);
        }
    }

    pub fn begin_quotation_line(&mut self, depth: usize, params: Parameters, out: &mut dyn Listener) {
        if self.block.is_in(BlockType::QUOT) {
            self.format.close(out, true);
        } else {
            self.close_block(out);
        }
        self.quotes.align(QuoteLevel::path(depth, params), out);
        self.block = BlockType::QUOT_LI;
    }

    pub fn end_quotation(&mut self, out: &mut dyn Listener) {
        if self.block.is_in(BlockType::QUOT) {
            self.close_block(out);
        }
    }

    // --- Tables ---

    pub fn begin_table(&mut self, params: Parameters, out: &mut dyn Listener) {
        self.close_block(out);
        let begin = Event::BeginTable(params);
        out.on_event(&begin);
        self.table = TableState {
            table: Some(begin),
            ..TableState::default()
        };
        self.block = BlockType::TABLE;
    }

    pub fn begin_table_row(&mut self, params: Parameters, out: &mut dyn Listener) {
        if self.block.is_in(BlockType::TABLE) {
            self.close_table_row(out);
        } else {
            debug!(block = %self.block, "row outside of a table, opening one");
            self.begin_table(Parameters::new(), out);
        }
        let begin = Event::BeginTableRow(params);
        out.on_event(&begin);
        self.table.row = Some(begin);
        self.table.rows += 1;
        self.table.cells = 0;
        self.block = BlockType::TABLE_ROW;
    }

    pub fn begin_table_cell(&mut self, head: bool, params: Parameters, out: &mut dyn Listener) {
        if self.block.is_in(BlockType::TABLE_ROW) {
            self.close_table_cell(out);
        } else {
            debug!(block = %self.block, "cell outside of a row, opening one");
            self.begin_table_row(Parameters::new(), out);
        }
        let begin = Event::BeginTableCell { head, params };
        out.on_event(&begin);
        self.table.cell = Some(begin);
        self.table.cells += 1;
        self.block = BlockType::TABLE_ROW_CELL;
    }

    pub fn close_table_cell(&mut self, out: &mut dyn Listener) {
        if !self.block.is_in(BlockType::TABLE_ROW_CELL) {
            return;
        }
        self.format.close(out, true);
        if let Some(end) = self.table.cell.take().and_then(|begin| begin.matching_end()) {
            out.on_event(&end);
        }
        self.block = BlockType::TABLE_ROW;
    }

    pub fn close_table_row(&mut self, out: &mut dyn Listener) {
        self.close_table_cell(out);
        if !self.block.is_in(BlockType::TABLE_ROW) {
            return;
        }
        if let Some(end) = self.table.row.take().and_then(|begin| begin.matching_end()) {
            out.on_event(&end);
        }
        self.block = BlockType::TABLE;
    }

    pub fn close_table(&mut self, out: &mut dyn Listener) {
        self.close_table_row(out);
        if !self.block.is_in(BlockType::TABLE) {
            return;
        }
        if let Some(end) = self.table.table.take().and_then(|begin| begin.matching_end()) {
            out.on_event(&end);
        }
        self.block = BlockType::NONE;
    }

    fn ensure_table_cell(&mut self, out: &mut dyn Listener) {
        if !self.block.is_in(BlockType::TABLE_ROW_CELL) {
            debug!(block = %self.block, "content outside of a cell, opening one");
            self.begin_table_cell(false, Parameters::new(), out);
        }
    }
}
