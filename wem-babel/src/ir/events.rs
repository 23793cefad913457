//! Defines the flat event stream representation of a document.
//!
//! The vocabulary is closed: producers (the scanner, tree traversal) and
//! consumers (tree building, renderers, transformation passes) all speak this
//! one enum. Every `Begin*` variant has an `End*` twin carrying an identical
//! payload, so a consumer can keep a stack and check nesting by construction.
//! Leaf content is reported with `On*` variants.
//!
//! Optional events (figures, metadata, ids, raw text) are ordinary variants;
//! listeners that have no use for them simply ignore them.

use crate::ir::format::{Format, Reference};
use crate::ir::parameters::Parameters;
use serde::{Deserialize, Serialize};

/// Represents a single event in the document stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    BeginDocument(Parameters),
    EndDocument(Parameters),
    BeginSection {
        level: usize,
        params: Parameters,
    },
    EndSection {
        level: usize,
        params: Parameters,
    },
    BeginHeader {
        level: usize,
        id: Option<String>,
        params: Parameters,
    },
    EndHeader {
        level: usize,
        id: Option<String>,
        params: Parameters,
    },

    BeginParagraph(Parameters),
    EndParagraph(Parameters),
    BeginInfoBlock {
        info_type: String,
        params: Parameters,
    },
    EndInfoBlock {
        info_type: String,
        params: Parameters,
    },
    OnEmptyLines(usize),
    OnHorizontalLine(Parameters),
    OnVerbatimBlock {
        content: String,
        params: Parameters,
    },
    OnMacroBlock {
        name: String,
        params: Parameters,
        content: Option<String>,
    },
    OnRawText {
        content: String,
        syntax: String,
    },

    BeginQuotation(Parameters),
    EndQuotation(Parameters),
    BeginQuotationLine,
    EndQuotationLine,
    BeginList {
        ordered: bool,
        params: Parameters,
    },
    EndList {
        ordered: bool,
        params: Parameters,
    },
    BeginListItem(Parameters),
    EndListItem(Parameters),
    BeginDefinitionList(Parameters),
    EndDefinitionList(Parameters),
    BeginDefinitionTerm,
    EndDefinitionTerm,
    BeginDefinitionDescription,
    EndDefinitionDescription,

    BeginTable(Parameters),
    EndTable(Parameters),
    BeginTableRow(Parameters),
    EndTableRow(Parameters),
    BeginTableCell {
        head: bool,
        params: Parameters,
    },
    EndTableCell {
        head: bool,
        params: Parameters,
    },

    BeginFigure(Parameters),
    EndFigure(Parameters),
    BeginFigureCaption(Parameters),
    EndFigureCaption(Parameters),
    BeginMetadata(Parameters),
    EndMetadata(Parameters),

    BeginFormat(Format),
    EndFormat(Format),
    OnWord(String),
    OnSpace(String),
    OnSpecialSymbol(String),
    OnEscape(String),
    OnNewLine,
    OnLineBreak,
    OnId(String),
    OnReference {
        reference: Reference,
        freestanding: bool,
    },
    OnImage {
        reference: Reference,
        freestanding: bool,
    },
    OnVerbatimInline {
        content: String,
        params: Parameters,
    },
    OnMacroInline {
        name: String,
        params: Parameters,
        content: Option<String>,
    },
}

impl Event {
    /// The snake-case name of the event, e.g. `begin_header`.
    pub fn name(&self) -> &'static str {
        match self {
            Event::BeginDocument(_) => "begin_document",
            Event::EndDocument(_) => "end_document",
            Event::BeginSection { .. } => "begin_section",
            Event::EndSection { .. } => "end_section",
            Event::BeginHeader { .. } => "begin_header",
            Event::EndHeader { .. } => "end_header",
            Event::BeginParagraph(_) => "begin_paragraph",
            Event::EndParagraph(_) => "end_paragraph",
            Event::BeginInfoBlock { .. } => "begin_info_block",
            Event::EndInfoBlock { .. } => "end_info_block",
            Event::OnEmptyLines(_) => "on_empty_lines",
            Event::OnHorizontalLine(_) => "on_horizontal_line",
            Event::OnVerbatimBlock { .. } => "on_verbatim_block",
            Event::OnMacroBlock { .. } => "on_macro_block",
            Event::OnRawText { .. } => "on_raw_text",
            Event::BeginQuotation(_) => "begin_quotation",
            Event::EndQuotation(_) => "end_quotation",
            Event::BeginQuotationLine => "begin_quotation_line",
            Event::EndQuotationLine => "end_quotation_line",
            Event::BeginList { .. } => "begin_list",
            Event::EndList { .. } => "end_list",
            Event::BeginListItem(_) => "begin_list_item",
            Event::EndListItem(_) => "end_list_item",
            Event::BeginDefinitionList(_) => "begin_definition_list",
            Event::EndDefinitionList(_) => "end_definition_list",
            Event::BeginDefinitionTerm => "begin_definition_term",
            Event::EndDefinitionTerm => "end_definition_term",
            Event::BeginDefinitionDescription => "begin_definition_description",
            Event::EndDefinitionDescription => "end_definition_description",
            Event::BeginTable(_) => "begin_table",
            Event::EndTable(_) => "end_table",
            Event::BeginTableRow(_) => "begin_table_row",
            Event::EndTableRow(_) => "end_table_row",
            Event::BeginTableCell { .. } => "begin_table_cell",
            Event::EndTableCell { .. } => "end_table_cell",
            Event::BeginFigure(_) => "begin_figure",
            Event::EndFigure(_) => "end_figure",
            Event::BeginFigureCaption(_) => "begin_figure_caption",
            Event::EndFigureCaption(_) => "end_figure_caption",
            Event::BeginMetadata(_) => "begin_metadata",
            Event::EndMetadata(_) => "end_metadata",
            Event::BeginFormat(_) => "begin_format",
            Event::EndFormat(_) => "end_format",
            Event::OnWord(_) => "on_word",
            Event::OnSpace(_) => "on_space",
            Event::OnSpecialSymbol(_) => "on_special_symbol",
            Event::OnEscape(_) => "on_escape",
            Event::OnNewLine => "on_new_line",
            Event::OnLineBreak => "on_line_break",
            Event::OnId(_) => "on_id",
            Event::OnReference { .. } => "on_reference",
            Event::OnImage { .. } => "on_image",
            Event::OnVerbatimInline { .. } => "on_verbatim_inline",
            Event::OnMacroInline { .. } => "on_macro_inline",
        }
    }

    /// True for events that open a container.
    pub fn is_begin(&self) -> bool {
        self.name().starts_with("begin_")
    }

    /// True for events that close a container.
    pub fn is_end(&self) -> bool {
        self.name().starts_with("end_")
    }

    /// The end event that must close this begin event, or `None` for end and
    /// leaf events.
    pub fn matching_end(&self) -> Option<Event> {
        let end = match self {
            Event::BeginDocument(p) => Event::EndDocument(p.clone()),
            Event::BeginSection { level, params } => Event::EndSection {
                level: *level,
                params: params.clone(),
            },
            Event::BeginHeader { level, id, params } => Event::EndHeader {
                level: *level,
                id: id.clone(),
                params: params.clone(),
            },
            Event::BeginParagraph(p) => Event::EndParagraph(p.clone()),
            Event::BeginInfoBlock { info_type, params } => Event::EndInfoBlock {
                info_type: info_type.clone(),
                params: params.clone(),
            },
            Event::BeginQuotation(p) => Event::EndQuotation(p.clone()),
            Event::BeginQuotationLine => Event::EndQuotationLine,
            Event::BeginList { ordered, params } => Event::EndList {
                ordered: *ordered,
                params: params.clone(),
            },
            Event::BeginListItem(p) => Event::EndListItem(p.clone()),
            Event::BeginDefinitionList(p) => Event::EndDefinitionList(p.clone()),
            Event::BeginDefinitionTerm => Event::EndDefinitionTerm,
            Event::BeginDefinitionDescription => Event::EndDefinitionDescription,
            Event::BeginTable(p) => Event::EndTable(p.clone()),
            Event::BeginTableRow(p) => Event::EndTableRow(p.clone()),
            Event::BeginTableCell { head, params } => Event::EndTableCell {
                head: *head,
                params: params.clone(),
            },
            Event::BeginFigure(p) => Event::EndFigure(p.clone()),
            Event::BeginFigureCaption(p) => Event::EndFigureCaption(p.clone()),
            Event::BeginMetadata(p) => Event::EndMetadata(p.clone()),
            Event::BeginFormat(f) => Event::EndFormat(f.clone()),
            _ => return None,
        };
        Some(end)
    }
}
