//! Arbitrary call sequences over the whole scanner surface.

use crate::common::assert_well_nested;
use proptest::prelude::*;
use wem_babel::{
    events_to_tree, Event, Parameters, Reference, ScannerOptions, Style, WikiScanner,
};

#[derive(Debug, Clone)]
enum Call {
    BeginDocument,
    EndDocument,
    BeginFigure,
    EndFigure,
    BeginFigureCaption,
    EndFigureCaption,
    BeginMetadata,
    EndMetadata,
    BeginHeader(usize),
    EndHeader,
    BeginParagraph,
    EndParagraph,
    BeginInfo,
    EndInfo,
    EmptyLines(usize),
    HorizontalLine,
    BeginList,
    BeginListItem(&'static str),
    EndList,
    BeginQuotationLine(usize),
    EndQuotation,
    BeginTable,
    BeginTableRow,
    BeginTableCell(bool),
    EndTableCell,
    EndTableRow,
    EndTable,
    Format(Style),
    FormatParameters,
    Word,
    Space,
    SpecialSymbol,
    Escape,
    Id,
    LineBreak,
    NewLine,
    Reference(bool),
    Image(bool),
    RawText,
    Verbatim,
    VerbatimBlock,
    VerbatimInline,
    Macro,
    MacroBlock,
    MacroInline,
}

fn style_strategy() -> impl Strategy<Value = Style> {
    prop::sample::select(vec![
        Style::Strong,
        Style::Emphasis,
        Style::Strike,
        Style::Monospace,
        Style::Superscript,
        Style::Code,
    ])
}

fn context_calls() -> impl Strategy<Value = Call> {
    prop_oneof![
        Just(Call::BeginDocument),
        Just(Call::EndDocument),
        Just(Call::BeginFigure),
        Just(Call::EndFigure),
        Just(Call::BeginFigureCaption),
        Just(Call::EndFigureCaption),
        Just(Call::BeginMetadata),
        Just(Call::EndMetadata),
    ]
}

fn block_calls() -> impl Strategy<Value = Call> {
    prop_oneof![
        (0..9usize).prop_map(Call::BeginHeader),
        Just(Call::EndHeader),
        Just(Call::BeginParagraph),
        Just(Call::EndParagraph),
        Just(Call::BeginInfo),
        Just(Call::EndInfo),
        (0..3usize).prop_map(Call::EmptyLines),
        Just(Call::HorizontalLine),
    ]
}

fn nesting_calls() -> impl Strategy<Value = Call> {
    prop_oneof![
        Just(Call::BeginList),
        prop::sample::select(vec!["", "*", "#", "**", "*#", "#*", ";", ":", ";:", "*;:", "?"])
            .prop_map(Call::BeginListItem),
        Just(Call::EndList),
        (0..4usize).prop_map(Call::BeginQuotationLine),
        Just(Call::EndQuotation),
    ]
}

fn table_calls() -> impl Strategy<Value = Call> {
    prop_oneof![
        Just(Call::BeginTable),
        Just(Call::BeginTableRow),
        any::<bool>().prop_map(Call::BeginTableCell),
        Just(Call::EndTableCell),
        Just(Call::EndTableRow),
        Just(Call::EndTable),
    ]
}

fn inline_calls() -> impl Strategy<Value = Call> {
    prop_oneof![
        style_strategy().prop_map(Call::Format),
        Just(Call::FormatParameters),
        Just(Call::Word),
        Just(Call::Space),
        Just(Call::SpecialSymbol),
        Just(Call::Escape),
        Just(Call::Id),
        Just(Call::LineBreak),
        Just(Call::NewLine),
        any::<bool>().prop_map(Call::Reference),
    ]
}

fn ambiguous_calls() -> impl Strategy<Value = Call> {
    prop_oneof![
        any::<bool>().prop_map(Call::Image),
        Just(Call::RawText),
        Just(Call::Verbatim),
        Just(Call::VerbatimBlock),
        Just(Call::VerbatimInline),
        Just(Call::Macro),
        Just(Call::MacroBlock),
        Just(Call::MacroInline),
    ]
}

fn call_strategy() -> impl Strategy<Value = Call> {
    prop_oneof![
        context_calls(),
        block_calls(),
        nesting_calls(),
        table_calls(),
        inline_calls(),
        ambiguous_calls(),
    ]
}

fn options_strategy() -> impl Strategy<Value = ScannerOptions> {
    (any::<bool>(), any::<bool>(), 0..7usize).prop_map(
        |(emit_sections, defer_ambiguous_blocks, max_header_level)| ScannerOptions {
            emit_sections,
            defer_ambiguous_blocks,
            max_header_level,
        },
    )
}

fn params() -> Parameters {
    Parameters::new().with("class", "c")
}

fn apply(scanner: &mut WikiScanner<Vec<Event>>, call: &Call) {
    match call {
        Call::BeginDocument => scanner.begin_document(params()),
        Call::EndDocument => scanner.end_document(),
        Call::BeginFigure => scanner.begin_figure(params()),
        Call::EndFigure => scanner.end_figure(),
        Call::BeginFigureCaption => scanner.begin_figure_caption(Parameters::new()),
        Call::EndFigureCaption => scanner.end_figure_caption(),
        Call::BeginMetadata => scanner.begin_metadata(Parameters::new()),
        Call::EndMetadata => scanner.end_metadata(),
        Call::BeginHeader(level) => scanner.begin_header(*level, Parameters::new().with("id", "h")),
        Call::EndHeader => scanner.end_header(),
        Call::BeginParagraph => scanner.begin_paragraph(params()),
        Call::EndParagraph => scanner.end_paragraph(),
        Call::BeginInfo => scanner.begin_info("note", Parameters::new()),
        Call::EndInfo => scanner.end_info(),
        Call::EmptyLines(count) => scanner.on_empty_lines(*count),
        Call::HorizontalLine => scanner.on_horizontal_line(Parameters::new()),
        Call::BeginList => scanner.begin_list(params()),
        Call::BeginListItem(path) => scanner.begin_list_item(path, Parameters::new()),
        Call::EndList => scanner.end_list(),
        Call::BeginQuotationLine(depth) => scanner.begin_quotation_line(*depth, Parameters::new()),
        Call::EndQuotation => scanner.end_quotation(),
        Call::BeginTable => scanner.begin_table(params()),
        Call::BeginTableRow => scanner.begin_table_row(Parameters::new()),
        Call::BeginTableCell(head) => scanner.begin_table_cell(*head, Parameters::new()),
        Call::EndTableCell => scanner.end_table_cell(),
        Call::EndTableRow => scanner.end_table_row(),
        Call::EndTable => scanner.end_table(),
        Call::Format(style) => scanner.on_format(*style),
        Call::FormatParameters => scanner.on_format_parameters(params()),
        Call::Word => scanner.on_word("word"),
        Call::Space => scanner.on_space(" "),
        Call::SpecialSymbol => scanner.on_special_symbol("&"),
        Call::Escape => scanner.on_escape("*"),
        Call::Id => scanner.on_id("anchor"),
        Call::LineBreak => scanner.on_line_break(),
        Call::NewLine => scanner.on_new_line(),
        Call::Reference(freestanding) => {
            scanner.on_reference(Reference::new("https://example.org"), *freestanding)
        }
        Call::Image(freestanding) => scanner.on_image(Reference::new("pic.png"), *freestanding),
        Call::RawText => scanner.on_raw_text("<b>", "html"),
        Call::Verbatim => scanner.on_verbatim("code", Parameters::new()),
        Call::VerbatimBlock => scanner.on_verbatim_block("code", Parameters::new()),
        Call::VerbatimInline => scanner.on_verbatim_inline("code", Parameters::new()),
        Call::Macro => scanner.on_macro("toc", Parameters::new(), None),
        Call::MacroBlock => scanner.on_macro_block("toc", Parameters::new(), Some("x".into())),
        Call::MacroInline => scanner.on_macro_inline("toc", Parameters::new(), None),
    }
}

/// Splits the stream into its top-level documents.
fn top_level_documents(events: &[Event]) -> Vec<&[Event]> {
    let mut documents = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, event) in events.iter().enumerate() {
        if event.is_begin() {
            depth += 1;
        } else if event.is_end() {
            depth -= 1;
            if depth == 0 {
                documents.push(&events[start..=index]);
                start = index + 1;
            }
        }
    }
    documents
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn any_call_sequence_yields_well_nested_documents(
        options in options_strategy(),
        calls in prop::collection::vec(call_strategy(), 0..60),
    ) {
        let mut scanner = WikiScanner::with_options(Vec::new(), options);
        for call in &calls {
            apply(&mut scanner, call);
        }
        let events = scanner.finish();
        assert_well_nested(&events);

        let documents = top_level_documents(&events);
        let covered: usize = documents.iter().map(|document| document.len()).sum();
        prop_assert_eq!(covered, events.len(), "events outside any document");
        for document in documents {
            prop_assert!(matches!(document.first(), Some(Event::BeginDocument(_))));
            if let Err(err) = events_to_tree(document) {
                return Err(TestCaseError::fail(format!("rejected by the tree builder: {err}")));
            }
        }
    }
}
