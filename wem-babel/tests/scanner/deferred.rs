use crate::common::{names, scan, scan_body};
use wem_babel::{Event, Parameters, ScannerOptions, WikiScanner};

fn toc() -> Event {
    Event::OnMacroInline {
        name: "toc".into(),
        params: Parameters::new(),
        content: None,
    }
}

fn toc_block() -> Event {
    Event::OnMacroBlock {
        name: "toc".into(),
        params: Parameters::new(),
        content: None,
    }
}

#[test]
fn test_macro_followed_by_text_is_inline() {
    let events = scan_body(|s| {
        s.on_macro("toc", Parameters::new(), None);
        s.on_space(" ");
        s.on_word("after");
    });
    assert_eq!(
        names(&events),
        ["begin_paragraph", "on_macro_inline", "on_space", "on_word", "end_paragraph"]
    );
    assert_eq!(events[1], toc());
}

#[test]
fn test_macro_alone_on_its_line_is_a_block() {
    let events = scan_body(|s| {
        s.on_macro("toc", Parameters::new(), None);
        s.on_new_line();
        s.on_word("text");
    });
    assert_eq!(
        names(&events),
        ["on_macro_block", "begin_paragraph", "on_word", "end_paragraph"]
    );
    assert_eq!(events[0], toc_block());
}

#[test]
fn test_macro_before_a_block_is_a_block() {
    let events = scan_body(|s| {
        s.on_macro("toc", Parameters::new(), None);
        s.begin_header(1, Parameters::new());
    });
    assert_eq!(events[0], toc_block());
    assert_eq!(events[1].name(), "begin_section");
}

#[test]
fn test_macro_at_document_end_is_a_block() {
    let events = scan(|s| {
        s.on_word("text");
        s.on_new_line();
        s.end_paragraph();
        s.on_macro("toc", Parameters::new(), Some("body".into()));
    });
    let tail: Vec<&str> = names(&events).into_iter().rev().take(2).collect();
    assert_eq!(tail, ["end_document", "on_macro_block"]);
}

#[test]
fn test_macro_inside_a_paragraph_is_inline() {
    let events = scan_body(|s| {
        s.on_word("see");
        s.on_macro("toc", Parameters::new(), None);
        s.on_new_line();
    });
    assert_eq!(
        names(&events),
        ["begin_paragraph", "on_word", "on_macro_inline", "on_new_line", "end_paragraph"]
    );
}

#[test]
fn test_two_macros_on_one_line_are_inline() {
    let events = scan_body(|s| {
        s.on_macro("a", Parameters::new(), None);
        s.on_macro("b", Parameters::new(), None);
    });
    let macros: Vec<&str> = events
        .iter()
        .filter_map(|event| match event {
            Event::OnMacroInline { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(macros, ["a", "b"]);
    assert_eq!(events.first().map(Event::name), Some("begin_paragraph"));
}

#[test]
fn test_deferral_can_be_turned_off() {
    let options = ScannerOptions {
        defer_ambiguous_blocks: false,
        ..ScannerOptions::default()
    };
    let mut scanner = WikiScanner::with_options(Vec::<Event>::new(), options);
    scanner.on_macro("toc", Parameters::new(), None);
    scanner.on_word("next");
    let events = scanner.finish();
    assert_eq!(events[1], toc_block());
    assert_eq!(events[2].name(), "begin_paragraph");
}

#[test]
fn test_verbatim_follows_the_same_rules() {
    let events = scan_body(|s| {
        s.on_verbatim("x = 1", Parameters::new());
        s.on_new_line();
        s.on_verbatim("y", Parameters::new());
        s.on_word("z");
    });
    assert_eq!(
        events[0],
        Event::OnVerbatimBlock {
            content: "x = 1".into(),
            params: Parameters::new()
        }
    );
    assert_eq!(
        events[2],
        Event::OnVerbatimInline {
            content: "y".into(),
            params: Parameters::new()
        }
    );
    assert_eq!(events[1].name(), "begin_paragraph");
}

#[test]
fn test_explicit_forms_are_not_deferred() {
    let events = scan_body(|s| {
        s.on_word("text");
        s.on_macro_block("toc", Parameters::new(), None);
        s.on_verbatim_inline("code", Parameters::new());
    });
    assert_eq!(
        names(&events),
        [
            "begin_paragraph",
            "on_word",
            "end_paragraph",
            "on_macro_block",
            "begin_paragraph",
            "on_verbatim_inline",
            "end_paragraph",
        ]
    );
}

#[test]
fn test_raw_text_between_blocks_stands_alone() {
    let events = scan_body(|s| {
        s.on_raw_text("<hr/>", "html");
        s.on_word("text");
        s.on_raw_text("<br/>", "html");
    });
    assert_eq!(
        names(&events),
        ["on_raw_text", "begin_paragraph", "on_word", "on_raw_text", "end_paragraph"]
    );
}
