use crate::common::{names, scan_body};
use wem_babel::{Event, Format, Parameters, Style};

#[test]
fn test_toggling_back_and_forth_emits_no_span() {
    let events = scan_body(|s| {
        s.on_format(Style::Strong);
        s.on_format(Style::Strong);
        s.on_word("plain");
    });
    assert_eq!(names(&events), ["begin_paragraph", "on_word", "end_paragraph"]);
}

#[test]
fn test_span_closes_when_style_is_toggled_off() {
    let events = scan_body(|s| {
        s.on_format(Style::Strong);
        s.on_word("bold");
        s.on_format(Style::Strong);
        s.on_word("plain");
    });
    assert_eq!(
        events,
        [
            Event::BeginParagraph(Parameters::new()),
            Event::BeginFormat(Format::of(Style::Strong)),
            Event::OnWord("bold".into()),
            Event::EndFormat(Format::of(Style::Strong)),
            Event::OnWord("plain".into()),
            Event::EndParagraph(Parameters::new()),
        ]
    );
}

#[test]
fn test_adding_a_style_reopens_the_span() {
    let events = scan_body(|s| {
        s.on_format(Style::Strong);
        s.on_word("a");
        s.on_format(Style::Emphasis);
        s.on_word("b");
    });
    let both = Format::new([Style::Strong, Style::Emphasis], Parameters::new());
    assert_eq!(
        events[1..6],
        [
            Event::BeginFormat(Format::of(Style::Strong)),
            Event::OnWord("a".into()),
            Event::EndFormat(Format::of(Style::Strong)),
            Event::BeginFormat(both.clone()),
            Event::OnWord("b".into()),
        ]
    );
    assert_eq!(events[6], Event::EndFormat(both));
}

#[test]
fn test_format_parameters_alone_open_a_span() {
    let params = Parameters::new().with("class", "note");
    let events = scan_body(|s| {
        s.on_format_parameters(params.clone());
        s.on_word("styled");
    });
    assert_eq!(
        events[1],
        Event::BeginFormat(Format::default().with_params(params))
    );
}

#[test]
fn test_block_end_closes_and_resets_the_span() {
    let events = scan_body(|s| {
        s.on_format(Style::Emphasis);
        s.on_word("open");
        s.begin_header(1, Parameters::new());
        s.on_word("title");
    });
    assert_eq!(
        names(&events),
        [
            "begin_paragraph",
            "begin_format",
            "on_word",
            "end_format",
            "end_paragraph",
            "begin_section",
            "begin_header",
            "on_word",
            "end_header",
            "end_section",
        ]
    );
}

#[test]
fn test_list_items_do_not_inherit_the_span() {
    let events = scan_body(|s| {
        s.begin_list_item("*", Parameters::new());
        s.on_format(Style::Code);
        s.on_word("one");
        s.begin_list_item("*", Parameters::new());
        s.on_word("two");
    });
    assert_eq!(
        names(&events),
        [
            "begin_list",
            "begin_list_item",
            "begin_format",
            "on_word",
            "end_format",
            "end_list_item",
            "begin_list_item",
            "on_word",
            "end_list_item",
            "end_list",
        ]
    );
}
