use crate::common::{scan, trace_of};
use wem_babel::{Parameters, Reference, Style};

#[test]
fn test_trace_of_header_paragraph_and_list() {
    let events = scan(|s| {
        s.begin_header(1, Parameters::new().with("id", "top"));
        s.on_word("Title");
        s.end_header();
        s.on_format(Style::Strong);
        s.on_word("bold");
        s.on_format(Style::Strong);
        s.on_space(" ");
        s.on_word("plain");
        s.begin_list_item("*", Parameters::new());
        s.on_word("item");
    });
    insta::assert_snapshot!(trace_of(&events), @r#"
    begin_document
      begin_section(level=1)
        begin_header(level=1, id=top) [id="top"]
          on_word "Title"
        end_header(level=1, id=top) [id="top"]
        begin_paragraph
          begin_format(strong)
            on_word "bold"
          end_format(strong)
          on_space " "
          on_word "plain"
        end_paragraph
        begin_list(ordered=false)
          begin_list_item
            on_word "item"
          end_list_item
        end_list(ordered=false)
      end_section(level=1)
    end_document
    "#);
}

#[test]
fn test_trace_of_figure_with_caption() {
    let events = scan(|s| {
        s.begin_figure(Parameters::new());
        s.on_image(Reference::new("cat.png"), true);
        s.begin_figure_caption(Parameters::new());
        s.on_word("A");
        s.on_space(" ");
        s.on_word("cat");
        s.end_figure();
    });
    insta::assert_snapshot!(trace_of(&events), @r#"
    begin_document
      begin_figure
        begin_paragraph
          on_image(cat.png, freestanding)
        end_paragraph
        begin_figure_caption
          begin_paragraph
            on_word "A"
            on_space " "
            on_word "cat"
          end_paragraph
        end_figure_caption
      end_figure
    end_document
    "#);
}
