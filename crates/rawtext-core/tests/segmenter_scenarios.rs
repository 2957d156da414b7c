use rawtext_core::doc::TextRun;
use rawtext_core::format::Format;
use rawtext_core::ident::{EventId, SpanKey};
use rawtext_core::segment::{Layout, LineUnit, Packing};
use rawtext_core::segmenter::segment;
use rawtext_core::selection::{Direction, SelNode, Selection, SpanInfo};

fn run(text: &str) -> SelNode {
    SelNode::Run(TextRun::plain(text))
}

fn bold_run(text: &str) -> SelNode {
    SelNode::Run(TextRun::styled(
        text,
        Format {
            bold: true,
            ..Format::default()
        },
    ))
}

fn span_info(key: &str, ids: &[&str], len: usize) -> SpanInfo {
    SpanInfo {
        key: SpanKey(key.to_string()),
        ids: ids.iter().map(|s| EventId(s.to_string())).collect(),
        len,
    }
}

fn span_run(text: &str, span: &SpanInfo, index: usize) -> SelNode {
    SelNode::SpanRun {
        run: TextRun::plain(text),
        span: span.clone(),
        index,
    }
}

/// Two paragraphs: the leading boundary is discarded, the inner one splits.
fn two_paragraphs() -> Vec<SelNode> {
    vec![
        SelNode::ParagraphBreak,
        run("first"),
        SelNode::ParagraphBreak,
        run("second"),
    ]
}

#[test]
fn flow_merges_paragraphs_with_embedded_newline() {
    let layout = segment(&Selection::forward(two_paragraphs()), Packing::Flow);
    let lines = layout.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text(), "first\nsecond");
}

#[test]
fn lines_packing_closes_a_line_per_paragraph() {
    let layout = segment(&Selection::forward(two_paragraphs()), Packing::Lines);
    let lines = layout.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text(), "first");
    assert_eq!(lines[1].text(), "second");
}

#[test]
fn first_boundary_is_always_discarded() {
    // A single paragraph produces one line with no leading newline.
    let nodes = vec![SelNode::ParagraphBreak, run("only")];
    let layout = segment(&Selection::forward(nodes), Packing::Flow);
    assert_eq!(layout.lines()[0].text(), "only");
}

#[test]
fn boundary_on_empty_line_is_a_no_op_for_flow() {
    // Boundary arrives before any segment was emitted on the current line.
    let nodes = vec![
        SelNode::ParagraphBreak,
        SelNode::ParagraphBreak,
        run("body"),
    ];
    let layout = segment(&Selection::forward(nodes), Packing::Flow);
    assert_eq!(layout.lines()[0].text(), "body");
}

#[test]
fn backward_selection_produces_document_order() {
    let mut nodes = two_paragraphs();
    nodes.reverse();
    let layout = segment(&Selection::new(nodes, Direction::Backward), Packing::Lines);
    let lines = layout.lines();
    assert_eq!(lines[0].text(), "first");
    assert_eq!(lines[1].text(), "second");
}

#[test]
fn formats_survive_segmentation() {
    let nodes = vec![SelNode::ParagraphBreak, run("a"), bold_run("b")];
    let layout = segment(&Selection::forward(nodes), Packing::Flow);
    let line = &layout.lines()[0];
    assert_eq!(line.units.len(), 2);
    match &line.units[1] {
        LineUnit::Segment(seg) => assert!(seg.format.bold),
        other => panic!("expected segment, got {other:?}"),
    }
}

#[test]
fn fully_covered_span_stays_atomic() {
    let span = span_info("k", &["e1", "e2"], 3);
    let nodes = vec![
        SelNode::ParagraphBreak,
        span_run("a", &span, 0),
        span_run("b", &span, 1),
        span_run("c", &span, 2),
    ];
    let layout = segment(&Selection::forward(nodes), Packing::Flow);
    let line = &layout.lines()[0];
    assert_eq!(line.units.len(), 1);
    match &line.units[0] {
        LineUnit::Span(span_unit) => {
            assert_eq!(
                span_unit.ids,
                vec![EventId("e1".into()), EventId("e2".into())]
            );
            assert_eq!(span_unit.segments.len(), 3);
        }
        other => panic!("expected span, got {other:?}"),
    }
}

#[test]
fn partially_covered_span_drops_its_identifiers() {
    let span = span_info("k", &["e1"], 3);
    let nodes = vec![
        SelNode::ParagraphBreak,
        span_run("b", &span, 1),
        span_run("c", &span, 2),
    ];
    let layout = segment(&Selection::forward(nodes), Packing::Flow);
    let line = &layout.lines()[0];
    assert_eq!(line.units.len(), 2);
    for unit in &line.units {
        assert!(matches!(unit, LineUnit::Segment(_)));
    }
}

#[test]
fn newline_lands_on_span_tail_in_flow() {
    let span = span_info("k", &["e1"], 1);
    let nodes = vec![
        SelNode::ParagraphBreak,
        span_run("linked", &span, 0),
        SelNode::ParagraphBreak,
        run("after"),
    ];
    let layout = segment(&Selection::forward(nodes), Packing::Flow);
    let line = &layout.lines()[0];
    match &line.units[0] {
        LineUnit::Span(span_unit) => assert_eq!(span_unit.segments[0].text, "linked\n"),
        other => panic!("expected span, got {other:?}"),
    }
}

#[test]
fn two_page_breaks_make_three_pages() {
    let nodes = vec![
        SelNode::ParagraphBreak,
        run("one"),
        SelNode::PageBreak,
        run("two"),
        SelNode::ParagraphBreak,
        run("three"),
        SelNode::PageBreak,
        run("four"),
    ];
    let layout = segment(&Selection::forward(nodes), Packing::Paged);
    match &layout {
        Layout::Pages(pages) => {
            assert_eq!(pages.len(), 3);
            assert_eq!(pages[0].text(), "one");
            // The ordinary boundary inside page two embeds a newline.
            assert_eq!(pages[1].text(), "two\nthree");
            assert_eq!(pages[2].text(), "four");
        }
        other => panic!("expected pages, got {other:?}"),
    }
}

#[test]
fn page_breaks_are_ignored_outside_paged_packing() {
    let nodes = vec![
        SelNode::ParagraphBreak,
        run("one"),
        SelNode::PageBreak,
        run("two"),
    ];
    let layout = segment(&Selection::forward(nodes), Packing::Lines);
    let lines = layout.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text(), "onetwo");
}

#[test]
fn trailing_boundary_leaves_an_empty_line() {
    let nodes = vec![run("only"), SelNode::ParagraphBreak, SelNode::ParagraphBreak];
    let layout = segment(&Selection::forward(nodes), Packing::Lines);
    // First boundary is discarded, the second closes "only", and the
    // still-open empty line is pushed at the end.
    let lines = layout.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text(), "only");
    assert!(lines[1].is_empty());
}

#[test]
fn empty_selection_yields_one_blank_line() {
    let layout = segment(&Selection::forward(Vec::new()), Packing::Flow);
    assert_eq!(layout.lines().len(), 1);
    assert!(layout.is_blank());
}
