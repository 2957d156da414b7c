//! Turns an extracted selection into lines and pages of segments.
//!
//! The scan is cursor-based: [`scan_step`] inspects the node under the
//! cursor and reports what it emitted together with how many input nodes it
//! consumed, so the span-consumption rule stays testable on its own.

use crate::segment::{Layout, Line, LineUnit, Packing, Segment, SpanUnit};
use crate::selection::{SelNode, Selection};

/// One step of the cursor scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanUnit {
    Segment(Segment),
    Span(SpanUnit),
    /// Partially covered span children, demoted to plain segments.
    Partial(Vec<Segment>),
    ParagraphBreak,
    PageBreak,
}

/// Inspect the node at `pos` and produce the next output unit plus the
/// number of nodes consumed.
///
/// A span child under the cursor is consumed as one atomic unit only when
/// every child of its span is present, contiguous, and in original order;
/// anything less demotes the covered children to plain segments with no
/// identifier reference. Dropping the association on partial coverage is
/// deliberate: a command must not carry an action whose text is half
/// missing.
pub fn scan_step(nodes: &[SelNode], pos: usize) -> (ScanUnit, usize) {
    match &nodes[pos] {
        SelNode::Run(run) => (ScanUnit::Segment(Segment::from_run(run)), 1),
        SelNode::ParagraphBreak => (ScanUnit::ParagraphBreak, 1),
        SelNode::PageBreak => (ScanUnit::PageBreak, 1),
        SelNode::SpanRun { run, span, index } => {
            let mut covered = vec![(run, *index)];
            let mut next = pos + 1;
            while next < nodes.len() {
                match &nodes[next] {
                    SelNode::SpanRun {
                        run: r,
                        span: s,
                        index: i,
                    } if s.key == span.key => {
                        covered.push((r, *i));
                        next += 1;
                    }
                    _ => break,
                }
            }
            let consumed = covered.len();
            let complete = consumed == span.len
                && covered.iter().enumerate().all(|(n, (_, i))| *i == n);
            let segments: Vec<Segment> =
                covered.iter().map(|(r, _)| Segment::from_run(r)).collect();
            if complete {
                (
                    ScanUnit::Span(SpanUnit {
                        ids: span.ids.clone(),
                        segments,
                    }),
                    consumed,
                )
            } else {
                (ScanUnit::Partial(segments), consumed)
            }
        }
    }
}

/// Group an extracted selection into lines (or pages) of segments.
///
/// The first paragraph boundary encountered marks the pre-existing start of
/// the first line and is discarded; later boundaries either close the
/// current line (`Lines`) or append a line feed to the last segment (`Flow`
/// and `Paged`). Page breaks close the current page under `Paged` and are
/// ignored otherwise. The line being built is always pushed at the end,
/// even when empty.
pub fn segment(selection: &Selection, packing: Packing) -> Layout {
    let nodes = selection.normalized();
    let mut closed: Vec<Line> = Vec::new();
    let mut current = Line::default();
    let mut saw_first_break = false;

    let mut pos = 0;
    while pos < nodes.len() {
        let (unit, consumed) = scan_step(&nodes, pos);
        pos += consumed;
        match unit {
            ScanUnit::Segment(seg) => current.push(LineUnit::Segment(seg)),
            ScanUnit::Span(span) => current.push(LineUnit::Span(span)),
            ScanUnit::Partial(segments) => {
                for seg in segments {
                    current.push(LineUnit::Segment(seg));
                }
            }
            ScanUnit::ParagraphBreak => {
                if !saw_first_break {
                    saw_first_break = true;
                    continue;
                }
                match packing {
                    Packing::Lines => closed.push(std::mem::take(&mut current)),
                    Packing::Flow | Packing::Paged => current.append_newline(),
                }
            }
            ScanUnit::PageBreak => {
                if packing == Packing::Paged {
                    closed.push(std::mem::take(&mut current));
                }
            }
        }
    }
    closed.push(current);

    match packing {
        Packing::Paged => Layout::Pages(closed),
        Packing::Flow | Packing::Lines => Layout::Lines(closed),
    }
}
