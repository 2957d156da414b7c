//! The extracted-selection model.
//!
//! The external editing surface extracts a user selection into an ordered
//! node list; this module defines the shape of that list. Whether a node is
//! plain text, part of an annotation span, or a boundary marker is a tagged
//! variant, so downstream code matches instead of probing node types.

use crate::doc::{Block, Document, Inline};
use crate::ident::{EventId, SpanKey};

pub use crate::doc::TextRun;

/// Which way the user dragged the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// The annotation span a covered child belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanInfo {
    pub key: SpanKey,
    pub ids: Vec<EventId>,
    /// How many children the span has in the document, covered or not.
    pub len: usize,
}

/// One entry of an extracted selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SelNode {
    /// A plain text run.
    Run(TextRun),
    /// A text run that lives inside an annotation span, with its position
    /// among the span's children.
    SpanRun {
        run: TextRun,
        span: SpanInfo,
        index: usize,
    },
    /// Marks the start of a paragraph.
    ParagraphBreak,
    /// An explicit page-break marker.
    PageBreak,
}

/// An extracted selection: the covered nodes plus the drag direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub nodes: Vec<SelNode>,
    pub direction: Direction,
}

impl Selection {
    pub fn new(nodes: Vec<SelNode>, direction: Direction) -> Self {
        Self { nodes, direction }
    }

    pub fn forward(nodes: Vec<SelNode>) -> Self {
        Self::new(nodes, Direction::Forward)
    }

    /// Extract the whole document as a forward selection. Partial
    /// extractions supplied by the editing surface have the same shape.
    pub fn over(doc: &Document) -> Selection {
        let mut nodes = Vec::new();
        for block in &doc.blocks {
            match block {
                Block::Paragraph(inlines) => {
                    nodes.push(SelNode::ParagraphBreak);
                    for inline in inlines {
                        match inline {
                            Inline::Run(run) => nodes.push(SelNode::Run(run.clone())),
                            Inline::Span(span) => {
                                let info = SpanInfo {
                                    key: span.key.clone(),
                                    ids: span.ids.clone(),
                                    len: span.children.len(),
                                };
                                for (index, child) in span.children.iter().enumerate() {
                                    nodes.push(SelNode::SpanRun {
                                        run: child.clone(),
                                        span: info.clone(),
                                        index,
                                    });
                                }
                            }
                        }
                    }
                }
                Block::PageBreak => nodes.push(SelNode::PageBreak),
            }
        }
        Selection::forward(nodes)
    }

    /// Nodes in document order regardless of drag direction. A backward
    /// selection lists its nodes focus-first, so it is reversed here; every
    /// later stage can then assume start-to-end order.
    pub fn normalized(&self) -> Vec<SelNode> {
        match self.direction {
            Direction::Forward => self.nodes.clone(),
            Direction::Backward => self.nodes.iter().rev().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::SpanNode;

    #[test]
    fn backward_selection_normalizes_to_document_order() {
        let nodes = vec![
            SelNode::Run(TextRun::plain("b")),
            SelNode::Run(TextRun::plain("a")),
        ];
        let selection = Selection::new(nodes, Direction::Backward);
        let normalized = selection.normalized();
        assert_eq!(normalized[0], SelNode::Run(TextRun::plain("a")));
        assert_eq!(normalized[1], SelNode::Run(TextRun::plain("b")));
    }

    #[test]
    fn over_emits_paragraph_breaks_and_span_runs() {
        let doc = Document {
            blocks: vec![Block::Paragraph(vec![
                Inline::Run(TextRun::plain("x")),
                Inline::Span(SpanNode {
                    key: SpanKey("k".into()),
                    ids: vec![EventId("e".into())],
                    children: vec![TextRun::plain("y"), TextRun::plain("z")],
                }),
            ])],
        };
        let selection = Selection::over(&doc);
        assert_eq!(selection.nodes.len(), 4);
        assert_eq!(selection.nodes[0], SelNode::ParagraphBreak);
        match &selection.nodes[3] {
            SelNode::SpanRun { run, span, index } => {
                assert_eq!(run.text, "z");
                assert_eq!(span.len, 2);
                assert_eq!(*index, 1);
            }
            other => panic!("expected span run, got {other:?}"),
        }
    }
}
