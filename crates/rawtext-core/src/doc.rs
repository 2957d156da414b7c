//! The editable document tree.
//!
//! This is the serializable form the external editing surface reads and
//! replaces wholesale: paragraphs and page breaks at the block level, text
//! runs and annotation spans inline. It is also what saved-composition
//! records snapshot.

use serde::{Deserialize, Serialize};

use crate::format::Format;
use crate::ident::{EventId, SpanKey};

/// A formatted text run, the leaf of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub format: Format,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: Format::default(),
            color: None,
        }
    }

    pub fn styled(text: impl Into<String>, format: Format) -> Self {
        Self {
            text: text.into(),
            format,
            color: None,
        }
    }
}

/// An annotation span: a run of text nodes the document treats as one inline
/// unit, bound to one or more event identifiers. The span owns its children
/// exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanNode {
    pub key: SpanKey,
    pub ids: Vec<EventId>,
    pub children: Vec<TextRun>,
}

/// Inline content of a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inline {
    Run(TextRun),
    Span(SpanNode),
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Paragraph(Vec<Inline>),
    PageBreak,
}

/// The whole editable document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the document holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.preview().is_empty()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Plain-text rendition: paragraphs joined by line feeds, surrounding
    /// whitespace trimmed. Used for record previews and listings.
    pub fn preview(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(inlines) => {
                    if !out.is_empty() {
                        out.push('\n');
                    }
                    for inline in inlines {
                        match inline {
                            Inline::Run(run) => out.push_str(&run.text),
                            Inline::Span(span) => {
                                for child in &span.children {
                                    out.push_str(&child.text);
                                }
                            }
                        }
                    }
                }
                Block::PageBreak => {}
            }
        }
        out.trim().to_string()
    }

    /// Every annotation identifier referenced by a span, in document order.
    pub fn annotation_ids(&self) -> Vec<EventId> {
        let mut ids = Vec::new();
        for block in &self.blocks {
            if let Block::Paragraph(inlines) = block {
                for inline in inlines {
                    if let Inline::Span(span) = inline {
                        ids.extend(span.ids.iter().cloned());
                    }
                }
            }
        }
        ids
    }

    /// Keys of every annotation span, in document order.
    pub fn span_keys(&self) -> Vec<SpanKey> {
        let mut keys = Vec::new();
        for block in &self.blocks {
            if let Block::Paragraph(inlines) = block {
                for inline in inlines {
                    if let Inline::Span(span) = inline {
                        keys.push(span.key.clone());
                    }
                }
            }
        }
        keys
    }
}
