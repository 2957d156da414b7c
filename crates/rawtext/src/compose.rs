//! The compose (selection → command) and import (raw text → document)
//! pipelines.

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use rawtext_codec::decoder::parse;
use rawtext_codec::encoder::encode;
use rawtext_codec::error::{EncodeError, ParseError};
use rawtext_core::doc::{Block, Document, Inline, SpanNode, TextRun};
use rawtext_core::event::{EventCache, EventDescriptor};
use rawtext_core::ident::{EventId, IdMinter, SpanKey};
use rawtext_core::segment::{Line, LineUnit, Segment};
use rawtext_core::segmenter::segment;
use rawtext_core::selection::Selection;

use crate::command::{CommandKind, CommandTemplates};

/// Failures surfaced to the user by the compose pipeline.
#[derive(Debug, Error, PartialEq)]
pub enum ComposeError {
    /// Copying an empty selection has nothing to produce.
    #[error("selection contains no text")]
    EmptySelection,
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Compose the command string for a selection.
///
/// Read-only: neither the cache nor the document changes, whatever the
/// outcome.
pub fn compose_command(
    selection: &Selection,
    kind: CommandKind,
    cache: &EventCache,
    templates: &CommandTemplates,
) -> Result<String, ComposeError> {
    let layout = segment(selection, kind.packing());
    if layout.is_blank() {
        debug!("refusing to compose an empty selection");
        return Err(ComposeError::EmptySelection);
    }
    Ok(encode(&layout, kind.packing(), cache, templates.for_kind(kind))?)
}

/// A parsed import, ready to merge into a workspace.
#[derive(Debug)]
pub struct Import {
    pub document: Document,
    pub events: Vec<EventDescriptor>,
    pub span_keys: IndexMap<EventId, SpanKey>,
}

/// Parse raw component text into a fresh document plus the event
/// descriptors and span bindings the caller must merge. All-or-nothing: a
/// parse error leaves nothing to apply.
pub fn import_document(raw: &str, minter: &mut IdMinter) -> Result<Import, ParseError> {
    let parsed = parse(raw, minter)?;
    let document = document_from_lines(&parsed.lines, &parsed.span_keys);
    Ok(Import {
        document,
        events: parsed.events,
        span_keys: parsed.span_keys,
    })
}

fn run_from(seg: &Segment) -> TextRun {
    TextRun {
        text: seg.text.clone(),
        format: seg.format,
        color: seg.color.clone(),
    }
}

/// Rebuild document blocks from parsed lines, binding span units to their
/// placeholder keys.
fn document_from_lines(lines: &[Line], span_keys: &IndexMap<EventId, SpanKey>) -> Document {
    let mut blocks = Vec::with_capacity(lines.len());
    for line in lines {
        let mut inlines = Vec::with_capacity(line.units.len());
        for unit in &line.units {
            match unit {
                LineUnit::Segment(seg) => inlines.push(Inline::Run(run_from(seg))),
                LineUnit::Span(span) => {
                    match span.ids.first().and_then(|id| span_keys.get(id)) {
                        Some(key) => inlines.push(Inline::Span(SpanNode {
                            key: key.clone(),
                            ids: span.ids.clone(),
                            children: span.segments.iter().map(run_from).collect(),
                        })),
                        None => {
                            for seg in &span.segments {
                                inlines.push(Inline::Run(run_from(seg)));
                            }
                        }
                    }
                }
            }
        }
        blocks.push(Block::Paragraph(inlines));
    }
    Document { blocks }
}
