//! Segmentation output: lines of segments and atomic span units.

use crate::doc::TextRun;
use crate::format::Format;
use crate::ident::EventId;

/// One formatted text run of the output, detached from the document. Lives
/// for the duration of a single encode pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub format: Format,
    pub color: Option<String>,
}

impl Segment {
    pub fn from_run(run: &TextRun) -> Self {
        Self {
            text: run.text.clone(),
            format: run.format,
            color: run.color.clone(),
        }
    }
}

/// A fully-covered annotation span, consumed as one atomic unit. Carries
/// every identifier the span referenced in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanUnit {
    pub ids: Vec<EventId>,
    pub segments: Vec<Segment>,
}

/// One entry of a line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineUnit {
    Segment(Segment),
    Span(SpanUnit),
}

/// One paragraph-equivalent unit of output, in left-to-right order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub units: Vec<LineUnit>,
}

impl Line {
    pub fn push(&mut self, unit: LineUnit) {
        self.units.push(unit);
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Concatenated text of every segment in the line.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for unit in &self.units {
            match unit {
                LineUnit::Segment(seg) => out.push_str(&seg.text),
                LineUnit::Span(span) => {
                    for seg in &span.segments {
                        out.push_str(&seg.text);
                    }
                }
            }
        }
        out
    }

    /// Append a line feed to the last emitted segment, if any.
    pub(crate) fn append_newline(&mut self) {
        match self.units.last_mut() {
            Some(LineUnit::Segment(seg)) => seg.text.push('\n'),
            Some(LineUnit::Span(span)) => {
                if let Some(last) = span.segments.last_mut() {
                    last.text.push('\n');
                }
            }
            None => {}
        }
    }
}

/// How output lines are packaged for a command flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packing {
    /// Everything merges into one line; boundaries become embedded line
    /// feeds (tellraw, title, bare nbt).
    Flow,
    /// Every paragraph boundary starts a new line (sign).
    Lines,
    /// Boundaries embed line feeds; only explicit page breaks start a new
    /// page (book).
    Paged,
}

/// Segmentation result, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    Lines(Vec<Line>),
    /// One entry per page. Pages are bounded only by explicit page breaks,
    /// so each holds exactly one merged line.
    Pages(Vec<Line>),
}

impl Layout {
    pub fn lines(&self) -> &[Line] {
        match self {
            Layout::Lines(lines) | Layout::Pages(lines) => lines,
        }
    }

    /// True when no line carries any text.
    pub fn is_blank(&self) -> bool {
        self.lines().iter().all(|line| line.text().is_empty())
    }
}
