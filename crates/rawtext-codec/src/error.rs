//! Error types for encoding and parsing.

use thiserror::Error;

/// Failures while packaging a layout into a command string. Encoding never
/// mutates anything, so a failure leaves no partial output behind.
#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    /// A sign holds at most four lines of text.
    #[error("a sign holds at most 4 lines, selection produced {0}")]
    SignLineOverflow(usize),
    /// The command template for the requested kind has no `%s` marker.
    #[error("command template has no %s marker: {0}")]
    TemplateMissingMarker(String),
}

/// Failures while parsing raw component text. Parsing is all-or-nothing:
/// any of these means no lines, events, or span bindings were produced.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("input is empty")]
    Empty,
    #[error("invalid component JSON: {0}")]
    Syntax(String),
    #[error("a component must be an object, an array, or a string")]
    UnexpectedShape,
    #[error("component {0} must be a string")]
    NotAString(&'static str),
    #[error("component {0} must be a boolean")]
    NotABool(&'static str),
    #[error("extra must be an array")]
    ExtraNotArray,
    #[error("clickEvent is missing its {0}")]
    IncompleteClickEvent(&'static str),
    #[error("hoverEvent has no text contents")]
    IncompleteHoverEvent,
    #[error("unknown event action: {0}")]
    UnknownAction(String),
}
