//! Parses raw text-component input back into lines of segments.
//!
//! Accepts both JSON-shaped components (an object, an array, or an object
//! with an `extra` chain, whose children inherit the parent's attributes)
//! and legacy `§`-code formatted text. Both normalize to the same token model
//! before line assembly. Parsing is all-or-nothing: a malformed input
//! returns an error and nothing else, so the caller's document and cache
//! stay untouched.

use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

use rawtext_core::event::{EventDescriptor, EventKind};
use rawtext_core::format::Format;
use rawtext_core::ident::{EventId, IdMinter, SpanKey};
use rawtext_core::segment::{Line, LineUnit, Segment, SpanUnit};

use crate::component::ClickAction;
use crate::error::ParseError;

// ----------------------------------------------------------------
// Result & token model

/// Everything a successful parse yields. The caller merges `events` into
/// its cache and `span_keys` into its node-key lookup, then rebuilds
/// document nodes from `lines`. Nothing here touches any live state.
#[derive(Debug, Default)]
pub struct Parsed {
    pub lines: Vec<Line>,
    /// Freshly minted descriptors, one per click or hover action found.
    pub events: Vec<EventDescriptor>,
    /// Minted identifier → span placeholder key, in minting order.
    pub span_keys: IndexMap<EventId, SpanKey>,
}

/// One normalized run of input: text plus the attributes that apply to it.
#[derive(Debug, Clone, Default, PartialEq)]
struct Token {
    text: String,
    format: Format,
    color: Option<String>,
    click: Option<(ClickAction, String)>,
    hover: Option<String>,
}

// ----------------------------------------------------------------
// Entry point

/// Parse raw component text. Input starting with `{` or `[` is treated as
/// component JSON; anything else as legacy `§`-code text.
pub fn parse(raw: &str, minter: &mut IdMinter) -> Result<Parsed, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    let tokens = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        tokenize_json(trimmed)?
    } else {
        tokenize_legacy(trimmed)
    };
    Ok(assemble(tokens, minter))
}

// ----------------------------------------------------------------
// JSON-shaped input

fn tokenize_json(raw: &str) -> Result<Vec<Token>, ParseError> {
    let normalized = normalize_control_chars(raw);
    let value: Value =
        serde_json::from_str(&normalized).map_err(|e| ParseError::Syntax(e.to_string()))?;
    let mut tokens = Vec::new();
    walk(&value, &Token::default(), &mut tokens)?;
    Ok(tokens)
}

/// The encoder leaves line feeds literal inside string values; JSON proper
/// forbids control characters there, so they are re-escaped before the text
/// reaches the JSON parser. Characters outside string literals pass through.
fn normalize_control_chars(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_string = false;
    let mut escaped = false;
    for ch in raw.chars() {
        if !in_string {
            if ch == '"' {
                in_string = true;
            }
            out.push(ch);
            continue;
        }
        if escaped {
            escaped = false;
            out.push(ch);
            continue;
        }
        match ch {
            '\\' => {
                escaped = true;
                out.push(ch);
            }
            '"' => {
                in_string = false;
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// Walk one component value, inheriting attributes from the parent.
fn walk(value: &Value, inherited: &Token, tokens: &mut Vec<Token>) -> Result<(), ParseError> {
    match value {
        Value::String(s) => {
            let mut token = inherited.clone();
            token.text = s.clone();
            if !token.text.is_empty() {
                tokens.push(token);
            }
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                walk(item, inherited, tokens)?;
            }
            Ok(())
        }
        Value::Object(map) => {
            let mut token = inherited.clone();
            token.text = match map.get("text") {
                Some(Value::String(s)) => s.clone(),
                Some(_) => return Err(ParseError::NotAString("text")),
                None => String::new(),
            };
            read_flag(map, "bold", &mut token.format.bold)?;
            read_flag(map, "italic", &mut token.format.italic)?;
            read_flag(map, "underline", &mut token.format.underline)?;
            read_flag(map, "strikethrough", &mut token.format.strikethrough)?;
            read_flag(map, "obfuscated", &mut token.format.obfuscated)?;
            if let Some(v) = map.get("color") {
                token.color = Some(
                    v.as_str()
                        .ok_or(ParseError::NotAString("color"))?
                        .to_string(),
                );
            }
            if let Some(v) = map.get("clickEvent") {
                token.click = Some(decode_click(v)?);
            }
            if let Some(v) = map.get("hoverEvent") {
                token.hover = Some(decode_hover(v)?);
            }
            if !token.text.is_empty() {
                tokens.push(token.clone());
            }
            if let Some(extra) = map.get("extra") {
                let items = extra.as_array().ok_or(ParseError::ExtraNotArray)?;
                let base = Token {
                    text: String::new(),
                    ..token
                };
                for item in items {
                    walk(item, &base, tokens)?;
                }
            }
            Ok(())
        }
        _ => Err(ParseError::UnexpectedShape),
    }
}

fn read_flag(
    map: &serde_json::Map<String, Value>,
    name: &'static str,
    slot: &mut bool,
) -> Result<(), ParseError> {
    if let Some(v) = map.get(name) {
        *slot = v.as_bool().ok_or(ParseError::NotABool(name))?;
    }
    Ok(())
}

fn decode_click(v: &Value) -> Result<(ClickAction, String), ParseError> {
    let map = v.as_object().ok_or(ParseError::UnexpectedShape)?;
    let action = map
        .get("action")
        .and_then(Value::as_str)
        .ok_or(ParseError::IncompleteClickEvent("action"))?;
    let action =
        ClickAction::from_str(action).ok_or_else(|| ParseError::UnknownAction(action.into()))?;
    let value = map
        .get("value")
        .and_then(Value::as_str)
        .ok_or(ParseError::IncompleteClickEvent("value"))?;
    Ok((action, value.to_string()))
}

fn decode_hover(v: &Value) -> Result<String, ParseError> {
    let map = v.as_object().ok_or(ParseError::UnexpectedShape)?;
    let action = map
        .get("action")
        .and_then(Value::as_str)
        .ok_or(ParseError::IncompleteHoverEvent)?;
    if action != "show_text" {
        return Err(ParseError::UnknownAction(action.to_string()));
    }
    // Modern components say "contents", older ones "value".
    map.get("contents")
        .or_else(|| map.get("value"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ParseError::IncompleteHoverEvent)
}

// ----------------------------------------------------------------
// Legacy §-code input

const LEGACY_COLORS: &[(char, &str)] = &[
    ('0', "black"),
    ('1', "dark_blue"),
    ('2', "dark_green"),
    ('3', "dark_aqua"),
    ('4', "dark_red"),
    ('5', "dark_purple"),
    ('6', "gold"),
    ('7', "gray"),
    ('8', "dark_gray"),
    ('9', "blue"),
    ('a', "green"),
    ('b', "aqua"),
    ('c', "red"),
    ('d', "light_purple"),
    ('e', "yellow"),
    ('f', "white"),
];

fn legacy_color(code: char) -> Option<&'static str> {
    LEGACY_COLORS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Scan legacy formatting codes into tokens. A color code resets the
/// formatting flags, `§r` resets everything, unknown codes are dropped.
fn tokenize_legacy(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = Token::default();
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '§' {
            current.text.push(ch);
            continue;
        }
        let Some(code) = chars.next() else { break };
        if !current.text.is_empty() {
            tokens.push(current.clone());
            current.text.clear();
        }
        match code.to_ascii_lowercase() {
            'l' => current.format.bold = true,
            'o' => current.format.italic = true,
            'n' => current.format.underline = true,
            'm' => current.format.strikethrough = true,
            'k' => current.format.obfuscated = true,
            'r' => current = Token::default(),
            c => match legacy_color(c) {
                Some(name) => {
                    current = Token {
                        color: Some(name.to_string()),
                        ..Token::default()
                    };
                }
                None => debug!("dropping unknown formatting code §{c}"),
            },
        }
    }
    if !current.text.is_empty() {
        tokens.push(current);
    }
    tokens
}

// ----------------------------------------------------------------
// Line assembly

/// Split tokens into lines on embedded line feeds and mint identifiers for
/// every click or hover action encountered. A token carrying both actions
/// mints two descriptors sharing one span placeholder.
fn assemble(tokens: Vec<Token>, minter: &mut IdMinter) -> Parsed {
    let mut parsed = Parsed::default();
    let mut current = Line::default();
    for token in tokens {
        let mut first = true;
        for piece in token.text.split('\n') {
            if !first {
                parsed.lines.push(std::mem::take(&mut current));
            }
            first = false;
            if piece.is_empty() {
                continue;
            }
            let segment = Segment {
                text: piece.to_string(),
                format: token.format,
                color: token.color.clone(),
            };
            if token.click.is_none() && token.hover.is_none() {
                current.push(LineUnit::Segment(segment));
                continue;
            }
            let key = minter.span_key();
            let mut ids = Vec::new();
            if let Some((action, value)) = &token.click {
                let id = minter.event_id();
                parsed.events.push(EventDescriptor {
                    id: id.clone(),
                    kind: action.kind(),
                    payload: value.clone(),
                });
                parsed.span_keys.insert(id.clone(), key.clone());
                ids.push(id);
            }
            if let Some(contents) = &token.hover {
                let id = minter.event_id();
                parsed.events.push(EventDescriptor {
                    id: id.clone(),
                    kind: EventKind::ShowText,
                    payload: contents.clone(),
                });
                parsed.span_keys.insert(id.clone(), key.clone());
                ids.push(id);
            }
            current.push(LineUnit::Span(SpanUnit {
                ids,
                segments: vec![segment],
            }));
        }
    }
    parsed.lines.push(current);
    parsed
}
