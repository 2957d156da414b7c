//! Builds text-component trees from segmented lines and packages them into
//! command strings.
//!
//! The encoder is read-only with respect to the event cache and the
//! document: resolving an annotation identifier never mutates anything, and
//! a validation failure produces no output at all.

use log::debug;

use rawtext_core::event::{EventCache, EventKind};
use rawtext_core::segment::{Layout, Line, LineUnit, Packing, Segment, SpanUnit};

use crate::component::{ClickAction, ClickEvent, HoverEvent, TextComponent};
use crate::error::EncodeError;
use crate::escape::{escape, inline_escape};

// ----------------------------------------------------------------
// Component build

fn segment_component(seg: &Segment) -> TextComponent {
    TextComponent {
        text: seg.text.clone(),
        format: seg.format,
        color: seg.color.clone(),
        ..TextComponent::default()
    }
}

/// Resolve a span's identifiers through the cache onto its child
/// components.
///
/// The first resolvable click-kind descriptor wins the click slot, the
/// first `show_text` descriptor wins the hover slot. An identifier absent
/// from the cache is skipped; the component simply renders without that
/// action.
fn span_components(span: &SpanUnit, cache: &EventCache) -> Vec<TextComponent> {
    let mut click: Option<ClickEvent> = None;
    let mut hover: Option<HoverEvent> = None;
    for id in &span.ids {
        let Some(descriptor) = cache.get(id) else {
            debug!("annotation id {id} has no cached event, omitting action");
            continue;
        };
        match descriptor.kind {
            EventKind::ShowText => {
                if hover.is_none() {
                    hover = Some(HoverEvent {
                        contents: descriptor.payload.clone(),
                    });
                }
            }
            EventKind::None => {}
            kind => {
                if click.is_none() {
                    if let Some(action) = ClickAction::from_kind(kind) {
                        click = Some(ClickEvent {
                            action,
                            value: descriptor.payload.clone(),
                        });
                    }
                }
            }
        }
    }
    span.segments
        .iter()
        .map(|seg| {
            let mut component = segment_component(seg);
            component.click_event = click.clone();
            component.hover_event = hover.clone();
            component
        })
        .collect()
}

/// Build the single component tree representing one line: the first unit
/// becomes the root, and every later component joins the root's `extra`
/// list in order.
pub fn line_component(line: &Line, cache: &EventCache) -> TextComponent {
    let mut parts: Vec<TextComponent> = Vec::new();
    for unit in &line.units {
        match unit {
            LineUnit::Segment(seg) => parts.push(segment_component(seg)),
            LineUnit::Span(span) => parts.extend(span_components(span, cache)),
        }
    }
    if parts.is_empty() {
        return TextComponent::plain("");
    }
    let mut root = parts.remove(0);
    root.extra = parts;
    root
}

// ----------------------------------------------------------------
// Render

/// Render a component tree to its compact JSON form under the direct
/// escaping regime. Key order is fixed and false flags are omitted, so the
/// same tree always renders to the same bytes.
pub fn render(component: &TextComponent) -> String {
    let mut out = String::new();
    write_component(&mut out, component);
    out
}

fn write_component(out: &mut String, c: &TextComponent) {
    out.push_str("{\"text\":\"");
    out.push_str(&escape(&c.text));
    out.push('"');
    if c.format.bold {
        out.push_str(",\"bold\":true");
    }
    if c.format.italic {
        out.push_str(",\"italic\":true");
    }
    if c.format.underline {
        out.push_str(",\"underline\":true");
    }
    if c.format.strikethrough {
        out.push_str(",\"strikethrough\":true");
    }
    if c.format.obfuscated {
        out.push_str(",\"obfuscated\":true");
    }
    if let Some(color) = &c.color {
        out.push_str(",\"color\":\"");
        out.push_str(&escape(color));
        out.push('"');
    }
    if let Some(click) = &c.click_event {
        out.push_str(",\"clickEvent\":{\"action\":\"");
        out.push_str(click.action.as_str());
        out.push_str("\",\"value\":\"");
        out.push_str(&escape(&click.value));
        out.push_str("\"}");
    }
    if let Some(hover) = &c.hover_event {
        out.push_str(",\"hoverEvent\":{\"action\":\"show_text\",\"contents\":\"");
        out.push_str(&escape(&hover.contents));
        out.push_str("\"}");
    }
    if !c.extra.is_empty() {
        out.push_str(",\"extra\":[");
        for (i, child) in c.extra.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_component(out, child);
        }
        out.push(']');
    }
    out.push('}');
}

// ----------------------------------------------------------------
// Flavor packaging

fn substitute(template: &str, text: &str) -> Result<String, EncodeError> {
    if !template.contains("%s") {
        return Err(EncodeError::TemplateMissingMarker(template.to_string()));
    }
    Ok(template.replacen("%s", text, 1))
}

/// Package a segmented layout into the final command string.
///
/// Flow renders the first line only (anything later was already merged into
/// it by segmentation). Lines renders `TextN:'…'` sign entries and refuses
/// more than four. Paged renders one quoted string per page.
pub fn encode(
    layout: &Layout,
    packing: Packing,
    cache: &EventCache,
    template: &str,
) -> Result<String, EncodeError> {
    match packing {
        Packing::Flow => {
            let component = match layout.lines().first() {
                Some(line) => line_component(line, cache),
                None => TextComponent::plain(""),
            };
            substitute(template, &render(&component))
        }
        Packing::Lines => {
            let lines = layout.lines();
            if lines.len() > 4 {
                return Err(EncodeError::SignLineOverflow(lines.len()));
            }
            let text = lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    let rendered = render(&line_component(line, cache));
                    format!("Text{}:'{}'", i + 1, inline_escape(&rendered))
                })
                .collect::<Vec<_>>()
                .join(",");
            substitute(template, &text)
        }
        Packing::Paged => {
            let text = layout
                .lines()
                .iter()
                .map(|page| {
                    let rendered = render(&line_component(page, cache));
                    format!("'{}'", inline_escape(&rendered))
                })
                .collect::<Vec<_>>()
                .join(",");
            substitute(template, &text)
        }
    }
}
