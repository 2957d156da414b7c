//! Shared text-component value type used by both encoder and decoder.

use rawtext_core::event::EventKind;
use rawtext_core::format::Format;

/// A click action attached to a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    RunCommand,
    SuggestCommand,
    CopyToClipboard,
    OpenUrl,
}

impl ClickAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClickAction::RunCommand => "run_command",
            ClickAction::SuggestCommand => "suggest_command",
            ClickAction::CopyToClipboard => "copy_to_clipboard",
            ClickAction::OpenUrl => "open_url",
        }
    }

    pub fn from_str(s: &str) -> Option<ClickAction> {
        match s {
            "run_command" => Some(ClickAction::RunCommand),
            "suggest_command" => Some(ClickAction::SuggestCommand),
            "copy_to_clipboard" => Some(ClickAction::CopyToClipboard),
            "open_url" => Some(ClickAction::OpenUrl),
            _ => None,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            ClickAction::RunCommand => EventKind::RunCommand,
            ClickAction::SuggestCommand => EventKind::SuggestCommand,
            ClickAction::CopyToClipboard => EventKind::CopyToClipboard,
            ClickAction::OpenUrl => EventKind::OpenUrl,
        }
    }

    pub fn from_kind(kind: EventKind) -> Option<ClickAction> {
        match kind {
            EventKind::RunCommand => Some(ClickAction::RunCommand),
            EventKind::SuggestCommand => Some(ClickAction::SuggestCommand),
            EventKind::CopyToClipboard => Some(ClickAction::CopyToClipboard),
            EventKind::OpenUrl => Some(ClickAction::OpenUrl),
            EventKind::ShowText | EventKind::None => None,
        }
    }
}

/// A click action and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub action: ClickAction,
    pub value: String,
}

/// A `show_text` hover payload.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverEvent {
    pub contents: String,
}

/// One node of the nested text-component tree. A root component with its
/// `extra` chain represents exactly one output line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextComponent {
    pub text: String,
    pub format: Format,
    pub color: Option<String>,
    pub click_event: Option<ClickEvent>,
    pub hover_event: Option<HoverEvent>,
    pub extra: Vec<TextComponent>,
}

impl TextComponent {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}
