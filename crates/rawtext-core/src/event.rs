//! Inline event descriptors and the per-document cache that stores them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ident::EventId;

/// What an annotation identifier resolves to when a component is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    RunCommand,
    SuggestCommand,
    CopyToClipboard,
    OpenUrl,
    ShowText,
    None,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::RunCommand => "run_command",
            EventKind::SuggestCommand => "suggest_command",
            EventKind::CopyToClipboard => "copy_to_clipboard",
            EventKind::OpenUrl => "open_url",
            EventKind::ShowText => "show_text",
            EventKind::None => "none",
        }
    }

    pub fn from_str(s: &str) -> Option<EventKind> {
        match s {
            "run_command" => Some(EventKind::RunCommand),
            "suggest_command" => Some(EventKind::SuggestCommand),
            "copy_to_clipboard" => Some(EventKind::CopyToClipboard),
            "open_url" => Some(EventKind::OpenUrl),
            "show_text" => Some(EventKind::ShowText),
            "none" => Some(EventKind::None),
            _ => Option::None,
        }
    }

    /// True for the kinds that render as a click action.
    pub fn is_click(&self) -> bool {
        matches!(
            self,
            EventKind::RunCommand
                | EventKind::SuggestCommand
                | EventKind::CopyToClipboard
                | EventKind::OpenUrl
        )
    }
}

/// One annotation payload: the action a span triggers on click or hover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDescriptor {
    pub id: EventId,
    pub kind: EventKind,
    pub payload: String,
}

/// Identifier-keyed table of event payloads for one open document.
///
/// Owned by the session context, never a process-wide global. Absence is a
/// normal lookup result: a segment referencing an identifier that is not
/// here simply renders without its action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCache {
    entries: HashMap<EventId, EventDescriptor>,
}

impl EventCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a descriptor under its own identifier, replacing any previous
    /// entry.
    pub fn put(&mut self, descriptor: EventDescriptor) {
        self.entries.insert(descriptor.id.clone(), descriptor);
    }

    pub fn get(&self, id: &EventId) -> Option<&EventDescriptor> {
        self.entries.get(id)
    }

    pub fn remove(&mut self, id: &EventId) -> Option<EventDescriptor> {
        self.entries.remove(id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
