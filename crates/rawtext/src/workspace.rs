//! Per-document session state and the operations the toolbar calls into.
//!
//! One workspace per open document, owning the event cache, the
//! id → span-key lookup, and the saved-composition list. Operations assume
//! the editor's single-writer discipline: the caller runs at most one
//! mutating operation at a time and resolves confirmation dialogs before
//! calling in.

use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use rawtext_core::doc::{Block, Document, Inline};
use rawtext_core::event::EventCache;
use rawtext_core::format::Format;
use rawtext_core::ident::{EventId, IdMinter, SpanKey};
use rawtext_core::selection::Selection;

use rawtext_codec::error::ParseError;

use crate::command::{CommandKind, CommandTemplates};
use crate::compose::{compose_command, import_document, ComposeError};
use crate::confirm::ConfirmOutcome;
use crate::store::SavedComposition;

/// External clipboard collaborator: receives the final command string.
pub trait Clipboard {
    fn copy(&mut self, text: &str);
}

/// In-memory clipboard for tests and the CLI.
#[derive(Debug, Default)]
pub struct BufferClipboard {
    pub contents: Option<String>,
}

impl Clipboard for BufferClipboard {
    fn copy(&mut self, text: &str) {
        self.contents = Some(text.to_string());
    }
}

/// Everything a workspace persists between runs. The external store saves
/// and loads this record at startup; the workspace itself never touches
/// disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub cache: EventCache,
    pub span_keys: IndexMap<EventId, SpanKey>,
    pub compositions: Vec<SavedComposition>,
    pub current: Option<SavedComposition>,
    pub templates: CommandTemplates,
}

/// Session state for one open document.
pub struct Workspace {
    pub cache: EventCache,
    /// Annotation id → span node key, in insertion order.
    pub span_keys: IndexMap<EventId, SpanKey>,
    pub compositions: Vec<SavedComposition>,
    /// Index into `compositions` when a stored record is open for editing.
    pub active: Option<usize>,
    /// Rolling snapshot of the unsaved working document.
    pub current: Option<SavedComposition>,
    pub templates: CommandTemplates,
    minter: IdMinter,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_minter(IdMinter::new())
    }

    /// Build with a caller-supplied minter, e.g. a seeded one in tests.
    pub fn with_minter(minter: IdMinter) -> Self {
        Self {
            cache: EventCache::new(),
            span_keys: IndexMap::new(),
            compositions: Vec::new(),
            active: None,
            current: None,
            templates: CommandTemplates::default(),
            minter,
        }
    }

    /// Rebuild a workspace from persisted state. No record is active until
    /// the caller opens one.
    pub fn restore(state: SessionState) -> Self {
        Self {
            cache: state.cache,
            span_keys: state.span_keys,
            compositions: state.compositions,
            active: None,
            current: state.current,
            templates: state.templates,
            minter: IdMinter::new(),
        }
    }

    /// The persistable view of this workspace, for the external store.
    pub fn persistable(&self) -> SessionState {
        SessionState {
            cache: self.cache.clone(),
            span_keys: self.span_keys.clone(),
            compositions: self.compositions.clone(),
            current: self.current.clone(),
            templates: self.templates.clone(),
        }
    }

    // ── Compose ───────────────────────────────────────────────────────────

    /// Compose a command for the selection and hand it to the clipboard.
    /// Session state is read-only here, success or failure.
    pub fn copy_selection(
        &self,
        selection: &Selection,
        kind: CommandKind,
        clipboard: &mut dyn Clipboard,
    ) -> Result<(), ComposeError> {
        let command = compose_command(selection, kind, &self.cache, &self.templates)?;
        clipboard.copy(&command);
        Ok(())
    }

    // ── Import ────────────────────────────────────────────────────────────

    /// Parse raw component text and replace the document with the result,
    /// merging minted events into the cache and span bindings into the
    /// lookup. All-or-nothing: on error nothing changes.
    pub fn import(&mut self, raw: &str, document: &mut Document) -> Result<(), ParseError> {
        let import = import_document(raw, &mut self.minter)?;
        for (id, key) in &import.span_keys {
            self.span_keys.insert(id.clone(), key.clone());
        }
        let count = import.events.len();
        for event in import.events {
            self.cache.put(event);
        }
        *document = import.document;
        info!("imported document with {count} annotation events");
        Ok(())
    }

    // ── Formatting ────────────────────────────────────────────────────────

    /// Unwrap one annotation span: its cache entries and key bindings go
    /// away first, then the span dissolves into plain runs with cleared
    /// formats, so a pending encode can never resolve a descriptor for a
    /// half-unwrapped span.
    pub fn unwrap_span(&mut self, document: &mut Document, key: &SpanKey) {
        let mut removed: Vec<EventId> = Vec::new();
        for block in &document.blocks {
            if let Block::Paragraph(inlines) = block {
                for inline in inlines {
                    if let Inline::Span(span) = inline {
                        if &span.key == key {
                            removed.extend(span.ids.iter().cloned());
                        }
                    }
                }
            }
        }
        for id in &removed {
            self.cache.remove(id);
            self.span_keys.shift_remove(id);
        }

        for block in &mut document.blocks {
            if let Block::Paragraph(inlines) = block {
                let mut replaced = Vec::with_capacity(inlines.len());
                for inline in inlines.drain(..) {
                    match inline {
                        Inline::Span(span) if &span.key == key => {
                            for mut child in span.children {
                                child.format = Format::default();
                                child.color = None;
                                replaced.push(Inline::Run(child));
                            }
                        }
                        other => replaced.push(other),
                    }
                }
                *inlines = replaced;
            }
        }
    }

    /// Clear formatting across the whole document: every span unwraps and
    /// every run's flags and color reset.
    pub fn clear_formatting(&mut self, document: &mut Document) {
        for key in document.span_keys() {
            self.unwrap_span(document, &key);
        }
        for block in &mut document.blocks {
            if let Block::Paragraph(inlines) = block {
                for inline in inlines {
                    if let Inline::Run(run) = inline {
                        run.format = Format::default();
                        run.color = None;
                    }
                }
            }
        }
    }

    // ── Snapshots & store ─────────────────────────────────────────────────

    /// Refresh the rolling snapshot of the working document.
    pub fn snapshot(&mut self, document: &Document) {
        match &mut self.current {
            Some(record) => record.refresh(document),
            None => self.current = Some(SavedComposition::capture(document, &mut self.minter)),
        }
    }

    /// Save the working document over the active record, or store it as a
    /// new one when nothing is active.
    pub fn save(&mut self, document: &mut Document) {
        match self.active {
            Some(index) => {
                if let Some(record) = self.compositions.get_mut(index) {
                    record.refresh(document);
                }
            }
            None => self.add(document, ConfirmOutcome::Proceed),
        }
    }

    /// Store the working document as a record. `outcome` is the user's
    /// answer to the save prompt: proceed saves then clears the editor,
    /// discard clears without saving, cancel changes nothing.
    pub fn add(&mut self, document: &mut Document, outcome: ConfirmOutcome) {
        match outcome {
            ConfirmOutcome::DeclineWithCancel => {
                debug!("add declined, editor untouched");
                return;
            }
            ConfirmOutcome::Proceed => {
                if !document.is_empty() {
                    match self.active {
                        Some(index) => {
                            if let Some(record) = self.compositions.get_mut(index) {
                                record.refresh(document);
                            }
                        }
                        None => {
                            let record = SavedComposition::capture(document, &mut self.minter);
                            self.compositions.push(record);
                        }
                    }
                }
            }
            ConfirmOutcome::DeclineWithDiscard => {}
        }
        self.active = None;
        document.clear();
    }

    /// Open a stored record for editing. Returns false when the index is
    /// out of range.
    pub fn open(&mut self, index: usize, document: &mut Document) -> bool {
        match self.compositions.get(index) {
            Some(record) => {
                *document = record.document.clone();
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    // ── Reset ─────────────────────────────────────────────────────────────

    /// Wipe everything: records, cache, bindings, and the document.
    /// Declining leaves all state untouched.
    pub fn reset(&mut self, document: &mut Document, outcome: ConfirmOutcome) {
        if outcome != ConfirmOutcome::Proceed {
            debug!("reset declined");
            return;
        }
        self.cache.clear();
        self.span_keys.clear();
        self.compositions.clear();
        self.current = None;
        self.active = None;
        document.clear();
        info!("workspace reset");
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
