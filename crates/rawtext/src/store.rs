//! Saved composition records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rawtext_core::doc::Document;
use rawtext_core::ident::{EventId, IdMinter};

/// One saved composition: the snapshot an external store persists and
/// hands back on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedComposition {
    pub id: String,
    pub document: Document,
    /// Plain-text preview shown in listings.
    pub preview: String,
    /// Annotation identifiers the document references, for event lookup.
    pub annotation_ids: Vec<EventId>,
    pub time: DateTime<Utc>,
}

impl SavedComposition {
    /// Snapshot a document into a fresh record.
    pub fn capture(document: &Document, minter: &mut IdMinter) -> Self {
        Self {
            id: minter.record_id(),
            document: document.clone(),
            preview: document.preview(),
            annotation_ids: document.annotation_ids(),
            time: Utc::now(),
        }
    }

    /// Refresh the snapshot in place, keeping the record id.
    pub fn refresh(&mut self, document: &Document) {
        self.document = document.clone();
        self.preview = document.preview();
        self.annotation_ids = document.annotation_ids();
        self.time = Utc::now();
    }
}
