//! Identifier newtypes and the minter that creates them.
//!
//! Annotation identifiers and span keys are opaque strings. Fresh ones come
//! only from [`IdMinter`]; the segmentation engine and the encoder pass
//! existing identifiers around but never invent or destroy them.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

/// Identifier of one annotation event payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key binding an annotation span placeholder to a concrete document node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanKey(pub String);

impl fmt::Display for SpanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 12;

/// Mints fresh identifiers for events, span placeholders, and saved records.
///
/// Seed one with [`IdMinter::from_seed`] in tests for reproducible output.
pub struct IdMinter {
    rng: Xoshiro256PlusPlus,
}

impl IdMinter {
    pub fn new() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(rand::thread_rng().gen()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    fn next_raw(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }

    pub fn event_id(&mut self) -> EventId {
        EventId(self.next_raw())
    }

    pub fn span_key(&mut self) -> SpanKey {
        SpanKey(self.next_raw())
    }

    pub fn record_id(&mut self) -> String {
        self.next_raw()
    }
}

impl Default for IdMinter {
    fn default() -> Self {
        Self::new()
    }
}
