//! Local utterance index keyed by content hash.
//!
//! Built once from every parsed subtitle, then only read by the joiner.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::hash::{content_hash, strip_whitespace, ContentHash};

/// A cue after text normalisation, tagged with the source it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedUtterance {
    /// Source (speaker / recording) identifier.
    pub source_id: String,
    /// Cue start in seconds.
    pub start: f64,
    /// Cue end in seconds.
    pub end: f64,
    /// Normalised text.
    pub text: String,
}

/// What the index keeps for a hashed utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedUtterance {
    /// Source identifier.
    pub source_id: String,
    /// Normalised text with all whitespace removed.  This is both the hashed
    /// text and the subject of patch replay.
    pub text: String,
}

/// Outcome of [`UtteranceIndex::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inserted {
    /// A new hash was added.
    New(ContentHash),
    /// The hash was already present; the first-seen utterance is kept.
    Duplicate(ContentHash),
    /// The utterance had no text and was not indexed.
    Empty,
}

/// Write-once map from content hash to the first utterance that produced it.
#[derive(Debug, Default)]
pub struct UtteranceIndex {
    entries: HashMap<ContentHash, IndexedUtterance>,
    duplicates: usize,
}

impl UtteranceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash and index one utterance.  Empty text is skipped; on a hash
    /// collision the utterance seen first wins.
    pub fn insert(&mut self, utterance: &NormalizedUtterance) -> Inserted {
        let text = strip_whitespace(&utterance.text);
        if text.is_empty() {
            return Inserted::Empty;
        }

        let hash = content_hash(&utterance.source_id, &text);
        match self.entries.entry(hash) {
            Entry::Occupied(_) => {
                self.duplicates += 1;
                log::debug!(
                    "duplicate utterance {hash} in {} (first occurrence kept)",
                    utterance.source_id
                );
                Inserted::Duplicate(hash)
            }
            Entry::Vacant(slot) => {
                slot.insert(IndexedUtterance {
                    source_id: utterance.source_id.clone(),
                    text,
                });
                Inserted::New(hash)
            }
        }
    }

    pub fn get(&self, hash: &ContentHash) -> Option<&IndexedUtterance> {
        self.entries.get(hash)
    }

    pub fn contains(&self, hash: &ContentHash) -> bool {
        self.entries.contains_key(hash)
    }

    /// Number of distinct hashes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many inserts hit an existing hash.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

impl<'a> FromIterator<&'a NormalizedUtterance> for UtteranceIndex {
    fn from_iter<I: IntoIterator<Item = &'a NormalizedUtterance>>(iter: I) -> Self {
        let mut index = Self::new();
        for utterance in iter {
            index.insert(utterance);
        }
        index
    }
}
