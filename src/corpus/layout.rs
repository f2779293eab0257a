//! In-memory corpus: entries in join order plus per-source grouping.

use std::collections::HashMap;

use super::uttid::{UttIdError, UttIdLayout};

/// One corrected utterance, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusEntry {
    /// Unique utterance id from the correction table.
    pub utt_id: String,
    /// Source (speaker) id.
    pub source_id: String,
    /// Corrected transcript.
    pub text: String,
    /// Corrected start in seconds, decoded from `utt_id`.
    pub start: f64,
    /// Corrected end in seconds, decoded from `utt_id`.
    pub end: f64,
}

impl CorpusEntry {
    /// Build an entry, decoding its times from the utterance id.
    pub fn new(
        layout: &UttIdLayout,
        utt_id: String,
        source_id: String,
        text: String,
    ) -> Result<Self, UttIdError> {
        let (start, end) = layout.decode(&utt_id)?;
        Ok(Self {
            utt_id,
            source_id,
            text,
            start,
            end,
        })
    }
}

/// Utterance ids belonging to one source, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerGroup {
    pub source_id: String,
    pub utt_ids: Vec<String>,
}

/// All entries of a corpus and the source → utterances mapping.
///
/// Sources are ordered by the first entry that mentions them.
#[derive(Debug, Default)]
pub struct CorpusLayout {
    entries: Vec<CorpusEntry>,
    groups: Vec<SpeakerGroup>,
    group_index: HashMap<String, usize>,
}

impl CorpusLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and record it under its source.
    pub fn push(&mut self, entry: CorpusEntry) {
        let slot = match self.group_index.get(&entry.source_id) {
            Some(&slot) => slot,
            None => {
                self.groups.push(SpeakerGroup {
                    source_id: entry.source_id.clone(),
                    utt_ids: Vec::new(),
                });
                let slot = self.groups.len() - 1;
                self.group_index.insert(entry.source_id.clone(), slot);
                slot
            }
        };
        self.groups[slot].utt_ids.push(entry.utt_id.clone());
        self.entries.push(entry);
    }

    /// Entries in join order.
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    /// Per-source groups in first-seen order.
    pub fn speaker_groups(&self) -> &[SpeakerGroup] {
        &self.groups
    }

    /// Distinct source ids in first-seen order.
    pub fn source_ids(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.source_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(utt_id: &str, source_id: &str) -> CorpusEntry {
        CorpusEntry {
            utt_id: utt_id.into(),
            source_id: source_id.into(),
            text: "テキスト".into(),
            start: 0.0,
            end: 1.0,
        }
    }

    #[test]
    fn groups_keep_first_seen_source_order() {
        let mut layout = CorpusLayout::new();
        layout.push(entry("u1", "zeta"));
        layout.push(entry("u2", "alpha"));
        layout.push(entry("u3", "zeta"));

        let sources: Vec<&str> = layout.source_ids().collect();
        assert_eq!(sources, ["zeta", "alpha"]);
        assert_eq!(layout.speaker_groups()[0].utt_ids, ["u1", "u3"]);
        assert_eq!(layout.speaker_groups()[1].utt_ids, ["u2"]);
    }

    #[test]
    fn entries_keep_join_order() {
        let mut layout = CorpusLayout::new();
        layout.push(entry("u2", "b"));
        layout.push(entry("u1", "a"));

        let ids: Vec<&str> = layout.entries().iter().map(|e| e.utt_id.as_str()).collect();
        assert_eq!(ids, ["u2", "u1"]);
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn entry_times_come_from_the_id() {
        let e = CorpusEntry::new(
            &UttIdLayout::default(),
            "abcdefghijk_00000150--00000275".into(),
            "abcdefghijk".into(),
            "はい".into(),
        )
        .unwrap();
        assert_eq!(e.start, 1.5);
        assert_eq!(e.end, 2.75);
    }

    #[test]
    fn entry_with_bad_id_is_rejected() {
        assert!(CorpusEntry::new(
            &UttIdLayout::default(),
            "short".into(),
            "src".into(),
            "はい".into(),
        )
        .is_err());
    }
}
