//! Pipeline stages and the end-of-run summary.
//!
//! [`Stage`] names the strictly sequential phases of a run.  Data only ever
//! flows forward, and a fatal error in any stage ends the run:
//!
//! ```text
//! Discovering ──▶ Indexing ──▶ Joining ──▶ Correcting ──▶ Resampling ──▶ Writing ──▶ Done
//! ```
//!
//! Nothing is created in the destination before `Resampling`.  A failed
//! resample removes the recordings of the run, and the text files are only
//! written once every recording exists.

use std::fmt;

/// Phases of a corpus-composition run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Scanning the source directory for subtitle/audio pairs.
    #[default]
    Discovering,
    /// Parsing, normalising and hashing every subtitle cue.
    Indexing,
    /// Streaming the correction table against the local index.
    Joining,
    /// Replaying edit scripts and decoding corrected times.
    Correcting,
    /// Materialising one resampled recording per source.
    Resampling,
    /// Writing the text files of the corpus layout.
    Writing,
    /// Everything has been written.
    Done,
}

impl Stage {
    /// Short label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Discovering => "discover",
            Stage::Indexing => "index",
            Stage::Joining => "join",
            Stage::Correcting => "correct",
            Stage::Resampling => "resample",
            Stage::Writing => "write",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Subtitle files found in the source directory.
    pub sources_found: usize,
    /// Sources skipped because their audio asset was missing.
    pub sources_skipped: usize,
    /// Distinct utterance hashes in the local index.
    pub utterances_indexed: usize,
    /// Corpus entries emitted.
    pub entries_joined: usize,
    /// Table records with no matching local utterance.
    pub records_unmatched: usize,
    /// Entries whose text was rewritten by an edit script.
    pub patches_applied: usize,
    /// Recordings materialised in the corpus audio format.
    pub sources_resampled: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sources ({} skipped), {} utterances indexed, {} entries joined \
             ({} patched), {} records unmatched, {} recordings resampled",
            self.sources_found,
            self.sources_skipped,
            self.utterances_indexed,
            self.entries_joined,
            self.patches_applied,
            self.records_unmatched,
            self.sources_resampled,
        )
    }
}
