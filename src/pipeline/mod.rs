//! Pipeline orchestration for corpus composition.
//!
//! This module wires source discovery, subtitle indexing, the correction
//! join, patch replay and corpus emission into a single sequential run.
//!
//! # Architecture
//!
//! ```text
//! src_dir ──▶ discover_sources ──▶ build_index ──▶ UtteranceIndex
//!                                                      │
//! diff_data_dir/utt_id_table.csv ──▶ TableReader ──▶ join
//!                                                      │
//! diff_data_dir/diffs/*.diff ──▶ PatchStore ──▶ correct ──▶ CorpusLayout
//!                                                              │
//!                               dst_dir ◀── CorpusWriter + AudioResampler
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use corpus_compose::audio::resampler_from_config;
//! use corpus_compose::config::AppConfig;
//! use corpus_compose::pipeline::{run, CorpusJob};
//!
//! let config = AppConfig::load().unwrap();
//! let job = CorpusJob::with_defaults("./downloads", config);
//! let resampler = resampler_from_config(&job.config.audio);
//! run(&job, resampler.as_ref()).unwrap();
//! ```

pub mod runner;
pub mod source;
pub mod state;

use std::path::PathBuf;

use thiserror::Error;

use crate::audio::AudioError;
use crate::corpus::{EmitError, UttIdError};
use crate::correction::TableError;
use crate::patch::PatchError;
use crate::subtitle::SubtitleError;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{build_index, correct, emit, run, CorpusJob, DIFFS_DIR, TABLE_FILE};
pub use source::{discover_sources, Discovery, SourcePair};
pub use state::{RunSummary, Stage};

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Fatal errors that end a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source directory could not be listed.
    #[error("cannot read source directory {}: {source}", .path.display())]
    SourceDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Subtitle(#[from] SubtitleError),

    #[error(transparent)]
    Table(#[from] TableError),

    /// An edit script could not be loaded or replayed.
    #[error("cannot correct {utt_id}: {source}")]
    Patch {
        utt_id: String,
        #[source]
        source: PatchError,
    },

    #[error(transparent)]
    UttId(#[from] UttIdError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    /// An output directory could not be created.
    #[error("cannot create {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot materialise audio for {source_id}: {source}")]
    Audio {
        source_id: String,
        #[source]
        source: AudioError,
    },
}

impl PipelineError {
    pub(crate) fn patch(utt_id: &str, source: PatchError) -> Self {
        Self::Patch {
            utt_id: utt_id.to_string(),
            source,
        }
    }
}
