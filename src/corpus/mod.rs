//! Corpus assembly and emission.
//!
//! * [`CorpusEntry`]: one corrected utterance.
//! * [`CorpusLayout`]: entries in join order plus source → utterance groups.
//! * [`UttIdLayout`]: decodes the corrected times embedded in utterance ids.
//! * [`CorpusWriter`]: writes `segments`, `text`, `utt2spk`, `spk2utt` and
//!   `wavlist.txt`.

pub mod layout;
pub mod uttid;
pub mod writer;

use std::path::PathBuf;

use thiserror::Error;

pub use layout::{CorpusEntry, CorpusLayout, SpeakerGroup};
pub use uttid::{format_seconds, UttIdError, UttIdLayout};
pub use writer::CorpusWriter;

// ---------------------------------------------------------------------------
// EmitError
// ---------------------------------------------------------------------------

/// Failure writing an output file.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
