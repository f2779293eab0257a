//! Edit-script replay.
//!
//! * [`EditOp`]: `Keep` / `Insert(char)` / `Delete`.
//! * [`apply`]: rebuild corrected text from raw text and an edit script.
//! * [`PatchStore`]: loads per-utterance scripts from `<dir>/<utt_id>.diff`.
//! * [`PatchError`]: token, I/O and consistency failures.

pub mod op;
pub mod replay;
pub mod store;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use op::{parse_tokens, EditOp};
pub use replay::apply;
pub use store::PatchStore;

// ---------------------------------------------------------------------------
// PatchError
// ---------------------------------------------------------------------------

/// Errors raised while loading or replaying an edit script.  All fatal.
#[derive(Debug, Error)]
pub enum PatchError {
    /// A `Keep` or `Delete` ran past the end of the subject text.
    #[error("edit script does not fit its text: op #{op_index} ({op:?}) at cursor {cursor}, text has {len} characters")]
    Inconsistent {
        op_index: usize,
        op: EditOp,
        cursor: usize,
        len: usize,
    },

    /// A token was not one of `""`, `"+ c"` or `"- c"`.
    #[error("invalid edit token #{index}: {token:?}")]
    InvalidToken { index: usize, token: String },

    /// An edit token was invalid inside a specific patch file.
    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<PatchError>,
    },

    /// The patch file could not be read.
    #[error("cannot read patch file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The patch file was not a JSON list of strings.
    #[error("patch file {} is not a JSON token list: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PatchError {
    /// Attach the file the error came from.
    pub fn in_file(self, path: &Path) -> Self {
        PatchError::InFile {
            path: path.to_path_buf(),
            source: Box::new(self),
        }
    }
}
