//! Content-addressed matching of subtitle utterances to correction records.
//!
//! * [`content_hash`]: MD5 join key over `source_id + "+" + text`.
//! * [`UtteranceIndex`]: write-once map of locally parsed utterances.
//! * [`TableReader`]: streams `hash utt_id` rows from the table file.
//! * [`join`]: pairs table rows with indexed utterances.
//!
//! # Quick start
//!
//! ```rust
//! use corpus_compose::correction::{
//!     content_hash, join, NormalizedUtterance, TableReader, UtteranceIndex,
//! };
//!
//! let utterances = vec![NormalizedUtterance {
//!     source_id: "talk01".into(),
//!     start: 1.0,
//!     end: 2.5,
//!     text: "こんにちは 世界".into(),
//! }];
//! let index: UtteranceIndex = utterances.iter().collect();
//!
//! let table = format!("{} talk01_utt\n", content_hash("talk01", "こんにちは世界"));
//! let outcome = join(&index, TableReader::new(table.as_bytes())).unwrap();
//! assert_eq!(outcome.matched[0].utterance.text, "こんにちは世界");
//! ```

pub mod hash;
pub mod index;
pub mod joiner;
pub mod table;

use std::path::PathBuf;

use thiserror::Error;

pub use hash::{content_hash, strip_whitespace, ContentHash, ParseHashError};
pub use index::{IndexedUtterance, Inserted, NormalizedUtterance, UtteranceIndex};
pub use joiner::{join, JoinOutcome, JoinedUtterance};
pub use table::{CorrectionRecord, TableReader};

// ---------------------------------------------------------------------------
// TableError
// ---------------------------------------------------------------------------

/// Errors raised while reading the correction table.  All of them are fatal.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table file could not be opened.
    #[error("cannot open correction table {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a line failed part-way through the table.
    #[error("cannot read correction table: {0}")]
    Read(#[source] std::io::Error),

    /// A non-blank line was not a `<hash> <utt_id>` pair.
    #[error("malformed correction table line {line_no}: {line:?}")]
    MalformedLine { line_no: usize, line: String },
}
