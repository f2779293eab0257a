//! Subtitle cue extraction.
//!
//! * [`parse_cues`] / [`parse_file`]: scan a WebVTT document into [`Cue`]s.
//! * [`parse_timestamp`]: `hh:mm:ss[.fff]` → seconds.
//! * [`SubtitleError`]: fatal parse failures.
//!
//! # Quick start
//!
//! ```rust
//! use corpus_compose::subtitle::parse_cues;
//!
//! let vtt = "WEBVTT\n\n00:00:01.000 --> 00:00:02.500\nHello world\n";
//! let cues = parse_cues(vtt).unwrap();
//! assert_eq!(cues[0].raw_text, "Hello world");
//! ```

pub mod cue;
pub mod parser;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use cue::{parse_timestamp, Cue};
pub use parser::{parse_cues, parse_file};

// ---------------------------------------------------------------------------
// SubtitleError
// ---------------------------------------------------------------------------

/// Errors raised while reading a subtitle file.  All of them are fatal.
#[derive(Debug, Error)]
pub enum SubtitleError {
    /// The subtitle file could not be read.
    #[error("cannot read subtitle file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A timing line did not hold a valid `start --> end` pair.
    #[error("malformed timing line in {} at line {line_no}: {line:?}", path_label(.path))]
    MalformedTiming {
        path: Option<PathBuf>,
        line_no: usize,
        line: String,
    },

    /// A timestamp was not in `hh:mm:ss[.fff]` form.
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),
}

fn path_label(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(Path::display)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "<input>".to_string())
}
