//! Two-state WebVTT cue scanner.
//!
//! ```text
//! Outside ──timing line──▶ Inside ──text line──▶ Inside (accumulate)
//!    ▲                        │
//!    └──── blank line / EOF ──┘  (emit cue if any text was accumulated)
//! ```
//!
//! Header lines, `NOTE` blocks and cue identifiers are skipped because they
//! only ever appear while the scanner is outside a cue.

use std::fs;
use std::path::Path;

use super::cue::{parse_timestamp, Cue};
use super::SubtitleError;

/// Token separating the start and end timestamps on a timing line.
const TIMING_SEPARATOR: &str = "-->";

/// Parse an entire subtitle document held in memory.
///
/// # Errors
///
/// [`SubtitleError::MalformedTiming`] when a timing line does not carry a
/// `start --> end` triple of valid timestamps.  No recovery is attempted.
///
/// # Examples
///
/// ```
/// use corpus_compose::subtitle::parse_cues;
///
/// let cues = parse_cues("WEBVTT\n\n00:00:01.000 --> 00:00:02.500\nHello world\n\n").unwrap();
/// assert_eq!(cues.len(), 1);
/// assert_eq!(cues[0].start, 1.0);
/// assert_eq!(cues[0].end, 2.5);
/// assert_eq!(cues[0].raw_text, "Hello world");
/// ```
pub fn parse_cues(input: &str) -> Result<Vec<Cue>, SubtitleError> {
    let mut scanner = CueScanner::default();
    for (idx, line) in input.lines().enumerate() {
        scanner.feed(idx + 1, line.trim_end())?;
    }
    scanner.flush();
    Ok(scanner.cues)
}

/// Read and parse a UTF-8 subtitle file.
pub fn parse_file(path: &Path) -> Result<Vec<Cue>, SubtitleError> {
    let content = fs::read_to_string(path).map_err(|source| SubtitleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_cues(&content).map_err(|e| match e {
        SubtitleError::MalformedTiming { line_no, line, .. } => SubtitleError::MalformedTiming {
            path: Some(path.to_path_buf()),
            line_no,
            line,
        },
        other => other,
    })
}

// ---------------------------------------------------------------------------
// CueScanner
// ---------------------------------------------------------------------------

#[derive(Default)]
struct CueScanner {
    /// `Some((start, end))` while inside a cue.
    timing: Option<(f64, f64)>,
    lines: Vec<String>,
    cues: Vec<Cue>,
}

impl CueScanner {
    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), SubtitleError> {
        if line.contains(TIMING_SEPARATOR) {
            // A second timing line without a separating blank line replaces
            // the timing but keeps the text gathered so far.
            self.timing = Some(parse_timing_line(line_no, line)?);
        } else if line.trim().is_empty() {
            self.flush();
        } else if self.timing.is_some() {
            self.lines.push(line.to_string());
        }
        Ok(())
    }

    fn flush(&mut self) {
        if let Some((start, end)) = self.timing.take() {
            if !self.lines.is_empty() {
                self.cues.push(Cue {
                    start,
                    end,
                    raw_text: self.lines.join(" "),
                });
            }
        }
        self.lines.clear();
    }
}

fn parse_timing_line(line_no: usize, line: &str) -> Result<(f64, f64), SubtitleError> {
    let malformed = || SubtitleError::MalformedTiming {
        path: None,
        line_no,
        line: line.to_string(),
    };

    let mut tokens = line.split_whitespace();
    let (Some(start), Some(TIMING_SEPARATOR), Some(end)) =
        (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(malformed());
    };

    let start = parse_timestamp(start).map_err(|_| malformed())?;
    let end = parse_timestamp(end).map_err(|_| malformed())?;
    Ok((start, end))
}
