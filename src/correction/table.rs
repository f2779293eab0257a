//! The externally supplied `hash → utterance id` correction table.
//!
//! One whitespace-separated `<hash> <utt_id>` pair per line.  Blank lines
//! are ignored; anything else is a fatal format error.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use super::hash::ContentHash;
use super::TableError;

/// One row of the correction table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionRecord {
    /// Digest of the source utterance this correction applies to.
    pub hash: ContentHash,
    /// Unique utterance identifier.  Opaque here; it also carries the
    /// corrected timestamps (see [`crate::corpus::UttIdLayout`]).
    pub utt_id: String,
}

/// Streaming reader over a correction table.
///
/// ```
/// use corpus_compose::correction::TableReader;
///
/// let data = "d41d8cd98f00b204e9800998ecf8427e utt-1\n";
/// let records: Vec<_> = TableReader::new(data.as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(records[0].utt_id, "utt-1");
/// ```
pub struct TableReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TableReader<R> {
    /// Wrap any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl TableReader<BufReader<File>> {
    /// Open a table file on disk.
    pub fn open(path: &Path) -> Result<Self, TableError> {
        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TableReader<R> {
    type Item = Result<CorrectionRecord, TableError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(source) => return Some(Err(TableError::Read(source))),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(parse_record(self.line_no, &line));
        }
    }
}

fn parse_record(line_no: usize, line: &str) -> Result<CorrectionRecord, TableError> {
    let malformed = || TableError::MalformedLine {
        line_no,
        line: line.to_string(),
    };

    let mut fields = line.split_whitespace();
    let (Some(hash), Some(utt_id), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(malformed());
    };
    let hash: ContentHash = hash.parse().map_err(|_| malformed())?;

    Ok(CorrectionRecord {
        hash,
        utt_id: utt_id.to_string(),
    })
}
