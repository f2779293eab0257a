//! Writes the flat text files of the corpus layout.
//!
//! | File          | Line format                         |
//! |---------------|-------------------------------------|
//! | `segments`    | `utt_id source_id start end`        |
//! | `text`        | `utt_id corrected_text`             |
//! | `utt2spk`     | `utt_id source_id`                  |
//! | `spk2utt`     | `source_id utt_id1 utt_id2 ...`     |
//! | `wavlist.txt` | `source_id resampled_file_name`     |

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::layout::CorpusLayout;
use super::uttid::format_seconds;
use super::EmitError;

pub const SEGMENTS_FILE: &str = "segments";
pub const TEXT_FILE: &str = "text";
pub const UTT2SPK_FILE: &str = "utt2spk";
pub const SPK2UTT_FILE: &str = "spk2utt";
pub const WAV_LIST_FILE: &str = "wavlist.txt";

/// Writes corpus files under one destination directory.
#[derive(Debug, Clone)]
pub struct CorpusWriter {
    dst_dir: PathBuf,
}

impl CorpusWriter {
    /// Create the destination directory (and parents) if needed.
    pub fn create(dst_dir: impl Into<PathBuf>) -> Result<Self, EmitError> {
        let dst_dir = dst_dir.into();
        std::fs::create_dir_all(&dst_dir).map_err(|source| EmitError::Io {
            path: dst_dir.clone(),
            source,
        })?;
        Ok(Self { dst_dir })
    }

    pub fn dst_dir(&self) -> &Path {
        &self.dst_dir
    }

    /// Write `segments`, `text`, `utt2spk` and `spk2utt`.
    pub fn write_transcripts(&self, layout: &CorpusLayout) -> Result<(), EmitError> {
        self.write_lines(SEGMENTS_FILE, |out| {
            for e in layout.entries() {
                writeln!(
                    out,
                    "{} {} {} {}",
                    e.utt_id,
                    e.source_id,
                    format_seconds(e.start),
                    format_seconds(e.end)
                )?;
            }
            Ok(())
        })?;

        self.write_lines(TEXT_FILE, |out| {
            for e in layout.entries() {
                writeln!(out, "{} {}", e.utt_id, e.text)?;
            }
            Ok(())
        })?;

        self.write_lines(UTT2SPK_FILE, |out| {
            for e in layout.entries() {
                writeln!(out, "{} {}", e.utt_id, e.source_id)?;
            }
            Ok(())
        })?;

        self.write_lines(SPK2UTT_FILE, |out| {
            for group in layout.speaker_groups() {
                writeln!(out, "{} {}", group.source_id, group.utt_ids.join(" "))?;
            }
            Ok(())
        })
    }

    /// Write `wavlist.txt` from `(source_id, file_name)` pairs.
    pub fn write_wav_list<S: AsRef<str>>(&self, wavs: &[(S, S)]) -> Result<(), EmitError> {
        self.write_lines(WAV_LIST_FILE, |out| {
            for (source_id, file_name) in wavs {
                writeln!(out, "{} {}", source_id.as_ref(), file_name.as_ref())?;
            }
            Ok(())
        })
    }

    fn write_lines<F>(&self, name: &str, body: F) -> Result<(), EmitError>
    where
        F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
    {
        let path = self.dst_dir.join(name);
        let io_err = |source| EmitError::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        body(&mut out).map_err(io_err)?;
        out.flush().map_err(io_err)?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }
}
