//! On-disk edit scripts, one JSON file per utterance id.
//!
//! Layout: `<diffs_dir>/<utt_id>.diff`, each holding a JSON array of string
//! tokens (see [`super::op`]).  An utterance without a file needs no
//! correction.

use std::path::PathBuf;

use super::op::{parse_tokens, EditOp};
use super::PatchError;

/// Extension of the per-utterance patch files.
const PATCH_EXTENSION: &str = "diff";

/// Loads edit scripts on demand.
#[derive(Debug, Clone)]
pub struct PatchStore {
    dir: PathBuf,
}

impl PatchStore {
    /// `dir` is the directory that directly contains the `.diff` files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the patch file for `utt_id`.
    pub fn path_for(&self, utt_id: &str) -> PathBuf {
        self.dir.join(format!("{utt_id}.{PATCH_EXTENSION}"))
    }

    /// Load the edit script for `utt_id`, or `None` when it has no file.
    pub fn load(&self, utt_id: &str) -> Result<Option<Vec<EditOp>>, PatchError> {
        let path = self.path_for(utt_id);
        if !path.exists() {
            return Ok(None);
        }

        let data = std::fs::read_to_string(&path).map_err(|source| PatchError::Io {
            path: path.clone(),
            source,
        })?;
        let tokens: Vec<String> =
            serde_json::from_str(&data).map_err(|source| PatchError::Json {
                path: path.clone(),
                source,
            })?;
        let ops = parse_tokens(&tokens).map_err(|e| e.in_file(&path))?;
        Ok(Some(ops))
    }
}
