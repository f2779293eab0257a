//! Discovery of subtitle/audio pairs in the source directory.

use std::path::{Path, PathBuf};

use crate::config::CorpusConfig;

use super::PipelineError;

/// One source recording and its subtitles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePair {
    /// File-name stem up to the first `.`.
    pub source_id: String,
    pub subtitle_path: PathBuf,
    pub audio_path: PathBuf,
}

/// Result of scanning the source directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Sources with both files present, sorted by subtitle path.
    pub sources: Vec<SourcePair>,
    /// Source ids whose audio asset was missing.
    pub missing_audio: Vec<String>,
}

/// Find every `<id><subtitle_suffix>` file directly inside `src_dir` and
/// pair it with `<id>.<audio_extension>`.
///
/// A subtitle without its audio asset is logged and skipped.
pub fn discover_sources(
    src_dir: &Path,
    corpus: &CorpusConfig,
) -> Result<Discovery, PipelineError> {
    let read_err = |source| PipelineError::SourceDir {
        path: src_dir.to_path_buf(),
        source,
    };

    let mut subtitles = Vec::new();
    for entry in std::fs::read_dir(src_dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        let is_subtitle = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(&corpus.subtitle_suffix));
        if is_subtitle && path.is_file() {
            subtitles.push(path);
        }
    }
    subtitles.sort();

    let mut discovery = Discovery::default();
    for subtitle_path in subtitles {
        let Some(source_id) = source_id_of(&subtitle_path) else {
            continue;
        };
        let audio_name = format!("{source_id}.{}", corpus.audio_extension);
        let audio_path = subtitle_path.with_file_name(audio_name);

        if !audio_path.exists() {
            log::warn!("{} does not exist. Ignored.", audio_path.display());
            discovery.missing_audio.push(source_id);
            continue;
        }

        discovery.sources.push(SourcePair {
            source_id,
            subtitle_path,
            audio_path,
        });
    }

    Ok(discovery)
}

/// File name up to the first `.`, e.g. `talk01.ja.vtt` → `talk01`.
fn source_id_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let id = name.split('.').next()?;
    (!id.is_empty()).then(|| id.to_string())
}
