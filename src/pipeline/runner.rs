//! Corpus composition run: subtitles + correction data → corpus directory.
//!
//! # Pipeline flow
//!
//! ```text
//! discover_sources            *.ja.vtt + *.wav pairs        [Discovering]
//!   └─▶ build_index           parse → normalize → hash      [Indexing]
//!         └─▶ join            stream utt_id_table.csv       [Joining]
//!               └─▶ correct   replay diffs/<utt_id>.diff    [Correcting]
//!                     └─▶ AudioResampler per source         [Resampling]
//!                           └─▶ CorpusWriter                [Writing]
//! ```
//!
//! Everything up to `Correcting` happens in memory, so a fatal subtitle or
//! patch error aborts before the destination directory is touched.  A failed
//! resample removes the recordings and directories created by the run, and
//! the text files are written last.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::audio::AudioResampler;
use crate::config::AppConfig;
use crate::corpus::{CorpusEntry, CorpusLayout, CorpusWriter, UttIdLayout};
use crate::correction::{join, JoinedUtterance, NormalizedUtterance, TableReader, UtteranceIndex};
use crate::patch::{apply, PatchStore};
use crate::subtitle::parse_file;
use crate::text::normalize;

use super::source::{discover_sources, SourcePair};
use super::state::{RunSummary, Stage};
use super::PipelineError;

/// File name of the correction table inside the diff-data directory.
pub const TABLE_FILE: &str = "utt_id_table.csv";
/// Directory of per-utterance edit scripts inside the diff-data directory.
pub const DIFFS_DIR: &str = "diffs";

// ---------------------------------------------------------------------------
// CorpusJob
// ---------------------------------------------------------------------------

/// Inputs and outputs of one run.
#[derive(Debug, Clone)]
pub struct CorpusJob {
    /// Directory holding `<id>.ja.vtt` / `<id>.wav` pairs.
    pub src_dir: PathBuf,
    /// Destination corpus directory.
    pub dst_dir: PathBuf,
    /// Directory holding `utt_id_table.csv` and `diffs/`.
    pub diff_data_dir: PathBuf,
    pub config: AppConfig,
}

impl CorpusJob {
    /// Job with destination and diff-data directories derived from the
    /// configured corpus version.
    pub fn with_defaults(src_dir: impl Into<PathBuf>, config: AppConfig) -> Self {
        Self {
            src_dir: src_dir.into(),
            dst_dir: config.corpus.default_dst_dir(),
            diff_data_dir: config.corpus.default_diff_data_dir(),
            config,
        }
    }

    pub fn table_path(&self) -> PathBuf {
        self.diff_data_dir.join(TABLE_FILE)
    }

    pub fn diffs_dir(&self) -> PathBuf {
        self.diff_data_dir.join(DIFFS_DIR)
    }

    pub fn wav_dir(&self) -> PathBuf {
        self.dst_dir.join(&self.config.corpus.wav_dir_name)
    }

    /// Name of the resampled recording for `source_id`.
    pub fn resampled_name(&self, source_id: &str) -> String {
        format!("{source_id}{}", self.config.corpus.resampled_suffix)
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Parse, normalise and hash every cue of every source.
///
/// Returns the index and the number of non-empty utterances seen.
pub fn build_index(sources: &[SourcePair]) -> Result<(UtteranceIndex, usize), PipelineError> {
    let mut index = UtteranceIndex::new();
    let mut utterances = 0;

    for source in sources {
        let cues = parse_file(&source.subtitle_path)?;
        let before = index.len();
        for cue in cues {
            let text = normalize(&cue.raw_text);
            if text.is_empty() {
                continue;
            }
            utterances += 1;
            index.insert(&NormalizedUtterance {
                source_id: source.source_id.clone(),
                start: cue.start,
                end: cue.end,
                text,
            });
        }
        log::debug!(
            "{}: {} utterances indexed",
            source.source_id,
            index.len() - before
        );
    }

    Ok((index, utterances))
}

/// Replay edit scripts and decode corrected times for every joined record.
///
/// Returns the corpus and the number of entries rewritten by a patch.
pub fn correct(
    joined: &[JoinedUtterance<'_>],
    patches: &PatchStore,
    uttid: &UttIdLayout,
) -> Result<(CorpusLayout, usize), PipelineError> {
    let mut layout = CorpusLayout::new();
    let mut patched = 0;

    for item in joined {
        let utt_id = &item.record.utt_id;
        let raw = &item.utterance.text;

        let text = match patches.load(utt_id).map_err(|e| PipelineError::patch(utt_id, e))? {
            Some(ops) => {
                patched += 1;
                apply(raw, &ops).map_err(|e| PipelineError::patch(utt_id, e))?
            }
            None => raw.clone(),
        };

        layout.push(CorpusEntry::new(
            uttid,
            utt_id.clone(),
            item.utterance.source_id.clone(),
            text,
        )?);
    }

    Ok((layout, patched))
}

/// Resample one recording per source, then write the corpus text files.
///
/// Returns the number of recordings materialised.
pub fn emit(
    job: &CorpusJob,
    layout: &CorpusLayout,
    audio_paths: &HashMap<&str, &Path>,
    resampler: &dyn AudioResampler,
) -> Result<usize, PipelineError> {
    let wavs = resample_sources(job, layout, audio_paths, resampler)?;

    let writer = CorpusWriter::create(&job.dst_dir)?;
    log::info!("[{}] {}", Stage::Writing, writer.dst_dir().display());
    writer.write_transcripts(layout)?;
    writer.write_wav_list(&wavs)?;
    Ok(wavs.len())
}

/// Materialise `<wav_dir>/<id><resampled_suffix>` for every source of
/// `layout`, returning `(source_id, file_name)` pairs.
///
/// On failure every recording and directory created here is removed again.
fn resample_sources(
    job: &CorpusJob,
    layout: &CorpusLayout,
    audio_paths: &HashMap<&str, &Path>,
    resampler: &dyn AudioResampler,
) -> Result<Vec<(String, String)>, PipelineError> {
    let wav_dir = job.wav_dir();
    let created_dirs = missing_dirs(&wav_dir);
    std::fs::create_dir_all(&wav_dir).map_err(|source| PipelineError::Output {
        path: wav_dir.clone(),
        source,
    })?;

    let mut wavs = Vec::new();
    let mut written = Vec::new();
    for source_id in layout.source_ids() {
        let Some(input) = audio_paths.get(source_id) else {
            log::warn!("no audio recorded for {source_id}. Ignored.");
            continue;
        };
        let name = job.resampled_name(source_id);
        let output = wav_dir.join(&name);
        log::info!("[{}] {source_id}", Stage::Resampling);

        let result = resampler.resample(input, &output);
        written.push(output);
        if let Err(source) = result {
            discard(&written, &created_dirs);
            return Err(PipelineError::Audio {
                source_id: source_id.to_string(),
                source,
            });
        }
        wavs.push((source_id.to_string(), name));
    }

    Ok(wavs)
}

/// Ancestors of `dir` (itself included) that do not exist yet, deepest first.
fn missing_dirs(dir: &Path) -> Vec<PathBuf> {
    dir.ancestors()
        .take_while(|d| !d.as_os_str().is_empty() && !d.exists())
        .map(Path::to_path_buf)
        .collect()
}

fn discard(files: &[PathBuf], dirs: &[PathBuf]) {
    for file in files {
        match std::fs::remove_file(file) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                log::warn!("cannot remove {}: {e}", file.display());
            }
            _ => {}
        }
    }
    for dir in dirs {
        if let Err(e) = std::fs::remove_dir(dir) {
            log::warn!("cannot remove {}: {e}", dir.display());
        }
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Run every stage of `job` in order.
///
/// ```rust,no_run
/// use corpus_compose::audio::resampler_from_config;
/// use corpus_compose::config::AppConfig;
/// use corpus_compose::pipeline::{run, CorpusJob};
///
/// let job = CorpusJob::with_defaults("./downloads", AppConfig::default());
/// let resampler = resampler_from_config(&job.config.audio);
/// let summary = run(&job, resampler.as_ref()).unwrap();
/// println!("{summary}");
/// ```
pub fn run(job: &CorpusJob, resampler: &dyn AudioResampler) -> Result<RunSummary, PipelineError> {
    let mut summary = RunSummary::default();

    log::info!("[{}] {}", Stage::Discovering, job.src_dir.display());
    let discovery = discover_sources(&job.src_dir, &job.config.corpus)?;
    summary.sources_found = discovery.sources.len() + discovery.missing_audio.len();
    summary.sources_skipped = discovery.missing_audio.len();

    log::info!("[{}] {} sources", Stage::Indexing, discovery.sources.len());
    let (index, utterances) = build_index(&discovery.sources)?;
    summary.utterances_indexed = index.len();
    if index.duplicates() > 0 {
        log::info!(
            "{utterances} utterances, {} duplicates kept once",
            index.duplicates()
        );
    }

    log::info!("[{}] {}", Stage::Joining, job.table_path().display());
    let outcome = join(&index, TableReader::open(&job.table_path())?)?;
    summary.records_unmatched = outcome.unmatched.len();

    log::info!("[{}] {} entries", Stage::Correcting, outcome.matched.len());
    let patches = PatchStore::new(job.diffs_dir());
    let (layout, patched) = correct(&outcome.matched, &patches, &job.config.uttid)?;
    summary.entries_joined = layout.len();
    summary.patches_applied = patched;

    let audio_paths: HashMap<&str, &Path> = discovery
        .sources
        .iter()
        .map(|s| (s.source_id.as_str(), s.audio_path.as_path()))
        .collect();
    summary.sources_resampled = emit(job, &layout, &audio_paths, resampler)?;

    log::info!("[{}] {summary}", Stage::Done);
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
