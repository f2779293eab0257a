//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.  Every field carries a
//! serde default so a partial `settings.toml` only overrides what it names.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::corpus::UttIdLayout;

// ---------------------------------------------------------------------------
// CorpusConfig
// ---------------------------------------------------------------------------

/// Input discovery and output naming for one corpus release.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Release of the correction data (`"1.1"` or `"1.0"`).  Selects the
    /// default destination and diff-data directories.
    pub version: String,
    /// File-name suffix identifying subtitle files in the source directory.
    pub subtitle_suffix: String,
    /// Extension (without dot) of the audio asset paired with each subtitle.
    pub audio_extension: String,
    /// Sub-directory of the destination that receives resampled audio.
    pub wav_dir_name: String,
    /// Suffix appended to the source id to name its resampled audio file.
    pub resampled_suffix: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            version: "1.1".into(),
            subtitle_suffix: ".ja.vtt".into(),
            audio_extension: "wav".into(),
            wav_dir_name: "wav".into(),
            resampled_suffix: ".16k.wav".into(),
        }
    }
}

impl CorpusConfig {
    /// Destination directory used when none is given on the command line.
    pub fn default_dst_dir(&self) -> PathBuf {
        PathBuf::from(format!("./TEDxJP-10K_v{}", self.version))
    }

    /// Diff-data directory used when none is given on the command line.
    pub fn default_diff_data_dir(&self) -> PathBuf {
        PathBuf::from("./data").join(&self.version)
    }
}

// ---------------------------------------------------------------------------
// ResamplerBackend
// ---------------------------------------------------------------------------

/// Selects how source audio is converted into the corpus format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResamplerBackend {
    /// Spawn the external `sox` tool once per source.
    #[default]
    Sox,
    /// Decode, downmix and resample WAV files in-process.
    Native,
}

// ---------------------------------------------------------------------------
// AudioConfig
// ---------------------------------------------------------------------------

/// Target format of the materialised corpus audio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Output channel count.
    pub channels: u16,
    /// Which resampler implementation to use.
    pub backend: ResamplerBackend,
    /// Program invoked by the `Sox` backend.
    pub sox_command: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            channels: 1,
            backend: ResamplerBackend::default(),
            sox_command: "sox".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use corpus_compose::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// assert_eq!(config.audio.sample_rate, 16_000);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Input discovery and output naming.
    pub corpus: CorpusConfig,
    /// Output audio format and resampler selection.
    pub audio: AudioConfig,
    /// Utterance-id timestamp decoding.
    pub uttid: UttIdLayout,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to an explicit path, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.corpus.version, loaded.corpus.version);
        assert_eq!(original.corpus.subtitle_suffix, loaded.corpus.subtitle_suffix);
        assert_eq!(original.audio.sample_rate, loaded.audio.sample_rate);
        assert_eq!(original.audio.channels, loaded.audio.channels);
        assert_eq!(original.audio.backend, loaded.audio.backend);
        assert_eq!(original.uttid, loaded.uttid);
    }

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.corpus.version, "1.1");
        assert_eq!(config.audio.backend, ResamplerBackend::Sox);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.corpus.subtitle_suffix, ".ja.vtt");
        assert_eq!(cfg.corpus.audio_extension, "wav");
        assert_eq!(cfg.corpus.resampled_suffix, ".16k.wav");
        assert_eq!(cfg.audio.sample_rate, 16_000);
        assert_eq!(cfg.audio.channels, 1);
        assert_eq!(cfg.audio.sox_command, "sox");
        assert_eq!(cfg.uttid.start_offset, 12);
        assert_eq!(cfg.uttid.end_offset, 22);
        assert_eq!(cfg.uttid.width, 8);
        assert_eq!(cfg.uttid.scale, 100.0);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[audio]\nbackend = \"Native\"\n").expect("write");

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.audio.backend, ResamplerBackend::Native);
        assert_eq!(cfg.audio.sample_rate, 16_000);
        assert_eq!(cfg.corpus.version, "1.1");
    }

    #[test]
    fn version_selects_default_directories() {
        let mut cfg = CorpusConfig::default();
        cfg.version = "1.0".into();
        assert_eq!(cfg.default_dst_dir(), PathBuf::from("./TEDxJP-10K_v1.0"));
        assert_eq!(
            cfg.default_diff_data_dir(),
            PathBuf::from("./data").join("1.0")
        );
    }
}
