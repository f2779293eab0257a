//! Audio materialisation: source recording → corpus-format WAV.
//!
//! # Backends
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │           AudioResampler (trait)           │
//! │                                            │
//! │   ┌──────────────┐    ┌────────────────┐   │
//! │   │ SoxResampler │    │NativeResampler │   │
//! │   │ spawns `sox` │    │ hound + rubato │   │
//! │   └──────────────┘    └────────────────┘   │
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use corpus_compose::audio::resampler_from_config;
//! use corpus_compose::config::AudioConfig;
//!
//! let resampler = resampler_from_config(&AudioConfig::default());
//! resampler
//!     .resample(Path::new("talk01.wav"), Path::new("wav/talk01.16k.wav"))
//!     .unwrap();
//! ```

pub mod native;
pub mod resample;
pub mod sox;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{AudioConfig, ResamplerBackend};

pub use native::NativeResampler;
pub use resample::{convert_rate, deinterleave, mix_to_mono, RateError};
pub use sox::SoxResampler;

// ---------------------------------------------------------------------------
// AudioError
// ---------------------------------------------------------------------------

/// All errors that can arise while materialising corpus audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The source recording does not exist.
    #[error("audio file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// The external tool could not be started.
    #[error("cannot run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external tool exited unsuccessfully.
    #[error("{program} failed on {} (exit code {code:?}): {stderr}", .input.display())]
    ToolFailed {
        program: String,
        input: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    /// WAV decoding or encoding failed.
    #[error("WAV error for {}: {source}", .path.display())]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// Sample-rate conversion failed.
    #[error("cannot resample {}: {source}", .path.display())]
    Resample {
        path: PathBuf,
        #[source]
        source: RateError,
    },

    /// The configured output format cannot be produced.
    #[error("unsupported output format: {sample_rate} Hz, {channels} channel(s)")]
    UnsupportedTarget { sample_rate: u32, channels: u16 },
}

// ---------------------------------------------------------------------------
// AudioResampler trait
// ---------------------------------------------------------------------------

/// Converts one source recording into the corpus audio format.
///
/// Object-safe and `Send + Sync` so a single instance can be shared behind a
/// `Box<dyn AudioResampler>` for every source of a run.
pub trait AudioResampler: Send + Sync {
    /// Read `input` and write the converted audio to `output`.
    fn resample(&self, input: &Path, output: &Path) -> Result<(), AudioError>;
}

// Compile-time assertion: Box<dyn AudioResampler> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn AudioResampler>) {}
};

/// Build the resampler selected by `config.backend`.
pub fn resampler_from_config(config: &AudioConfig) -> Box<dyn AudioResampler> {
    match config.backend {
        ResamplerBackend::Sox => Box::new(SoxResampler::new(
            config.sox_command.clone(),
            config.sample_rate,
            config.channels,
        )),
        ResamplerBackend::Native => {
            Box::new(NativeResampler::new(config.sample_rate, config.channels))
        }
    }
}
