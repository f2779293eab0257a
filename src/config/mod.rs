//! Configuration module for corpus composition.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the corpus
//! layout, audio resampling and utterance-id decoding, `AppPaths` for the
//! platform config directory, and TOML persistence via
//! `AppConfig::load_from` / `AppConfig::save_to`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use crate::corpus::UttIdLayout;
pub use settings::{AppConfig, AudioConfig, CorpusConfig, ResamplerBackend};
