//! Command-line entry point.
//!
//! # Startup sequence
//!
//! 1. Parse arguments.
//! 2. Initialise logging (`-v` lowers the default filter to `debug`).
//! 3. Load [`AppConfig`] from `--config` or the default location.
//! 4. Apply command-line overrides.
//! 5. Either save the effective configuration (`--write-config`) or run the
//!    pipeline with the configured resampler.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use corpus_compose::{
    audio::resampler_from_config,
    config::{AppConfig, AppPaths, ResamplerBackend},
    pipeline::{run, CorpusJob},
};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// Spawn the `sox` command.
    Sox,
    /// Resample in-process.
    Native,
}

impl From<Backend> for ResamplerBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Sox => ResamplerBackend::Sox,
            Backend::Native => ResamplerBackend::Native,
        }
    }
}

/// Build the corrected speech corpus from downloaded subtitles and audio.
#[derive(Debug, Parser)]
#[command(name = "corpus-compose", version)]
struct Args {
    /// Directory holding the downloaded `<id>.ja.vtt` and `<id>.wav` files.
    #[arg(required_unless_present = "write_config")]
    src_data_dir: Option<PathBuf>,

    /// Destination corpus directory [default: ./TEDxJP-10K_v<version>].
    #[arg(long)]
    dst_dir: Option<PathBuf>,

    /// Directory holding utt_id_table.csv and diffs/ [default: ./data/<version>].
    #[arg(long)]
    diff_data_dir: Option<PathBuf>,

    /// Corpus version to build.
    #[arg(long, value_parser = ["1.1", "1.0"])]
    corpus_version: Option<String>,

    /// Settings file to read instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Audio resampling backend.
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Save the effective configuration and exit.
    #[arg(long)]
    write_config: bool,
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Logging
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // 2. Configuration
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| AppPaths::new().settings_file);
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .with_context(|| format!("loading settings from {}", config_path.display()))?;

    if let Some(version) = &args.corpus_version {
        config.corpus.version = version.clone();
    }
    if let Some(backend) = args.backend {
        config.audio.backend = backend.into();
    }

    if args.write_config {
        config
            .save_to(&config_path)
            .with_context(|| format!("saving settings to {}", config_path.display()))?;
        log::info!("Settings written to {}", config_path.display());
        return Ok(());
    }

    // 3. Run
    let src_dir = args
        .src_data_dir
        .context("src_data_dir is required")?;
    let mut job = CorpusJob::with_defaults(src_dir, config);
    if let Some(dst_dir) = args.dst_dir {
        job.dst_dir = dst_dir;
    }
    if let Some(diff_data_dir) = args.diff_data_dir {
        job.diff_data_dir = diff_data_dir;
    }

    log::info!(
        "Composing corpus v{} into {}",
        job.config.corpus.version,
        job.dst_dir.display()
    );
    let resampler = resampler_from_config(&job.config.audio);
    let summary = run(&job, resampler.as_ref()).with_context(|| {
        format!("composing corpus from {}", job.src_dir.display())
    })?;

    println!("{summary}");
    Ok(())
}
