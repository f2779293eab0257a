//! External `sox` resampler.
//!
//! Runs `sox <input> -c <channels> -r <rate> -t wav <output>` once per
//! source and waits for it to finish.

use std::path::Path;
use std::process::Command;

use super::{AudioError, AudioResampler};

/// Resamples by spawning the `sox` command-line tool.
#[derive(Debug, Clone)]
pub struct SoxResampler {
    program: String,
    sample_rate: u32,
    channels: u16,
}

impl SoxResampler {
    pub fn new(program: impl Into<String>, sample_rate: u32, channels: u16) -> Self {
        Self {
            program: program.into(),
            sample_rate,
            channels,
        }
    }

    /// Build the command line without running it.
    pub fn command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(input)
            .arg("-c")
            .arg(self.channels.to_string())
            .arg("-r")
            .arg(self.sample_rate.to_string())
            .arg("-t")
            .arg("wav")
            .arg(output);
        cmd
    }
}

impl AudioResampler for SoxResampler {
    fn resample(&self, input: &Path, output: &Path) -> Result<(), AudioError> {
        if !input.exists() {
            return Err(AudioError::MissingInput(input.to_path_buf()));
        }

        log::debug!("running {} on {}", self.program, input.display());
        let result = self
            .command(input, output)
            .output()
            .map_err(|source| AudioError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(AudioError::ToolFailed {
                program: self.program.clone(),
                input: input.to_path_buf(),
                code: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
