//! In-process WAV resampler built on `hound`.
//!
//! Decodes any PCM or float WAV, mixes it to mono, converts the sample rate
//! with [`convert_rate`] and writes 16-bit PCM.  When more than one output
//! channel is requested the mono signal is duplicated.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use super::resample::{convert_rate, deinterleave, mix_to_mono};
use super::{AudioError, AudioResampler};

/// Resamples WAV files without any external tool.
#[derive(Debug, Clone)]
pub struct NativeResampler {
    sample_rate: u32,
    channels: u16,
}

impl NativeResampler {
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    fn read_mono(&self, input: &Path) -> Result<(Vec<f32>, u32), AudioError> {
        let wav_err = |source| AudioError::Wav {
            path: input.to_path_buf(),
            source,
        };

        let mut reader = WavReader::open(input).map_err(wav_err)?;
        let spec = reader.spec();
        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(wav_err)?,
            SampleFormat::Int => {
                let full_scale = (1_i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale))
                    .collect::<Result<_, _>>()
                    .map_err(wav_err)?
            }
        };

        let planar = deinterleave(&interleaved, spec.channels);
        Ok((mix_to_mono(&planar), spec.sample_rate))
    }
}

impl AudioResampler for NativeResampler {
    fn resample(&self, input: &Path, output: &Path) -> Result<(), AudioError> {
        if !input.exists() {
            return Err(AudioError::MissingInput(input.to_path_buf()));
        }
        if self.channels == 0 || self.sample_rate == 0 {
            return Err(AudioError::UnsupportedTarget {
                sample_rate: self.sample_rate,
                channels: self.channels,
            });
        }

        let (mono, source_rate) = self.read_mono(input)?;
        let samples = convert_rate(&mono, source_rate, self.sample_rate).map_err(|source| {
            AudioError::Resample {
                path: input.to_path_buf(),
                source,
            }
        })?;

        let wav_err = |source| AudioError::Wav {
            path: output.to_path_buf(),
            source,
        };
        let spec = WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(output, spec).map_err(wav_err)?;
        for sample in samples {
            let pcm = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            for _ in 0..self.channels {
                writer.write_sample(pcm).map_err(wav_err)?;
            }
        }
        writer.finalize().map_err(wav_err)?;

        log::debug!(
            "resampled {} ({} Hz) → {}",
            input.display(),
            source_rate,
            output.display()
        );
        Ok(())
    }
}
