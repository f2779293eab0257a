//! Channel layout and sample-rate conversion for the in-process backend.
//!
//! Decoded WAV data arrives interleaved (`[L, R, L, R, ...]`).  It is split
//! into planar channels, averaged to mono and converted to the corpus rate
//! with a `rubato` polynomial resampler.

use rubato::{
    FastFixedIn, PolynomialDegree, ResampleError, Resampler, ResamplerConstructionError,
};
use thiserror::Error;

/// Errors reported by the rate converter.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("cannot build resampler: {0}")]
    Construction(#[from] ResamplerConstructionError),

    #[error("resampling failed: {0}")]
    Process(#[from] ResampleError),
}

// ---------------------------------------------------------------------------
// Channel layout
// ---------------------------------------------------------------------------

/// Split interleaved frames into one vector per channel.
///
/// A trailing partial frame is dropped; `channels == 0` yields no channels.
pub fn deinterleave(samples: &[f32], channels: u16) -> Vec<Vec<f32>> {
    let n = channels as usize;
    if n == 0 {
        return Vec::new();
    }

    let mut planar = vec![Vec::with_capacity(samples.len() / n); n];
    for frame in samples.chunks_exact(n) {
        for (channel, &sample) in planar.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }
    planar
}

/// Average planar channels into a single mono channel.
///
/// ```rust
/// use corpus_compose::audio::{deinterleave, mix_to_mono};
///
/// let planar = deinterleave(&[0.5_f32, -0.5, 0.2, 0.4], 2);
/// let mono = mix_to_mono(&planar);
/// assert_eq!(mono.len(), 2);
/// assert!(mono[0].abs() < 1e-6);
/// assert!((mono[1] - 0.3).abs() < 1e-6);
/// ```
pub fn mix_to_mono(planar: &[Vec<f32>]) -> Vec<f32> {
    match planar {
        [] => Vec::new(),
        [mono] => mono.clone(),
        channels => {
            let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
            let scale = 1.0 / channels.len() as f32;
            (0..frames)
                .map(|i| channels.iter().map(|c| c[i]).sum::<f32>() * scale)
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// Rate conversion
// ---------------------------------------------------------------------------

/// Convert a whole mono signal from `source_rate` to `target_rate` Hz.
///
/// The result holds `round(len * target_rate / source_rate)` samples and is
/// aligned with the input: the resampler's output delay is trimmed and its
/// tail flushed.
///
/// ```rust
/// use corpus_compose::audio::convert_rate;
///
/// let hi = vec![0.5_f32; 4_800];
/// let lo = convert_rate(&hi, 48_000, 16_000).unwrap();
/// assert_eq!(lo.len(), 1_600);
/// ```
pub fn convert_rate(
    samples: &[f32],
    source_rate: u32,
    target_rate: u32,
) -> Result<Vec<f32>, RateError> {
    if source_rate == target_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = target_rate as f64 / source_rate as f64;
    let expected = (samples.len() as f64 * ratio).round() as usize;

    let mut resampler =
        FastFixedIn::<f32>::new(ratio, 1.0, PolynomialDegree::Septic, samples.len(), 1)?;
    let delay = resampler.output_delay();

    let mut output = resampler.process(&[samples], None)?.swap_remove(0);
    let tail = resampler
        .process_partial(None::<&[&[f32]]>, None)?
        .swap_remove(0);
    output.extend(tail);

    output.drain(..delay.min(output.len()));
    output.resize(expected, 0.0);

    log::debug!(
        "converted {} samples at {source_rate} Hz to {} at {target_rate} Hz",
        samples.len(),
        output.len()
    );
    Ok(output)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deinterleave_stereo() {
        let planar = deinterleave(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2);
        assert_eq!(planar, [vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]]);
    }

    #[test]
    fn deinterleave_drops_partial_frame() {
        let planar = deinterleave(&[0.2, 0.4, 0.9], 2);
        assert_eq!(planar, [vec![0.2], vec![0.4]]);
    }

    #[test]
    fn deinterleave_zero_channels() {
        assert!(deinterleave(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn mono_mix_passes_single_channel_through() {
        assert_eq!(mix_to_mono(&[vec![0.1, 0.2]]), [0.1, 0.2]);
        assert!(mix_to_mono(&[]).is_empty());
    }

    #[test]
    fn mono_mix_of_three_channels() {
        let mono = mix_to_mono(&[vec![0.3], vec![0.6], vec![0.0]]);
        assert!((mono[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn same_rate_is_a_copy() {
        let input: Vec<f32> = (0..160).map(|i| i as f32 / 160.0).collect();
        assert_eq!(convert_rate(&input, 16_000, 16_000).unwrap(), input);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(convert_rate(&[], 48_000, 16_000).unwrap().is_empty());
    }

    #[test]
    fn cd_rate_to_16k_length() {
        let out = convert_rate(&vec![0.0_f32; 44_100], 44_100, 16_000).unwrap();
        assert_eq!(out.len(), 16_000);
    }

    #[test]
    fn upsampling_length() {
        let out = convert_rate(&vec![0.0_f32; 8_000], 8_000, 16_000).unwrap();
        assert_eq!(out.len(), 16_000);
    }

    #[test]
    fn constant_signal_keeps_its_level_away_from_the_edges() {
        let out = convert_rate(&vec![0.5_f32; 4_800], 48_000, 16_000).unwrap();
        for &s in &out[16..out.len() - 16] {
            assert!((s - 0.5).abs() < 1e-3, "level drift: {s}");
        }
    }

    #[test]
    fn step_stays_where_it_was() {
        let mut source = vec![0.0_f32; 24_000];
        source.extend(std::iter::repeat(1.0).take(24_000));
        let out = convert_rate(&source, 48_000, 16_000).unwrap();

        assert!(out[7_900].abs() < 1e-3, "early: {}", out[7_900]);
        assert!((out[8_100] - 1.0).abs() < 1e-3, "late: {}", out[8_100]);
    }
}
