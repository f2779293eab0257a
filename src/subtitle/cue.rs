//! Timed subtitle cues and timestamp conversion.

use super::SubtitleError;

/// One timed subtitle block.
///
/// `start <= end` is trusted from the source file and not enforced.
/// `raw_text` is the block's text lines joined with single spaces, before
/// any normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Un-normalised cue text.
    pub raw_text: String,
}

/// Convert an `hh:mm:ss[.fff]` timestamp into seconds.
///
/// # Examples
///
/// ```
/// use corpus_compose::subtitle::parse_timestamp;
///
/// assert_eq!(parse_timestamp("00:00:02.500").unwrap(), 2.5);
/// assert_eq!(parse_timestamp("01:02:03").unwrap(), 3723.0);
/// assert!(parse_timestamp("02.500").is_err());
/// ```
pub fn parse_timestamp(timestamp: &str) -> Result<f64, SubtitleError> {
    let malformed = || SubtitleError::MalformedTimestamp(timestamp.to_string());

    let mut fields = timestamp.split(':');
    let (Some(hour), Some(minute), Some(second), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed());
    };

    let hour: u32 = hour.parse().map_err(|_| malformed())?;
    let minute: u32 = minute.parse().map_err(|_| malformed())?;
    let second: f64 = second.parse().map_err(|_| malformed())?;
    if !second.is_finite() || second < 0.0 {
        return Err(malformed());
    }

    Ok(f64::from(hour) * 3600.0 + f64::from(minute) * 60.0 + second)
}
