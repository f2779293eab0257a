//! Decoding the corrected timestamps embedded in utterance ids.
//!
//! Utterance ids are published with the correction table and look like
//! `<source>_<start>--<end>` where `<start>` and `<end>` are zero-padded
//! centisecond counts at fixed byte offsets:
//!
//! ```text
//! 0           12      20  22      30
//! X0AbCdEfGh0_00001234--00005678
//!             ^^^^^^^^  ^^^^^^^^
//!             start     end
//! ```
//!
//! Any change to that format only needs a new [`UttIdLayout`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors decoding an utterance id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UttIdError {
    /// The id is shorter than the layout requires.
    #[error("utterance id {utt_id:?} has no {field} field at bytes {offset}..{end}")]
    MissingField {
        utt_id: String,
        field: &'static str,
        offset: usize,
        end: usize,
    },

    /// The field is present but not a decimal number.
    #[error("utterance id {utt_id:?} has a non-numeric {field} field {value:?}")]
    NotNumeric {
        utt_id: String,
        field: &'static str,
        value: String,
    },
}

/// Fixed-width offset table for the timestamps embedded in utterance ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UttIdLayout {
    /// Byte offset of the start-time field.
    pub start_offset: usize,
    /// Byte offset of the end-time field.
    pub end_offset: usize,
    /// Width of each numeric field in bytes.
    pub width: usize,
    /// Divisor converting a field into seconds.
    pub scale: f64,
}

impl Default for UttIdLayout {
    fn default() -> Self {
        Self {
            start_offset: 12,
            end_offset: 22,
            width: 8,
            scale: 100.0,
        }
    }
}

impl UttIdLayout {
    /// Decode `(start, end)` in seconds.
    ///
    /// ```
    /// use corpus_compose::corpus::UttIdLayout;
    ///
    /// let layout = UttIdLayout::default();
    /// let (start, end) = layout.decode("X0AbCdEfGh0_00001234--00005678").unwrap();
    /// assert_eq!(start, 12.34);
    /// assert_eq!(end, 56.78);
    /// ```
    pub fn decode(&self, utt_id: &str) -> Result<(f64, f64), UttIdError> {
        let start = self.field(utt_id, "start", self.start_offset)?;
        let end = self.field(utt_id, "end", self.end_offset)?;
        Ok((start as f64 / self.scale, end as f64 / self.scale))
    }

    fn field(&self, utt_id: &str, field: &'static str, offset: usize) -> Result<u64, UttIdError> {
        let end = offset + self.width;
        let value = utt_id
            .get(offset..end)
            .ok_or_else(|| UttIdError::MissingField {
                utt_id: utt_id.to_string(),
                field,
                offset,
                end,
            })?;

        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UttIdError::NotNumeric {
                utt_id: utt_id.to_string(),
                field,
                value: value.to_string(),
            });
        }
        value.parse().map_err(|_| UttIdError::NotNumeric {
            utt_id: utt_id.to_string(),
            field,
            value: value.to_string(),
        })
    }
}

/// Seconds with two decimals, as written to `segments`.
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.2}")
}
