//! Content hashing used as the join key against the correction table.
//!
//! The key is the MD5 digest of `"{source_id}+{text}"` where every
//! whitespace character has been removed from `text`.  The table was built
//! with exactly this rule, so neither the separator nor the algorithm may
//! change independently of the published data.

use std::fmt;
use std::str::FromStr;

use md5::{Digest, Md5};

/// Separator placed between the source id and the text before hashing.
const KEY_SEPARATOR: &str = "+";

/// A 128-bit content digest, displayed as 32 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Digest arbitrary bytes.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let digest = Md5::digest(bytes);
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest);
        Self(out)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// The string was not 32 hexadecimal digits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid content hash {0:?}: expected 32 hex digits")]
pub struct ParseHashError(pub String);

impl FromStr for ContentHash {
    type Err = ParseHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseHashError(s.to_string());
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let mut out = [0u8; 16];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(out))
    }
}

/// Remove every whitespace character (not just runs) from `text`.
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Join key for one utterance.
///
/// ```
/// use corpus_compose::correction::content_hash;
///
/// assert_eq!(
///     content_hash("talk01", "こんにちは 世界"),
///     content_hash("talk01", "こんにちは世界"),
/// );
/// assert_ne!(
///     content_hash("talk01", "こんにちは"),
///     content_hash("talk02", "こんにちは"),
/// );
/// ```
pub fn content_hash(source_id: &str, text: &str) -> ContentHash {
    let key = format!("{source_id}{KEY_SEPARATOR}{}", strip_whitespace(text));
    ContentHash::of_bytes(key.as_bytes())
}
