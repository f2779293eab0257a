//! Edit-script operations and their on-disk token form.
//!
//! | Token   | Operation        |
//! |---------|------------------|
//! | `""`    | [`EditOp::Keep`] |
//! | `"+ c"` | [`EditOp::Insert`]`('c')` (character at index 2) |
//! | `"- c"` | [`EditOp::Delete`] |

use serde::{Deserialize, Deserializer};

use super::PatchError;

/// One step of an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// Copy the character under the cursor and advance.
    Keep,
    /// Emit a character without moving the cursor.
    Insert(char),
    /// Skip the character under the cursor.
    Delete,
}

impl EditOp {
    /// Decode one token.  `index` is only used for error reporting.
    ///
    /// ```
    /// use corpus_compose::patch::EditOp;
    ///
    /// assert_eq!(EditOp::from_token(0, "").unwrap(), EditOp::Keep);
    /// assert_eq!(EditOp::from_token(1, "+ ア").unwrap(), EditOp::Insert('ア'));
    /// assert_eq!(EditOp::from_token(2, "- イ").unwrap(), EditOp::Delete);
    /// assert!(EditOp::from_token(3, "? x").is_err());
    /// ```
    pub fn from_token(index: usize, token: &str) -> Result<Self, PatchError> {
        let invalid = || PatchError::InvalidToken {
            index,
            token: token.to_string(),
        };

        let mut chars = token.chars();
        match chars.next() {
            None => Ok(EditOp::Keep),
            Some('+') => chars.nth(1).map(EditOp::Insert).ok_or_else(invalid),
            Some('-') => Ok(EditOp::Delete),
            Some(_) => Err(invalid()),
        }
    }
}

/// Decode a whole token list.
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<EditOp>, PatchError> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| EditOp::from_token(index, token.as_ref()))
        .collect()
}

impl<'de> Deserialize<'de> for EditOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        EditOp::from_token(0, &token).map_err(serde::de::Error::custom)
    }
}
