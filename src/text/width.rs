//! Half-width → full-width character folding.
//!
//! Printable ASCII `U+0021..=U+007E` maps onto the Fullwidth Forms block
//! `U+FF01..=U+FF5E` by a constant offset; the ASCII space maps onto the
//! ideographic space `U+3000`.  Half-width katakana (`U+FF61..=U+FF9F`) is
//! never touched.

/// Distance between a printable ASCII code point and its full-width form.
const FULL_WIDTH_OFFSET: u32 = 0xFEE0;

/// Ideographic (full-width) space.
const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Which character classes [`FullWidth::apply`] converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullWidth {
    /// Letters, punctuation, symbols and the space character.
    pub ascii: bool,
    /// The digits `0`–`9`.
    pub digits: bool,
}

impl FullWidth {
    /// Letters and digits widened, kana left alone.
    pub const CORPUS: FullWidth = FullWidth {
        ascii: true,
        digits: true,
    };

    /// Widen every selected half-width character in `text`.
    ///
    /// ```
    /// use corpus_compose::text::FullWidth;
    ///
    /// assert_eq!(FullWidth::CORPUS.apply("TED 10"), "ＴＥＤ\u{3000}１０");
    /// ```
    pub fn apply(&self, text: &str) -> String {
        text.chars().map(|c| self.widen(c)).collect()
    }

    fn widen(&self, c: char) -> char {
        let selected = if c.is_ascii_digit() {
            self.digits
        } else {
            self.ascii && (c == ' ' || c.is_ascii_graphic())
        };
        if !selected {
            return c;
        }
        if c == ' ' {
            return IDEOGRAPHIC_SPACE;
        }
        char::from_u32(c as u32 + FULL_WIDTH_OFFSET).unwrap_or(c)
    }
}
