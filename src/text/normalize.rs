//! Subtitle text clean-up.
//!
//! [`normalize`] applies an ordered list of rewrites to one cue's text.  The
//! order matters: asides are removed before bracket glyphs are blanked, and
//! whitespace is collapsed last so every earlier replacement can leave
//! spaces behind freely.
//!
//! The exact rewrites must stay in step with the ones used to build the
//! correction table, otherwise content hashes stop matching.

use std::sync::LazyLock;

use regex::Regex;

use super::width::FullWidth;

/// Zero-width space.
const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// `(pattern, replacement)` pairs applied after width folding, in order.
const REWRITES: &[(&str, &str)] = &[
    // Translator / caption credits: drop the rest of the line.
    (r"翻訳：.*", ""),
    (r"字幕：.*", ""),
    // Foreign-language passages, e.g. "（英語）Thank you".
    (r"（.*語）.*", ""),
    // Asides that only exist in subtitles: （笑）, ［の］ ...
    (r"（.*?）", ""),
    (r"［.*?］", ""),
    // Quote and bracket glyphs.
    (r#"「|」|『|』|［|］|"|“|”|＂"#, " "),
    // Sentence-ending and list punctuation.
    (r"！|？|、|。|…|—|・・・|．．．", " "),
    // Wave dash → prolonged sound mark.
    (r"〜", "ー"),
    // Music notes and a trailing horizontal bar.
    (r"♪", ""),
    (r"―$", ""),
    // Whitespace runs.
    (r"\s+", " "),
];

static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    REWRITES
        .iter()
        .map(|&(pattern, replacement)| {
            let re = Regex::new(pattern)
                .unwrap_or_else(|e| panic!("invalid normalisation pattern {pattern:?}: {e}"));
            (re, replacement)
        })
        .collect()
});

/// Clean one line of subtitle text.
///
/// # Examples
///
/// ```
/// use corpus_compose::text::normalize;
///
/// assert_eq!(normalize("1（笑） "), "１");
/// assert_eq!(normalize("「こんにちは」と言った。"), "こんにちは と言った");
/// ```
pub fn normalize(text: &str) -> String {
    let stripped: String = text.chars().filter(|&c| c != ZERO_WIDTH_SPACE).collect();
    let mut text = FullWidth::CORPUS.apply(&stripped);

    for (re, replacement) in RULES.iter() {
        text = re.replace_all(&text, *replacement).into_owned();
    }

    text.trim().to_string()
}
