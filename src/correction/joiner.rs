//! Matching correction records against the local utterance index.

use std::collections::HashSet;

use super::index::{IndexedUtterance, UtteranceIndex};
use super::table::CorrectionRecord;

/// A correction record paired with the local utterance it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedUtterance<'a> {
    pub record: CorrectionRecord,
    pub utterance: &'a IndexedUtterance,
}

/// Everything the joiner produced from one pass over the table.
#[derive(Debug, Default)]
pub struct JoinOutcome<'a> {
    /// Matched records in table order.
    pub matched: Vec<JoinedUtterance<'a>>,
    /// Utterance ids whose hash was not found locally.
    pub unmatched: Vec<String>,
    /// Utterance ids that appeared more than once in the table.
    pub repeated: Vec<String>,
}

/// Stream `records` once and keep the ones whose hash is in `index`.
///
/// Unmatched records are logged and skipped.  A record whose utterance id
/// was already joined is skipped too, so no utterance id is emitted twice.
/// The first error produced by `records` stops the join and is returned.
pub fn join<'a, I, E>(index: &'a UtteranceIndex, records: I) -> Result<JoinOutcome<'a>, E>
where
    I: IntoIterator<Item = Result<CorrectionRecord, E>>,
{
    let mut outcome = JoinOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();

    for record in records {
        let record = record?;

        let Some(utterance) = index.get(&record.hash) else {
            log::warn!(
                "{} does not exist in the downloaded subtitles. Ignored.",
                record.utt_id
            );
            outcome.unmatched.push(record.utt_id);
            continue;
        };

        if !seen.insert(record.utt_id.clone()) {
            log::warn!("{} appears more than once in the table. Ignored.", record.utt_id);
            outcome.repeated.push(record.utt_id);
            continue;
        }

        outcome.matched.push(JoinedUtterance { record, utterance });
    }

    Ok(outcome)
}
