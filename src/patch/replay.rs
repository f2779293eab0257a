//! Cursor-based replay of an edit script.

use super::op::EditOp;
use super::PatchError;

/// Rebuild the corrected text from `old` and its edit script.
///
/// The cursor walks `old` one character at a time.  `Keep` and `Delete`
/// must find a character under the cursor; running past the end means the
/// script does not belong to this text and replay aborts.  Characters left
/// after the last op are dropped.
///
/// ```
/// use corpus_compose::patch::{apply, EditOp};
///
/// let ops = [EditOp::Keep, EditOp::Delete, EditOp::Insert('X'), EditOp::Keep];
/// assert_eq!(apply("abcd", &ops).unwrap(), "aXc");
/// ```
pub fn apply(old: &str, ops: &[EditOp]) -> Result<String, PatchError> {
    let chars: Vec<char> = old.chars().collect();
    let mut cursor = 0usize;
    let mut out = String::with_capacity(old.len());

    for (op_index, op) in ops.iter().enumerate() {
        match *op {
            EditOp::Insert(c) => out.push(c),
            EditOp::Keep | EditOp::Delete => {
                let Some(&c) = chars.get(cursor) else {
                    return Err(PatchError::Inconsistent {
                        op_index,
                        op: *op,
                        cursor,
                        len: chars.len(),
                    });
                };
                if *op == EditOp::Keep {
                    out.push(c);
                }
                cursor += 1;
            }
        }
    }

    Ok(out)
}
