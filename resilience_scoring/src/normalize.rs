use crate::config::{Cell, LikertMapping};

/// Converts the content of a cell to a score.
///
/// Returns `None` for blank cells and for answers that do not match any label of the
/// mapping exactly (up to case and surrounding whitespace). There is no fuzzy matching:
/// callers report the unmapped answers so that the mapping can be completed.
pub fn normalize(raw: &Cell, likert_map: &LikertMapping) -> Option<i64> {
    let answer = raw.answer_text()?;
    likert_map.lookup(&answer)
}
