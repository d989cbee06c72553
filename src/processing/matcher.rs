use crate::CONFIDENCE_FLOOR;
use crate::domain::record::{MatchResult, MatchedField, Record};
use crate::processing::similarity::compare_two_strings;

/// Scores `record` against `query` as the best of its heading, url and body.
pub fn score_record(query: &str, record: &Record) -> (f64, MatchedField) {
    let mut best = (f64::NEG_INFINITY, MatchedField::Heading);
    for field in MatchedField::ALL {
        let score = compare_two_strings(query, record.field(field));
        if score > best.0 {
            best = (score, field);
        }
    }
    best
}

/// Finds the record most similar to `query` using the default confidence floor.
pub fn find_best<'a>(query: &str, records: &'a [Record]) -> Option<MatchResult<'a>> {
    find_best_with_floor(query, records, CONFIDENCE_FLOOR)
}

/// Finds the record most similar to `query`.
///
/// Ties keep the earliest record. Returns `None` when `records` is empty or
/// the best score is below `floor`.
pub fn find_best_with_floor<'a>(
    query: &str,
    records: &'a [Record],
    floor: f64,
) -> Option<MatchResult<'a>> {
    let mut best: Option<MatchResult<'a>> = None;
    for record in records {
        let (score, field) = score_record(query, record);
        if best.as_ref().is_none_or(|current| score > current.score) {
            best = Some(MatchResult {
                record,
                score,
                field,
            });
        }
    }

    let best = best?;
    if best.score < floor {
        log::debug!(
            "Best match for {query:?} scored {:.2}, below floor {floor:.2}",
            best.score
        );
        return None;
    }

    log::info!(
        "Best match: {:?} via {} (similarity: {:.2})",
        best.matched_text(),
        best.field,
        best.score
    );
    Some(best)
}
