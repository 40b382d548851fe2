//! Test score range extraction (TOEFL, SAT, ACT).

use regex::{Captures, Regex};

use super::patterns::{ACT_PATTERN, SAT_PATTERN, TOEFL_PATTERN};
use crate::models::record::{Field, FieldValue, ScoreRange};

/// Build a score range from a labeled range match (label, low, high).
///
/// The bounds are the captured digits verbatim.
pub fn compose(caps: &Captures<'_>) -> Option<FieldValue> {
    let low = caps.get(2)?.as_str();
    let high = caps.get(3)?.as_str();
    Some(FieldValue::Range(ScoreRange::new(low, high)))
}

fn pattern_for(field: Field) -> Option<&'static Regex> {
    match field {
        Field::Toefl => Some(&*TOEFL_PATTERN),
        Field::Sat => Some(&*SAT_PATTERN),
        Field::Act => Some(&*ACT_PATTERN),
        _ => None,
    }
}

/// Extract the score range for a test field.
///
/// Returns `None` for fields that are not score ranges.
pub fn extract_score_range(field: Field, text: &str) -> Option<ScoreRange> {
    let caps = pattern_for(field)?.captures(text)?;
    match compose(&caps)? {
        FieldValue::Range(range) => Some(range),
        _ => None,
    }
}
