//! Institution name extraction.

use regex::Captures;

use super::patterns::INSTITUTION_PATTERN;
use crate::models::record::FieldValue;

/// Build the institution value from an [`INSTITUTION`](super::patterns::INSTITUTION) match.
pub fn compose(caps: &Captures<'_>) -> Option<FieldValue> {
    caps.get(1).map(|m| FieldValue::Text(m.as_str().to_string()))
}

/// Extract the institution name from document text.
pub fn extract_institution(text: &str) -> Option<String> {
    INSTITUTION_PATTERN
        .captures(text)
        .map(|caps| caps[1].to_string())
}
