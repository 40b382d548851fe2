//! GPA extraction.
//!
//! Only values between 0.0 and 4.99 are recognized; weighted scales above
//! 4.99 are not reported.

use regex::Captures;

use super::patterns::GPA_PATTERN;
use crate::models::record::FieldValue;

/// Build the GPA value from a [`GPA_VALUE`](super::patterns::GPA_VALUE) match.
pub fn compose(caps: &Captures<'_>) -> Option<FieldValue> {
    caps.get(2).map(|m| FieldValue::Gpa(m.as_str().to_string()))
}

/// Extract the average GPA from document text, as written.
pub fn extract_gpa(text: &str) -> Option<String> {
    match GPA_PATTERN.captures(text).as_ref().and_then(compose) {
        Some(FieldValue::Gpa(value)) => Some(value),
        _ => None,
    }
}
