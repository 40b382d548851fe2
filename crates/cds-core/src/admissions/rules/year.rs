//! Reporting year extraction.

use regex::Captures;

use super::patterns::CDS_YEAR_PATTERN;
use crate::models::record::{FieldValue, ReportingYear};

/// Build the reporting year from a [`CDS_YEAR`](super::patterns::CDS_YEAR) match.
pub fn compose(caps: &Captures<'_>) -> Option<FieldValue> {
    let start = caps.get(1)?.as_str();
    let end = caps.get(2)?.as_str();
    Some(FieldValue::Year(ReportingYear::new(start, end)))
}

/// Extract the reporting year from document text.
pub fn extract_reporting_year(text: &str) -> Option<ReportingYear> {
    match CDS_YEAR_PATTERN.captures(text).as_ref().and_then(compose) {
        Some(FieldValue::Year(year)) => Some(year),
        _ => None,
    }
}
