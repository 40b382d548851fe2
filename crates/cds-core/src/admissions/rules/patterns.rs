//! Regex patterns for Common Data Set field extraction.
//!
//! Metric patterns pair a label alternative with the first numbers that follow
//! it. The gap between them is lazy, so the earliest label wins and then the
//! nearest numbers after it.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

/// `Institution: <name>` up to the end of the line.
pub const INSTITUTION: &str = r"Institution: (.+?)\n";

/// `Common Data Set YYYY-YYYY`.
pub const CDS_YEAR: &str = r"Common Data Set (\d{4})-(\d{4})";

/// TOEFL internet-based test range, e.g. `TOEFL (Internet-based) ... 90 to 100`.
pub const TOEFL_RANGE: &str = r"(TOEFL\s*\(?Internet-based\)?|iBT).*?(\d{2,3})\s*to\s*(\d{2,3})";

/// SAT Evidence-Based Reading and Writing range, e.g. `SAT ERW ... 700 to 760`.
pub const SAT_RANGE: &str =
    r"(SAT\s*Evidence-Based\s*Reading\s*and\s*Writing|SAT\s*ERW).*?(\d{3,4})\s*to\s*(\d{3,4})";

/// ACT composite range, e.g. `ACT Composite ... 33 to 35`.
pub const ACT_RANGE: &str = r"(ACT\s*Composite).*?(\d{1,2})\s*to\s*(\d{1,2})";

/// Average or mean GPA between 0.0 and 4.99.
pub const GPA_VALUE: &str = r"(Average\s*GPA|Mean\s*GPA).*?([0-3]\.\d{1,2}|4\.\d{1,2})";

/// Compile a labeled-metric pattern.
///
/// Metric labels match case-insensitively. With `span_lines` the gap between
/// label and numbers may cross line breaks.
pub fn metric_regex(pattern: &str, span_lines: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(span_lines)
        .build()
}

lazy_static! {
    pub static ref INSTITUTION_PATTERN: Regex = Regex::new(INSTITUTION).unwrap();

    pub static ref CDS_YEAR_PATTERN: Regex = Regex::new(CDS_YEAR).unwrap();

    pub static ref TOEFL_PATTERN: Regex = metric_regex(TOEFL_RANGE, false).unwrap();

    pub static ref SAT_PATTERN: Regex = metric_regex(SAT_RANGE, false).unwrap();

    pub static ref ACT_PATTERN: Regex = metric_regex(ACT_RANGE, false).unwrap();

    pub static ref GPA_PATTERN: Regex = metric_regex(GPA_VALUE, false).unwrap();
}
