//! Admissions field extraction module.

mod parser;
pub mod rules;
mod ruleset;

pub use parser::CdsParser;
pub use ruleset::{Compose, FieldRule, RuleSet};

use crate::models::record::ExtractionResult;

/// Trait for turning document text into an admissions record.
///
/// Extraction never fails: a field that does not match is simply missing.
pub trait AdmissionsExtractor {
    /// Extract every recognized field from plain text.
    fn extract_fields(&self, text: &str) -> ExtractionResult;
}
