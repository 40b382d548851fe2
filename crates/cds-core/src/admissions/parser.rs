//! Common Data Set parser: runs the rule set over document text.

use std::sync::Arc;
use std::time::Instant;

use tracing::{Level, debug, enabled};

use super::rules::FieldExtractor;
use super::ruleset::RuleSet;
use super::AdmissionsExtractor;
use crate::error::CdsError;
use crate::models::config::ExtractionConfig;
use crate::models::record::ExtractionResult;

/// Rule-based parser for Common Data Set text.
#[derive(Debug, Clone)]
pub struct CdsParser {
    rules: Arc<RuleSet>,
}

impl CdsParser {
    /// Create a parser using the standard rule set.
    pub fn new() -> Self {
        Self::with_rules(RuleSet::standard())
    }

    /// Create a parser sharing an existing rule set.
    pub fn with_rules(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Create a parser for the given extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, CdsError> {
        Ok(Self::with_rules(Arc::new(RuleSet::new(config)?)))
    }

    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }

    fn log_ambiguous_fields(&self, text: &str) {
        for rule in self.rules.rules() {
            let candidates = rule.extract_all(text).len();
            if candidates > 1 {
                debug!(
                    "{} has {} candidate matches, keeping the first",
                    rule.field(),
                    candidates
                );
            }
        }
    }
}

impl Default for CdsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AdmissionsExtractor for CdsParser {
    fn extract_fields(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        let result = self.rules.evaluate(text);

        if enabled!(Level::DEBUG) {
            self.log_ambiguous_fields(text);
            debug!(
                "Found {}/{} fields in {} chars ({:?}), missing: {:?}",
                result.found_count(),
                self.rules.rules().len(),
                text.len(),
                start.elapsed(),
                result.missing_fields()
            );
        }

        result
    }
}
