//! The fixed table of field rules.
//!
//! A [`RuleSet`] is built once and never mutated; parsers share it by `Arc`.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::rules::patterns::{
    ACT_PATTERN, ACT_RANGE, CDS_YEAR_PATTERN, GPA_PATTERN, GPA_VALUE, INSTITUTION_PATTERN,
    SAT_PATTERN, SAT_RANGE, TOEFL_PATTERN, TOEFL_RANGE, metric_regex,
};
use super::rules::{ExtractionMatch, FieldExtractor, gpa, institution, scores, year};
use crate::error::CdsError;
use crate::models::config::ExtractionConfig;
use crate::models::record::{ExtractionResult, Field, FieldValue};

/// Turns the captures of a rule's match into a field value.
pub type Compose = fn(&Captures<'_>) -> Option<FieldValue>;

/// A named extraction rule: which field, what to search for, how to build the value.
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: Field,
    regex: Regex,
    compose: Compose,
}

impl FieldRule {
    pub fn new(field: Field, regex: Regex, compose: Compose) -> Self {
        Self {
            field,
            regex,
            compose,
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Value of the earliest match, if any.
    pub fn apply(&self, text: &str) -> Option<FieldValue> {
        self.extract(text).map(|m| m.value)
    }

    fn to_match(&self, caps: &Captures<'_>) -> Option<ExtractionMatch<FieldValue>> {
        let value = (self.compose)(caps)?;
        let full_match = caps.get(0)?;
        Some(
            ExtractionMatch::new(value, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

impl FieldExtractor for FieldRule {
    type Output = ExtractionMatch<FieldValue>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        // Earliest match wins; compose succeeds on any capture of its own pattern
        self.regex
            .captures_iter(text)
            .find_map(|caps| self.to_match(&caps))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| self.to_match(&caps))
            .collect()
    }
}

/// The complete, immutable set of field rules, one per [`Field`].
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

lazy_static! {
    static ref STANDARD_RULES: Arc<RuleSet> = Arc::new(RuleSet::with_metric_patterns(
        TOEFL_PATTERN.clone(),
        SAT_PATTERN.clone(),
        ACT_PATTERN.clone(),
        GPA_PATTERN.clone(),
    ));
}

impl RuleSet {
    /// The shared default rule set.
    pub fn standard() -> Arc<RuleSet> {
        Arc::clone(&STANDARD_RULES)
    }

    /// Build a rule set for the given extraction settings.
    pub fn new(config: &ExtractionConfig) -> Result<Self, CdsError> {
        if !config.span_lines {
            return Ok(STANDARD_RULES.as_ref().clone());
        }

        let metric = |pattern: &str| {
            metric_regex(pattern, true)
                .map_err(|e| CdsError::Config(format!("invalid field pattern: {}", e)))
        };

        Ok(Self::with_metric_patterns(
            metric(TOEFL_RANGE)?,
            metric(SAT_RANGE)?,
            metric(ACT_RANGE)?,
            metric(GPA_VALUE)?,
        ))
    }

    fn with_metric_patterns(toefl_re: Regex, sat_re: Regex, act_re: Regex, gpa_re: Regex) -> Self {
        Self {
            rules: vec![
                FieldRule::new(Field::University, INSTITUTION_PATTERN.clone(), institution::compose),
                FieldRule::new(Field::Toefl, toefl_re, scores::compose),
                FieldRule::new(Field::Sat, sat_re, scores::compose),
                FieldRule::new(Field::Act, act_re, scores::compose),
                FieldRule::new(Field::Gpa, gpa_re, gpa::compose),
                FieldRule::new(Field::Year, CDS_YEAR_PATTERN.clone(), year::compose),
            ],
        }
    }

    /// Rules in column order.
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// The rule for a field.
    pub fn rule(&self, field: Field) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    /// Evaluate every rule independently against the same text.
    pub fn evaluate(&self, text: &str) -> ExtractionResult {
        let mut result = ExtractionResult::new();
        for rule in &self.rules {
            result.set(rule.field, rule.apply(text));
        }
        result
    }
}
