//! Extracted admissions record for a single Common Data Set document.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::error::ExportError;

/// Placeholder rendered for a missing institution name.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder rendered for every other missing field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Name of the column holding the source document name.
pub const FILENAME_COLUMN: &str = "Filename";

/// A recognized field, in table column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    University,
    Toefl,
    Sat,
    Act,
    Gpa,
    Year,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 6] = [
        Field::University,
        Field::Toefl,
        Field::Sat,
        Field::Act,
        Field::Gpa,
        Field::Year,
    ];

    /// Column name used in tables and exports.
    pub fn name(&self) -> &'static str {
        match self {
            Field::University => "University",
            Field::Toefl => "TOEFL",
            Field::Sat => "SAT",
            Field::Act => "ACT",
            Field::Gpa => "GPA",
            Field::Year => "Year",
        }
    }

    /// Value shown when the field was not found.
    pub fn sentinel(&self) -> &'static str {
        match self {
            Field::University => UNKNOWN,
            _ => NOT_AVAILABLE,
        }
    }

    /// Look up a field by its column name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Decode a rendered cell from data row `row` back into a value.
    ///
    /// The sentinel decodes to `None`.
    pub fn parse_cell(&self, row: usize, cell: &str) -> Result<Option<FieldValue>, ExportError> {
        if cell == self.sentinel() {
            return Ok(None);
        }

        let invalid = || ExportError::InvalidCell {
            row,
            column: self.name().to_string(),
            value: cell.to_string(),
        };

        let value = match self {
            Field::University => FieldValue::Text(cell.to_string()),
            Field::Toefl | Field::Sat | Field::Act => {
                FieldValue::Range(cell.parse().map_err(|_| invalid())?)
            }
            Field::Gpa => {
                split_digits(cell, '.').ok_or_else(invalid)?;
                FieldValue::Gpa(cell.to_string())
            }
            Field::Year => FieldValue::Year(cell.parse().map_err(|_| invalid())?),
        };
        Ok(Some(value))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A `<digits>-<digits>` cell that could not be split into its two halves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected two digit runs joined by '-', found {0:?}")]
pub struct ParsePairError(String);

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_numeric)
}

fn split_digits(s: &str, separator: char) -> Option<(&str, &str)> {
    s.split_once(separator)
        .filter(|(left, right)| is_digits(left) && is_digits(right))
}

/// A low-high score range such as a middle-50% band.
///
/// Both bounds keep the digits exactly as matched, so `0700 to 0760`
/// stays `0700-0760`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRange {
    pub low: String,
    pub high: String,
}

impl ScoreRange {
    pub fn new(low: impl Into<String>, high: impl Into<String>) -> Self {
        Self {
            low: low.into(),
            high: high.into(),
        }
    }
}

impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

impl FromStr for ScoreRange {
    type Err = ParsePairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (low, high) = split_digits(s, '-').ok_or_else(|| ParsePairError(s.to_string()))?;
        Ok(Self::new(low, high))
    }
}

/// The academic year a report covers, e.g. 2022-2023.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingYear {
    pub start: String,
    pub end: String,
}

impl ReportingYear {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl fmt::Display for ReportingYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for ReportingYear {
    type Err = ParsePairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = split_digits(s, '-').ok_or_else(|| ParsePairError(s.to_string()))?;
        Ok(Self::new(start, end))
    }
}

/// A typed extracted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text (institution name).
    Text(String),
    /// Score range (TOEFL, SAT, ACT).
    Range(ScoreRange),
    /// Grade point average, as written.
    Gpa(String),
    /// Reporting year span.
    Year(ReportingYear),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Range(r) => r.fmt(f),
            FieldValue::Gpa(s) => f.write_str(s),
            FieldValue::Year(y) => y.fmt(f),
        }
    }
}

/// Fields extracted from one document, plus the document name.
///
/// Missing fields are stored as absent and rendered as their sentinel, so
/// every row exposes the same set of columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Name of the source document.
    pub filename: String,
    values: BTreeMap<Field, FieldValue>,
}

impl ExtractionResult {
    /// Create an empty result (every field missing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the source document name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Set or clear a field.
    pub fn set(&mut self, field: Field, value: Option<FieldValue>) {
        match value {
            Some(v) => {
                self.values.insert(field, v);
            }
            None => {
                self.values.remove(&field);
            }
        }
    }

    /// Get a field value, if it was found.
    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    /// Render a field as a table cell, substituting the sentinel when missing.
    pub fn cell(&self, field: Field) -> String {
        self.get(field)
            .map(ToString::to_string)
            .unwrap_or_else(|| field.sentinel().to_string())
    }

    /// Number of fields that were found.
    pub fn found_count(&self) -> usize {
        self.values.len()
    }

    /// Fields that were not found.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| !self.values.contains_key(f))
            .collect()
    }

    /// Cells for a full table row: filename first, then every field.
    pub fn to_row(&self) -> Vec<String> {
        std::iter::once(self.filename.clone())
            .chain(Field::ALL.iter().map(|f| self.cell(*f)))
            .collect()
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::ALL.len() + 1))?;
        map.serialize_entry(FILENAME_COLUMN, &self.filename)?;
        for field in Field::ALL {
            map.serialize_entry(field.name(), &self.cell(field))?;
        }
        map.end()
    }
}
