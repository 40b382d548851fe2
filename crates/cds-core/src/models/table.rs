//! Result table: one row per processed document, in processing order.

use std::io::Write;

use serde::Serialize;

use super::record::{ExtractionResult, FILENAME_COLUMN, Field};
use crate::error::ExportError;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Ordered collection of extraction results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultTable {
    rows: Vec<ExtractionResult>,
}

impl ResultTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Column names, filename first.
    pub fn columns() -> Vec<&'static str> {
        std::iter::once(FILENAME_COLUMN)
            .chain(Field::ALL.iter().map(|f| f.name()))
            .collect()
    }

    /// Append a row.
    pub fn push(&mut self, row: ExtractionResult) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ExtractionResult] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExtractionResult> {
        self.rows.iter()
    }

    /// Write the table as CSV (header row included) to `writer`.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record(Self::columns())?;
        for row in &self.rows {
            wtr.write_record(row.to_row())?;
        }

        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Encode the table as a UTF-8 CSV string.
    pub fn to_csv(&self) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        wtr.write_record(Self::columns())?;
        for row in &self.rows {
            wtr.write_record(row.to_row())?;
        }

        let data = String::from_utf8(wtr.into_inner()?)?;
        Ok(data)
    }

    /// Decode a table previously produced by [`ResultTable::to_csv`].
    pub fn from_csv(data: &str) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(data.as_bytes());

        let found: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let expected: Vec<String> = Self::columns().into_iter().map(str::to_string).collect();
        if found != expected {
            return Err(ExportError::Header { expected, found });
        }

        let mut table = Self::new();
        for (index, record) in rdr.records().enumerate() {
            let record = record?;
            let row_number = index + 1;

            let mut row = ExtractionResult::new().with_filename(&record[0]);
            for (column, field) in Field::ALL.into_iter().enumerate() {
                let cell = record.get(column + 1).unwrap_or_default();
                row.set(field, field.parse_cell(row_number, cell)?);
            }
            table.push(row);
        }

        Ok(table)
    }
}

impl FromIterator<ExtractionResult> for ResultTable {
    fn from_iter<I: IntoIterator<Item = ExtractionResult>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ExtractionResult;
    type IntoIter = std::slice::Iter<'a, ExtractionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
