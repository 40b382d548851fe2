//! Error types for the cds-core library.

use thiserror::Error;

/// Main error type for the cds library.
#[derive(Error, Debug)]
pub enum CdsError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Table export or import error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
///
/// Every variant is scoped to a single document: a batch records the failure
/// and moves on to the next file.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// A page produced no text value at all.
    #[error("failed to extract text from page {page}: {reason}")]
    PageText { page: u32, reason: String },

    /// The whole-document text engine failed.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to writing or reading result tables.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Encoded output was not valid UTF-8.
    #[error("output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The header row does not match the table columns.
    #[error("unexpected header: expected {expected:?}, found {found:?}")]
    Header {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A cell could not be decoded into its column's value type.
    #[error("invalid value in row {row}, column {column}: {value:?}")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for ExportError {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        ExportError::Csv(csv::Error::from(err.into_error()))
    }
}

/// Result type for the cds library.
pub type Result<T> = std::result::Result<T, CdsError>;
