//! Data models: configuration, extracted records and result tables.

pub mod config;
pub mod record;
pub mod table;

pub use config::{CdsConfig, ExtractionConfig, OutputConfig, OutputFormat, PdfConfig, TextEngine};
pub use record::{ExtractionResult, Field, FieldValue, ReportingYear, ScoreRange};
pub use table::ResultTable;
