//! Core library for extracting admissions statistics from Common Data Set reports.
//!
//! This crate provides:
//! - PDF text extraction (page by page, in printed order)
//! - Rule-based field extraction (institution, TOEFL, SAT, ACT, GPA, reporting year)
//! - Result tables with CSV and JSON export
//! - A document-scoped batch pipeline tying the pieces together

pub mod admissions;
pub mod error;
pub mod models;
pub mod pdf;
pub mod pipeline;

pub use admissions::{AdmissionsExtractor, CdsParser, FieldRule, RuleSet};
pub use error::{CdsError, ExportError, PdfError, Result};
pub use models::config::CdsConfig;
pub use models::record::{ExtractionResult, Field, FieldValue, ReportingYear, ScoreRange};
pub use models::table::ResultTable;
pub use pdf::{PdfExtractor, PdfProcessor, extract_text};
pub use pipeline::{BatchReport, DocumentFailure, Pipeline};
