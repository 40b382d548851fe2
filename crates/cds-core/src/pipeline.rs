//! Document pipeline: PDF bytes to text to fields to a table row.
//!
//! Documents are processed one at a time, in the order given. A failure is
//! scoped to its document: it is recorded and the batch continues.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::admissions::{AdmissionsExtractor, CdsParser, RuleSet};
use crate::error::{CdsError, Result};
use crate::models::config::{CdsConfig, PdfConfig};
use crate::models::record::ExtractionResult;
use crate::models::table::ResultTable;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// A document that could not be processed.
#[derive(Debug)]
pub struct DocumentFailure {
    /// Name of the failing document.
    pub filename: String,
    /// Why it failed.
    pub error: CdsError,
}

/// Outcome of processing a batch of documents.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One row per successfully processed document, in input order.
    pub table: ResultTable,
    /// Documents that failed, in input order.
    pub failures: Vec<DocumentFailure>,
}

impl BatchReport {
    /// Total number of documents seen.
    pub fn processed(&self) -> usize {
        self.table.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Record one document's outcome: a row on success, a failure otherwise.
    pub fn record(&mut self, filename: &str, result: Result<ExtractionResult>) {
        match result {
            Ok(row) => self.table.push(row),
            Err(error) => {
                warn!("Failed to process {}: {}", filename, error);
                self.failures.push(DocumentFailure {
                    filename: filename.to_string(),
                    error,
                });
            }
        }
    }
}

/// Text and field extraction for a sequence of documents.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pdf: PdfConfig,
    parser: CdsParser,
}

impl Pipeline {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self {
            pdf: PdfConfig::default(),
            parser: CdsParser::new(),
        }
    }

    /// Create a pipeline from configuration.
    pub fn from_config(config: &CdsConfig) -> Result<Self> {
        Ok(Self {
            pdf: config.pdf.clone(),
            parser: CdsParser::from_config(&config.extraction)?,
        })
    }

    /// Create a pipeline sharing an existing rule set.
    pub fn with_rules(pdf: PdfConfig, rules: Arc<RuleSet>) -> Self {
        Self {
            pdf,
            parser: CdsParser::with_rules(rules),
        }
    }

    /// Extract the full text of one document.
    pub fn extract_text(&self, data: &[u8]) -> Result<String> {
        let mut extractor = PdfExtractor::with_config(self.pdf.clone());
        extractor.load(data)?;
        Ok(extractor.extract_text()?)
    }

    /// Process one document held in memory.
    pub fn process_document(&self, filename: &str, data: &[u8]) -> Result<ExtractionResult> {
        debug!("Processing {} ({} bytes)", filename, data.len());

        let text = self.extract_text(data)?;
        let result = self.parser.extract_fields(&text).with_filename(filename);

        debug!(
            "{}: {} of {} fields found",
            filename,
            result.found_count(),
            self.parser.rules().rules().len()
        );
        Ok(result)
    }

    /// Read and process one document from disk.
    pub fn process_path(&self, path: &Path) -> Result<ExtractionResult> {
        let data = std::fs::read(path)?;
        self.process_document(&display_name(path), &data)
    }

    /// Process documents held in memory, in order.
    pub fn process_batch<I, N, D>(&self, documents: I) -> BatchReport
    where
        I: IntoIterator<Item = (N, D)>,
        N: AsRef<str>,
        D: AsRef<[u8]>,
    {
        let mut report = BatchReport::default();
        for (name, data) in documents {
            let result = self.process_document(name.as_ref(), data.as_ref());
            report.record(name.as_ref(), result);
        }
        log_summary(&report);
        report
    }

    /// Read and process files, in order.
    pub fn process_paths<I, P>(&self, paths: I) -> BatchReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = BatchReport::default();
        for path in paths {
            let path = path.as_ref();
            let result = self.process_path(path);
            report.record(&display_name(path), result);
        }
        log_summary(&report);
        report
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// File name shown in tables and error messages.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Log a one-line batch summary.
pub fn log_summary(report: &BatchReport) {
    info!(
        "Processed {} documents: {} rows, {} failed",
        report.processed(),
        report.table.len(),
        report.failures.len()
    );
}
