//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace};

use super::{PdfProcessor, Result, join_pages};
use crate::error::PdfError;
use crate::models::config::{PdfConfig, TextEngine};

/// PDF text extractor.
pub struct PdfExtractor {
    config: PdfConfig,
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Text from a single PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor with default settings.
    pub fn new() -> Self {
        Self::with_config(PdfConfig::default())
    }

    /// Create a new PDF extractor with the given settings.
    pub fn with_config(config: PdfConfig) -> Self {
        Self {
            config,
            document: None,
            raw_data: Vec::new(),
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))
    }

    /// Extract every page's text, in page order.
    ///
    /// Fails on the first page that yields no text value.
    pub fn extract_pages(&self) -> Result<Vec<PdfPage>> {
        let doc = self.document()?;

        // get_pages is keyed by page number, so iteration follows printed order
        let mut pages = Vec::new();
        for &number in doc.get_pages().keys() {
            let text = page_text(doc, number)?;
            trace!("Page {}: {} chars", number, text.len());
            pages.push(PdfPage { number, text });
        }

        Ok(pages)
    }

    fn extract_stream_text(&self) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(PdfError::TextExtraction("no text in document".to_string()));
        }

        Ok(text)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if !self.config.decrypt_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads raw bytes, so hand it the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        let text = match self.config.engine {
            TextEngine::PerPage => {
                let pages = self.extract_pages()?;
                join_pages(pages.iter().map(|p| p.text.as_str()))
            }
            TextEngine::Stream => self.extract_stream_text()?,
        };

        debug!(
            "Extracted {} chars of text using {:?} engine",
            text.len(),
            self.config.engine
        );
        Ok(text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;

        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        page_text(doc, page)
    }
}

fn page_text(doc: &Document, page: u32) -> Result<String> {
    doc.extract_text(&[page]).map_err(|e| PdfError::PageText {
        page,
        reason: e.to_string(),
    })
}
