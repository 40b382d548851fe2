//! End-to-end tests over real PDF bytes.

mod common;

use cds_core::models::config::{PdfConfig, TextEngine};
use cds_core::pdf::join_pages;
use cds_core::{
    CdsError, Field, PdfError, PdfExtractor, PdfProcessor, Pipeline, ResultTable, RuleSet,
};
use pretty_assertions::assert_eq;

use common::{build_pdf, build_pdf_with_unreadable_page, complete_report};

#[test]
fn text_is_pages_joined_in_order() {
    let data = build_pdf(&[&["Page one"], &["Page two"], &["Page three"]]);

    let mut extractor = PdfExtractor::new();
    extractor.load(&data).unwrap();
    assert_eq!(extractor.page_count(), 3);

    let pages: Vec<String> = (1..=3)
        .map(|n| extractor.extract_page_text(n).unwrap())
        .collect();
    assert!(pages[0].contains("Page one"));
    assert!(pages[1].contains("Page two"));
    assert!(pages[2].contains("Page three"));

    let text = extractor.extract_text().unwrap();
    assert_eq!(text, join_pages(&pages));
    assert!(text.find("Page one").unwrap() < text.find("Page three").unwrap());
}

#[test]
fn extract_pages_numbers_from_one() {
    let data = build_pdf(&[&["alpha"], &["beta"]]);
    let mut extractor = PdfExtractor::new();
    extractor.load(&data).unwrap();

    let numbers: Vec<u32> = extractor
        .extract_pages()
        .unwrap()
        .iter()
        .map(|p| p.number)
        .collect();
    assert_eq!(numbers, vec![1, 2]);
    assert!(matches!(
        extractor.extract_page_text(3),
        Err(PdfError::InvalidPage(3))
    ));
}

#[test]
fn complete_report_fills_every_column() {
    let row = Pipeline::new()
        .process_document("example_cds.pdf", &complete_report())
        .unwrap();

    assert_eq!(
        row.to_row(),
        vec![
            "example_cds.pdf",
            "Example University",
            "100-110",
            "700-760",
            "32-35",
            "3.92",
            "2022-2023",
        ]
    );
}

#[test]
fn fields_split_across_pages_are_found() {
    let data = build_pdf(&[
        &["Common Data Set 2023-2024", "Institution: Split College"],
        &["ACT Composite 28 to 33"],
    ]);
    let row = Pipeline::new().process_document("split.pdf", &data).unwrap();

    assert_eq!(row.cell(Field::University), "Split College");
    assert_eq!(row.cell(Field::Act), "28-33");
    assert_eq!(row.cell(Field::Sat), "N/A");
    assert_eq!(row.cell(Field::Year), "2023-2024");
}

#[test]
fn malformed_document_does_not_stop_batch() {
    let good = complete_report();
    let bad = b"%PDF-1.4 this is not really a pdf".to_vec();

    let report = Pipeline::new().process_batch([("good.pdf", good), ("bad.pdf", bad)]);

    assert_eq!(report.table.len(), 1);
    assert_eq!(report.table.rows()[0].filename, "good.pdf");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].filename, "bad.pdf");
    assert!(matches!(report.failures[0].error, CdsError::Pdf(_)));
    assert!(report.failures[0].error.to_string().contains("PDF"));
}

#[test]
fn failure_first_still_processes_later_documents() {
    let report = Pipeline::new().process_batch([
        ("bad.pdf", b"garbage".to_vec()),
        ("good.pdf", complete_report()),
    ]);

    assert_eq!(report.processed(), 2);
    assert_eq!(report.table.len(), 1);
    assert_eq!(report.table.rows()[0].filename, "good.pdf");
}

#[test]
fn rows_follow_input_order() {
    let a = build_pdf(&[&["Institution: Alpha"]]);
    let b = build_pdf(&[&["Institution: Beta"]]);
    let c = complete_report();

    let report = Pipeline::new().process_batch([("a.pdf", a), ("b.pdf", b), ("c.pdf", c)]);
    let names: Vec<&str> = report.table.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);
}

#[test]
fn exported_csv_decodes_to_same_table() {
    let empty = build_pdf(&[&["No statistics in this file"]]);
    let report = Pipeline::new().process_batch([
        ("full.pdf", complete_report()),
        ("empty.pdf", empty),
    ]);

    let csv = report.table.to_csv().unwrap();
    let decoded = ResultTable::from_csv(&csv).unwrap();

    assert_eq!(decoded.len(), report.table.len());
    assert_eq!(decoded, report.table);
    assert_eq!(decoded.rows()[1].cell(Field::University), "Unknown");
}

#[test]
fn files_on_disk_are_processed_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.pdf");
    let bad = dir.path().join("bad.pdf");
    std::fs::write(&good, complete_report()).unwrap();
    std::fs::write(&bad, b"nope").unwrap();

    let pipeline = Pipeline::with_rules(PdfConfig::default(), RuleSet::standard());
    let report = pipeline.process_paths([&bad, &good]);

    assert_eq!(report.table.len(), 1);
    assert_eq!(report.table.rows()[0].filename, "good.pdf");
    assert_eq!(report.failures[0].filename, "bad.pdf");
}

#[test]
fn unreadable_page_fails_whole_document() {
    let data = build_pdf_with_unreadable_page(
        &[&["Institution: Half Read College"], &["ACT Composite 30 to 34"]],
        2,
    );

    let mut extractor = PdfExtractor::new();
    extractor.load(&data).unwrap();
    assert!(extractor.extract_page_text(1).unwrap().contains("Half Read College"));
    assert!(matches!(
        extractor.extract_page_text(2),
        Err(PdfError::PageText { page: 2, .. })
    ));
    assert!(matches!(
        extractor.extract_text(),
        Err(PdfError::PageText { page: 2, .. })
    ));

    let report = Pipeline::new().process_batch([
        ("partial.pdf", data),
        ("good.pdf", complete_report()),
    ]);
    assert_eq!(report.table.len(), 1);
    assert_eq!(report.table.rows()[0].filename, "good.pdf");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].filename, "partial.pdf");
    assert!(matches!(
        report.failures[0].error,
        CdsError::Pdf(PdfError::PageText { page: 2, .. })
    ));
}

fn stream_pipeline() -> Pipeline {
    let pdf = PdfConfig {
        engine: TextEngine::Stream,
        ..PdfConfig::default()
    };
    Pipeline::with_rules(pdf, RuleSet::standard())
}

#[test]
fn stream_engine_reads_whole_document() {
    let pipeline = stream_pipeline();

    let text = pipeline.extract_text(&complete_report()).unwrap();
    assert!(text.contains("Example University"));

    let row = pipeline
        .process_document("stream.pdf", &complete_report())
        .unwrap();
    assert_eq!(row.cell(Field::Act), "32-35");
}

#[test]
fn stream_engine_rejects_document_without_text() {
    let blank: &[&str] = &[];
    let data = build_pdf(&[blank]);

    let err = stream_pipeline().extract_text(&data).unwrap_err();
    assert!(matches!(err, CdsError::Pdf(PdfError::TextExtraction(_))));

    let report = stream_pipeline().process_batch([("blank.pdf", data)]);
    assert!(report.table.is_empty());
    assert_eq!(report.failures.len(), 1);
}
