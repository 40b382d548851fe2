//! Integration tests for the cds binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use predicates::prelude::*;
use tempfile::TempDir;

use cds_core::{Field, ResultTable};

/// One-page PDF showing `lines` top to bottom.
fn write_pdf(path: &Path, lines: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut operations = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
        operations.push(Operation::new("Td", vec![40.into(), (800 - 14 * i as i64).into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("ET", vec![]));
    }
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        Content { operations }.encode().unwrap(),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

struct Fixture {
    dir: TempDir,
    config: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, "{}").unwrap();

        write_pdf(
            &dir.path().join("good.pdf"),
            &[
                "Common Data Set 2022-2023",
                "Institution: Example University",
                "SAT ERW 700 to 760",
                "ACT Composite 32 to 35",
                "Average GPA 3.92",
                "TOEFL (Internet-based) 100 to 110",
            ],
        );
        std::fs::write(dir.path().join("bad.pdf"), b"%PDF-1.4 broken").unwrap();

        Self { dir, config }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cds").unwrap();
        cmd.arg("--config").arg(&self.config);
        cmd
    }
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("cds")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn extract_reports_bad_file_and_keeps_good_row() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["extract", "-f", "csv"])
        .arg(fx.path("good.pdf"))
        .arg(fx.path("bad.pdf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Filename,University,TOEFL,SAT,ACT,GPA,Year"))
        .stdout(predicate::str::contains(
            "good.pdf,Example University,100-110,700-760,32-35,3.92,2022-2023",
        ))
        .stdout(predicate::str::contains("bad.pdf").not())
        .stderr(predicate::str::contains("bad.pdf"));
}

#[test]
fn strict_mode_fails_on_bad_file() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["extract", "--strict", "-f", "json"])
        .arg(fx.path("bad.pdf"))
        .arg(fx.path("good.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 documents failed"));
}

#[test]
fn output_file_round_trips() {
    let fx = Fixture::new();
    let out = fx.path("table.csv");

    fx.cmd()
        .arg("extract")
        .arg(fx.path("good.pdf"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved 1 rows"));

    let table = ResultTable::from_csv(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].cell(Field::Gpa), "3.92");
}

#[test]
fn glob_input_without_matches_fails() {
    let fx = Fixture::new();
    let pattern = format!("{}/*.nothing", fx.dir.path().display());

    fx.cmd()
        .args(["extract", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No PDF files found"));
}

#[test]
fn glob_input_processes_matching_pdfs() {
    let fx = Fixture::new();
    let pattern = format!("{}/*.pdf", fx.dir.path().display());

    fx.cmd()
        .args(["extract", "-f", "json", &pattern])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"University\": \"Example University\""));
}

#[test]
fn text_command_prints_document_text() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("text")
        .arg(fx.path("good.pdf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Institution: Example University"));
}

#[test]
fn config_set_then_get() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["config", "set", "extraction.span_lines", "true"])
        .assert()
        .success();

    fx.cmd()
        .args(["config", "get", "extraction.span_lines"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["config", "set", "pdf.colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    fx.cmd()
        .args(["config", "init", "--force"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(&fx.config).unwrap();
    assert!(saved.contains("university_admissions_data.csv"));
}
