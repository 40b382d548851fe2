//! Builds small text PDFs in memory for tests.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Build a PDF with one page per entry; each page shows its lines top to bottom.
pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    build(pages, None)
}

/// Like [`build_pdf`], but page `broken` (1-indexed) names a font resource that
/// is not a font dictionary, so its text cannot be decoded.
pub fn build_pdf_with_unreadable_page(pages: &[&[&str]], broken: u32) -> Vec<u8> {
    build(pages, Some(broken))
}

fn build(pages: &[&[&str]], broken: Option<u32>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let not_a_font_id = doc.add_object(dictionary! {
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let broken_resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => not_a_font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for (index, lines) in pages.iter().enumerate() {
        let number = index as u32 + 1;
        let resources = if broken == Some(number) {
            broken_resources_id
        } else {
            resources_id
        };

        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 800 - 14 * i as i64;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
            operations.push(Operation::new("Td", vec![40.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).unwrap();
    data
}

/// A one-page report carrying every recognized field.
pub fn complete_report() -> Vec<u8> {
    build_pdf(&[&[
        "Common Data Set 2022-2023",
        "Institution: Example University",
        "SAT Evidence-Based Reading and Writing 700 to 760",
        "ACT Composite 32 to 35",
        "Average GPA 3.92",
        "TOEFL (Internet-based) 100 to 110",
    ]])
}
