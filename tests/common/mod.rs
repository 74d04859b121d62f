//! Synthetic PDF builder shared by integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

const PAGE_HEIGHT: i64 = 792;

/// One line of text to place on a page.
pub struct Line {
    pub text: &'static str,
    pub size: i64,
    pub bold: bool,
    /// Distance from the top of the page to the baseline
    pub top: i64,
}

pub fn line(text: &'static str, size: i64, top: i64) -> Line {
    Line {
        text,
        size,
        bold: false,
        top,
    }
}

pub fn bold(text: &'static str, size: i64, top: i64) -> Line {
    Line {
        text,
        size,
        bold: true,
        top,
    }
}

/// Build a PDF with one page per entry of `pages`, in Helvetica and
/// Helvetica-Bold.
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for l in lines {
            let font: &[u8] = if l.bold { b"F2" } else { b"F1" };
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(font.to_vec()), Object::Integer(l.size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Integer(72), Object::Integer(PAGE_HEIGHT - l.top)],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(l.text)]));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(PAGE_HEIGHT),
            ],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A two-page proposal with a title and numbered sections.
pub fn proposal_pdf() -> Vec<u8> {
    build_pdf(&[
        vec![
            bold("Project Proposal", 24, 60),
            line("1 Introduction", 14, 150),
            line("This proposal describes the work.", 11, 180),
        ],
        vec![
            line("1.1 Background", 12, 80),
            line("Earlier efforts focused on tooling.", 11, 110),
        ],
    ])
}
