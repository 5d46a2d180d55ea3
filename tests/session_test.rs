//! Integration tests for the headless session.

mod common;

use common::{docx_texts, fake_resolver, write_pdf, FakeOcr, FakeRasterizer};
use pdfword::{Error, PageTextResolver, PdfDocument, Pdfword, ResolveOptions, Session};
use std::rc::Rc;

fn session(ocr_text: &str) -> Session {
    let (resolver, _, _) = fake_resolver(ocr_text);
    Pdfword::new().session_with(resolver)
}

#[test]
fn test_actions_disabled_until_selection() {
    let mut session = session("x");
    assert!(!session.actions_enabled());
    assert!(matches!(session.view(), Err(Error::NoDocument)));
    assert!(matches!(session.convert("out.docx"), Err(Error::NoDocument)));
    assert!(matches!(session.save_edits(), Err(Error::NoDocument)));
}

#[test]
fn test_select_seeds_edit_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), "in.pdf", &[Some("Hello"), None]);
    let mut session = session("scanned");

    let preview = session.select(&pdf).unwrap().to_string();

    assert!(session.actions_enabled());
    assert_eq!(session.pdf_path(), Some(pdf.as_path()));
    assert!(preview.contains("Hello"));
    assert!(preview.ends_with("scanned\n"));
    assert_eq!(session.edited_text(), preview);
}

#[test]
fn test_failed_selection_keeps_previous() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), "good.pdf", &[Some("Hello")]);
    let bad = dir.path().join("bad.pdf");
    std::fs::write(&bad, b"GIF89a").unwrap();
    let mut session = session("x");

    session.select(&pdf).unwrap();
    assert!(matches!(session.select(&bad), Err(Error::UnknownFormat)));
    assert_eq!(session.pdf_path(), Some(pdf.as_path()));
}

#[test]
fn test_convert_ignores_edit_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), "in.pdf", &[Some("Original")]);
    let dest = dir.path().join("out.docx");
    let mut session = session("x");

    session.select(&pdf).unwrap();
    session.set_edited_text("Something else entirely");
    session.convert(&dest).unwrap();

    let texts = docx_texts(&dest);
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("Original"));
}

#[test]
fn test_save_edits_writes_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), "in.pdf", &[Some("Original"), Some("Two")]);
    let mut session = session("x");

    session.select(&pdf).unwrap();
    session.set_edited_text("Edited body");
    let path = session.save_edits().unwrap();

    assert_eq!(path, dir.path().join("in_edited.pdf"));
    let edited = PdfDocument::open(&path).unwrap();
    assert_eq!(edited.page_count(), 1);
    assert!(edited.page_text(1).unwrap().contains("Edited body"));
}

#[test]
fn test_view_renders_every_page_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), "in.pdf", &[Some("a"), None, Some("c")]);
    let mut session = session("b");

    session.select(&pdf).unwrap();
    let pages: Vec<u32> = session.view().unwrap().iter().map(|p| p.page).collect();
    assert_eq!(pages, vec![1, 2, 3]);

    // Viewing again replaces rather than appends
    assert_eq!(session.view().unwrap().len(), 3);
}

#[test]
fn test_end_to_end_hello_and_arabic_scan() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), "book.pdf", &[Some("Hello"), None]);
    let dest = dir.path().join("book.docx");
    let mut session = session("\u{0643}\u{062A}\u{0627}\u{0628}");

    session.select(&pdf).unwrap();
    let report = session.convert(&dest).unwrap();

    assert_eq!(report.paragraphs, 2);
    let texts = docx_texts(&dest);
    assert_eq!(texts[0].trim(), "Hello");
    assert_eq!(texts[1], "\u{FE8F}\u{FE8E}\u{FE98}\u{FEDB}");
}

fn session_without_ocr(options: ResolveOptions) -> Session {
    let (engine, _) = FakeOcr::missing();
    let resolver = PageTextResolver::new(Rc::new(FakeRasterizer::default()), Box::new(engine))
        .with_options(options);
    Pdfword::new().session_with(resolver)
}

#[test]
fn test_select_succeeds_when_ocr_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), "mixed.pdf", &[Some("Hello"), None]);
    let mut session = session_without_ocr(ResolveOptions::new());

    let preview = session.select(&pdf).unwrap().to_string();

    assert!(session.actions_enabled());
    assert!(preview.contains("Hello"));
    assert!(preview.ends_with("\n\n"));

    // A strict conversion still reports the OCR failure
    let dest = dir.path().join("mixed.docx");
    assert!(matches!(session.convert(&dest), Err(Error::Ocr(_))));
    assert!(!dest.exists());
}

#[test]
fn test_lenient_convert_without_ocr_keeps_text_pages() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), "mixed.pdf", &[Some("Hello"), None]);
    let dest = dir.path().join("mixed.docx");
    let mut session = session_without_ocr(ResolveOptions::new().lenient());

    session.select(&pdf).unwrap();
    let report = session.convert(&dest).unwrap();

    assert_eq!(report.paragraphs, 1);
    assert_eq!(docx_texts(&dest)[0].trim(), "Hello");
}
