//! Integration tests for writing edited text into a new PDF.

mod common;

use common::write_pdf;
use pdfword::{edited_path, save_edited_pdf, PdfDocument, PdfRewriter, RewriteOptions};
use std::path::PathBuf;

#[test]
fn test_edited_path_rule() {
    assert_eq!(edited_path("x.pdf"), PathBuf::from("x_edited.pdf"));
    assert_eq!(
        edited_path("reports/annual.pdf"),
        PathBuf::from("reports/annual_edited.pdf")
    );
}

#[test]
fn test_five_page_source_yields_one_page() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_pdf(
        dir.path(),
        "five.pdf",
        &[Some("1"), Some("2"), None, Some("4"), None],
    );

    let path = save_edited_pdf(&source, "Replacement text").unwrap();

    let edited = PdfDocument::open(&path).unwrap();
    assert_eq!(edited.page_count(), 1);
    assert!(edited.page_text(1).unwrap().contains("Replacement text"));
    assert!(!edited.page_text(1).unwrap().contains('4'));

    // The source is untouched
    assert_eq!(PdfDocument::open(&source).unwrap().page_count(), 5);
}

#[test]
fn test_page_uses_configured_size() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("letter.pdf");
    let rewriter = PdfRewriter::new(RewriteOptions::new().with_page_size(612.0, 792.0));

    let path = rewriter.save(&source, "Hi").unwrap();

    let edited = PdfDocument::open(path).unwrap();
    assert_eq!(edited.page_size(1).unwrap(), (612.0, 792.0));
}

#[test]
fn test_default_page_is_a4() {
    let dir = tempfile::tempdir().unwrap();
    let path = save_edited_pdf(dir.path().join("a.pdf"), "Hi").unwrap();
    let edited = PdfDocument::open(path).unwrap();
    assert_eq!(edited.page_size(1).unwrap(), (595.0, 842.0));
}

#[test]
fn test_saving_twice_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("doc.pdf");

    save_edited_pdf(&source, "first").unwrap();
    let path = save_edited_pdf(&source, "second").unwrap();

    let text = PdfDocument::open(&path).unwrap().page_text(1).unwrap();
    assert!(text.contains("second"));
    assert!(!text.contains("first"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
