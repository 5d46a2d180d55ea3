//! Word export.
//!
//! [`DocxExporter`] resolves every page of a PDF through a
//! [`PageTextResolver`] and writes the text as paragraphs into a new `.docx`
//! file.
//!
//! # Example
//!
//! ```no_run
//! use pdfword::{DocxExporter, ExportOptions, PageTextResolver};
//!
//! fn main() -> pdfword::Result<()> {
//!     let resolver = PageTextResolver::with_defaults();
//!     let exporter = DocxExporter::new(ExportOptions::new().with_font("Arial"));
//!     let report = exporter.export(&resolver, "scan.pdf", "scan.docx")?;
//!     println!("{} paragraphs", report.paragraphs);
//!     Ok(())
//! }
//! ```

mod docx;

pub use docx::WordDocument;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::document::PdfDocument;
use crate::error::Result;
use crate::resolve::{PageText, PageTextResolver, TextSource};

/// Font used when none is configured.
pub const DEFAULT_FONT: &str = "Arial";

/// Options for [`DocxExporter`].
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Font applied to the default style and to every run
    pub font: String,
}

impl ExportOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font name.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
        }
    }
}

/// Summary of a finished export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    /// Written `.docx` file
    pub path: PathBuf,
    /// Number of pages resolved
    pub pages: usize,
    /// Number of paragraphs written
    pub paragraphs: usize,
    /// Pages per text source
    pub sources: BTreeMap<String, usize>,
}

impl ExportReport {
    fn new(path: PathBuf, pages: &[PageText], paragraphs: usize) -> Self {
        let mut sources = BTreeMap::new();
        for page in pages {
            *sources.entry(source_name(page.source).to_string()).or_insert(0) += 1;
        }
        Self {
            path,
            pages: pages.len(),
            paragraphs,
            sources,
        }
    }

    /// Number of pages that came from the given source.
    pub fn count(&self, source: TextSource) -> usize {
        self.sources.get(source_name(source)).copied().unwrap_or(0)
    }
}

fn source_name(source: TextSource) -> &'static str {
    match source {
        TextSource::TextLayer => "text_layer",
        TextSource::Ocr => "ocr",
        TextSource::Empty => "empty",
        TextSource::Failed => "failed",
    }
}

/// Converts PDFs into Word documents.
#[derive(Debug, Clone, Default)]
pub struct DocxExporter {
    options: ExportOptions,
}

impl DocxExporter {
    /// Create an exporter.
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Current options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Convert the PDF at `source` into a `.docx` at `dest`.
    pub fn export<P, Q>(&self, resolver: &PageTextResolver, source: P, dest: Q) -> Result<ExportReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        self.export_with_progress(resolver, source, dest, |_| {})
    }

    /// Like [`export`](Self::export), calling `on_page` after each page is
    /// resolved.
    pub fn export_with_progress<P, Q, F>(
        &self,
        resolver: &PageTextResolver,
        source: P,
        dest: Q,
        on_page: F,
    ) -> Result<ExportReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        F: FnMut(&PageText),
    {
        let document = PdfDocument::open(source)?;
        self.export_document(resolver, &document, dest, on_page)
    }

    /// Convert an already opened document.
    pub fn export_document<Q, F>(
        &self,
        resolver: &PageTextResolver,
        document: &PdfDocument,
        dest: Q,
        on_page: F,
    ) -> Result<ExportReport>
    where
        Q: AsRef<Path>,
        F: FnMut(&PageText),
    {
        let dest = dest.as_ref();
        let pages = resolver.resolve_each(document, on_page)?;
        let word = WordDocument::from_pages(&self.options.font, &pages);
        word.save(dest)?;

        let report = ExportReport::new(dest.to_path_buf(), &pages, word.paragraphs().len());
        log::info!(
            "Wrote {} paragraphs from {} pages to {}",
            report.paragraphs,
            report.pages,
            dest.display()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font_is_arial() {
        assert_eq!(ExportOptions::default().font, "Arial");
        assert_eq!(ExportOptions::new().with_font("Amiri").font, "Amiri");
    }

    #[test]
    fn test_report_counts_sources() {
        let pages = vec![
            PageText::new(1, "a", TextSource::TextLayer),
            PageText::new(2, "b", TextSource::Ocr),
            PageText::new(3, "c", TextSource::Ocr),
            PageText::failed(4),
        ];
        let report = ExportReport::new(PathBuf::from("out.docx"), &pages, 3);
        assert_eq!(report.pages, 4);
        assert_eq!(report.count(TextSource::Ocr), 2);
        assert_eq!(report.count(TextSource::TextLayer), 1);
        assert_eq!(report.count(TextSource::Failed), 1);
        assert_eq!(report.count(TextSource::Empty), 0);
    }
}
