//! Application state for the four user actions: select, view, convert and
//! save edits.
//!
//! A [`Session`] holds the selected PDF, the editable text buffer and the
//! rendered page gallery. Every action opens the PDF afresh, so the buffer
//! never influences what `convert` writes.

use std::path::{Path, PathBuf};

use crate::detect::sniff_path;
use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::export::{DocxExporter, ExportOptions, ExportReport};
use crate::resolve::PageTextResolver;
use crate::rewrite::{PdfRewriter, RewriteOptions};
use crate::view::{PageGallery, PageRenderer};

/// Headless application session.
#[derive(Debug)]
pub struct Session {
    resolver: PageTextResolver,
    renderer: PageRenderer,
    exporter: DocxExporter,
    rewriter: PdfRewriter,
    pdf_path: Option<PathBuf>,
    edited_text: String,
    gallery: PageGallery,
}

impl Session {
    /// Create a session. The renderer shares the resolver's rasterizer.
    pub fn new(resolver: PageTextResolver) -> Self {
        let renderer = PageRenderer::new(resolver.rasterizer());
        Self {
            resolver,
            renderer,
            exporter: DocxExporter::default(),
            rewriter: PdfRewriter::default(),
            pdf_path: None,
            edited_text: String::new(),
            gallery: PageGallery::new(),
        }
    }

    /// Set export options.
    pub fn with_export_options(mut self, options: ExportOptions) -> Self {
        self.exporter = DocxExporter::new(options);
        self
    }

    /// Set rewrite options.
    pub fn with_rewrite_options(mut self, options: RewriteOptions) -> Self {
        self.rewriter = PdfRewriter::new(options);
        self
    }

    /// Select a PDF and load its text into the edit buffer.
    ///
    /// Pages whose text cannot be resolved are left blank in the buffer and
    /// the selection still succeeds. If the file is not a readable PDF the
    /// previous selection is kept.
    pub fn select<P: AsRef<Path>>(&mut self, path: P) -> Result<&str> {
        let path = path.as_ref();
        sniff_path(path)?;

        let document = PdfDocument::open(path)?;
        let preview = self.resolver.preview_text_lenient(&document);

        log::info!(
            "Selected {} ({} pages)",
            path.display(),
            document.page_count()
        );
        self.pdf_path = Some(path.to_path_buf());
        self.edited_text = preview;
        self.gallery.clear();
        Ok(&self.edited_text)
    }

    /// The selected PDF.
    pub fn pdf_path(&self) -> Option<&Path> {
        self.pdf_path.as_deref()
    }

    /// Whether view, convert and save actions are available.
    pub fn actions_enabled(&self) -> bool {
        self.pdf_path.is_some()
    }

    /// The edit buffer.
    pub fn edited_text(&self) -> &str {
        &self.edited_text
    }

    /// Replace the edit buffer.
    pub fn set_edited_text(&mut self, text: impl Into<String>) {
        self.edited_text = text.into();
    }

    /// Rendered pages from the last [`view`](Self::view).
    pub fn gallery(&self) -> &PageGallery {
        &self.gallery
    }

    /// Render every page of the selected PDF.
    pub fn view(&mut self) -> Result<&PageGallery> {
        let path = self.require_pdf()?;
        let document = PdfDocument::open(path)?;
        self.renderer.render_into(&document, &mut self.gallery)?;
        Ok(&self.gallery)
    }

    /// Convert the selected PDF to a `.docx` at `dest`.
    pub fn convert<P: AsRef<Path>>(&self, dest: P) -> Result<ExportReport> {
        let path = self.require_pdf()?;
        self.exporter.export(&self.resolver, path, dest)
    }

    /// Like [`convert`](Self::convert), reporting each resolved page.
    pub fn convert_with_progress<P, F>(&self, dest: P, on_page: F) -> Result<ExportReport>
    where
        P: AsRef<Path>,
        F: FnMut(&crate::resolve::PageText),
    {
        let path = self.require_pdf()?;
        self.exporter
            .export_with_progress(&self.resolver, path, dest, on_page)
    }

    /// Write the edit buffer to `<stem>_edited.pdf` beside the selected PDF.
    pub fn save_edits(&self) -> Result<PathBuf> {
        let path = self.require_pdf()?;
        self.rewriter.save(path, &self.edited_text)
    }

    fn require_pdf(&self) -> Result<PathBuf> {
        self.pdf_path.clone().ok_or(Error::NoDocument)
    }
}
