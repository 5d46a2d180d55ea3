//! # pdfword
//!
//! PDF to Word conversion with Arabic shaping and an OCR fallback for
//! scanned pages.
//!
//! Each page's embedded text layer is used when it has any visible text;
//! otherwise the page is rendered with PDFium and recognized with Tesseract.
//! Either way the text is stripped of XML-unsafe control characters, Arabic
//! letters are reshaped into their joined presentation forms and every line
//! is reordered for display.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfword::convert_to_docx;
//!
//! fn main() -> pdfword::Result<()> {
//!     let report = convert_to_docx("scan.pdf", "scan.docx")?;
//!     println!("{} pages, {} by OCR", report.pages, report.count(pdfword::TextSource::Ocr));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Text layer first**: OCR only runs on pages without extractable text
//! - **Arabic shaping**: contextual forms, LAM-ALEF ligatures, bidi reordering
//! - **In-memory rasterization**: page images never touch the disk
//! - **Atomic output**: `.docx` and edited PDFs are renamed into place
//! - **Session API**: select, view, convert and save edits without a GUI

pub mod detect;
pub mod document;
pub mod error;
pub mod export;
pub mod ocr;
pub mod options;
pub mod raster;
pub mod resolve;
pub mod rewrite;
pub mod session;
pub mod text;
pub mod view;

// Re-export commonly used types
pub use detect::{is_pdf, sniff_bytes, sniff_path, PdfHeader};
pub use document::PdfDocument;
pub use error::{Error, Result};
pub use export::{DocxExporter, ExportOptions, ExportReport, WordDocument};
pub use ocr::{
    EngineMode, OcrEngine, OcrExtractor, OcrOptions, PageSegmentationMode, TesseractEngine,
};
pub use options::{ErrorMode, PageSelection};
pub use raster::{PdfiumRasterizer, RasterOptions, Rasterizer};
pub use resolve::{PageText, PageTextResolver, ResolveOptions, TextSource};
pub use rewrite::{edited_path, PdfRewriter, RewriteOptions};
pub use session::Session;
pub use text::{sanitize, ArabicShaper, ShapingOptions, TextShaper};
pub use view::{PageGallery, PageRenderer, RenderedPage};

use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Resolve every page of a PDF and join the texts, one newline after each
/// page.
///
/// # Example
///
/// ```no_run
/// use pdfword::preview_text;
///
/// let text = preview_text("document.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn preview_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let document = PdfDocument::open(path)?;
    PageTextResolver::with_defaults().preview_text(&document)
}

/// Convert a PDF to a `.docx` with default settings.
///
/// # Example
///
/// ```no_run
/// use pdfword::convert_to_docx;
///
/// convert_to_docx("document.pdf", "document.docx").unwrap();
/// ```
pub fn convert_to_docx<P, Q>(source: P, dest: Q) -> Result<ExportReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let resolver = PageTextResolver::with_defaults();
    DocxExporter::default().export(&resolver, source, dest)
}

/// Write `text` into a new one-page PDF named `<stem>_edited.pdf` beside
/// `original`.
///
/// # Example
///
/// ```no_run
/// use pdfword::save_edited_pdf;
///
/// let path = save_edited_pdf("letter.pdf", "Dear reader,\nThanks.").unwrap();
/// assert!(path.ends_with("letter_edited.pdf"));
/// ```
pub fn save_edited_pdf<P: AsRef<Path>>(original: P, text: &str) -> Result<PathBuf> {
    PdfRewriter::default().save(original, text)
}

/// Builder collecting the settings of every stage.
///
/// # Example
///
/// ```no_run
/// use pdfword::{PageSelection, Pdfword};
///
/// let mut session = Pdfword::new()
///     .lenient()
///     .with_language("ara+eng")
///     .with_font("Amiri")
///     .with_pages(PageSelection::Range(1..=3))
///     .session();
/// session.select("scan.pdf")?;
/// session.convert("scan.docx")?;
/// # Ok::<(), pdfword::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pdfword {
    resolve_options: ResolveOptions,
    ocr_options: OcrOptions,
    raster_options: RasterOptions,
    shaping_options: ShapingOptions,
    export_options: ExportOptions,
    rewrite_options: RewriteOptions,
}

impl Pdfword {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Degrade failing pages to blank instead of aborting.
    pub fn lenient(mut self) -> Self {
        self.resolve_options = self.resolve_options.lenient();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.resolve_options = self.resolve_options.with_pages(pages);
        self
    }

    /// Set the tesseract executable.
    pub fn with_tesseract(mut self, program: impl Into<PathBuf>) -> Self {
        self.ocr_options = self.ocr_options.with_program(program);
        self
    }

    /// Set the OCR language model.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.ocr_options = self.ocr_options.with_language(language);
        self
    }

    /// Set the OCR page segmentation mode.
    pub fn with_psm(mut self, psm: PageSegmentationMode) -> Self {
        self.ocr_options = self.ocr_options.with_psm(psm);
        self
    }

    /// Set the rendering resolution.
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.raster_options = self.raster_options.with_dpi(dpi);
        self
    }

    /// Look for the PDFium library in `dir` first.
    pub fn with_library_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.raster_options = self.raster_options.with_library_dir(dir);
        self
    }

    /// Set shaping options.
    pub fn with_shaping(mut self, options: ShapingOptions) -> Self {
        self.shaping_options = options;
        self
    }

    /// Set the Word document font.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.export_options = self.export_options.with_font(font);
        self
    }

    /// Set rewrite options.
    pub fn with_rewrite_options(mut self, options: RewriteOptions) -> Self {
        self.rewrite_options = options;
        self
    }

    /// Build a resolver over PDFium and tesseract.
    pub fn resolver(&self) -> PageTextResolver {
        self.resolver_with(
            Rc::new(PdfiumRasterizer::new(self.raster_options.clone())),
            Box::new(TesseractEngine::new(self.ocr_options.clone())),
        )
    }

    /// Build a resolver around the given rasterizer and OCR engine.
    pub fn resolver_with(
        &self,
        rasterizer: Rc<dyn Rasterizer>,
        engine: Box<dyn OcrEngine>,
    ) -> PageTextResolver {
        PageTextResolver::new(rasterizer, engine)
            .with_shaper(Box::new(ArabicShaper::with_options(self.shaping_options)))
            .with_options(self.resolve_options.clone())
    }

    /// Build a session over PDFium and tesseract.
    pub fn session(&self) -> Session {
        self.session_with(self.resolver())
    }

    /// Build a session around an existing resolver.
    pub fn session_with(&self, resolver: PageTextResolver) -> Session {
        Session::new(resolver)
            .with_export_options(self.export_options.clone())
            .with_rewrite_options(self.rewrite_options.clone())
    }

    /// The exporter these settings describe.
    pub fn exporter(&self) -> DocxExporter {
        DocxExporter::new(self.export_options.clone())
    }

    /// The rewriter these settings describe.
    pub fn rewriter(&self) -> PdfRewriter {
        PdfRewriter::new(self.rewrite_options.clone())
    }

    /// Build a page renderer over PDFium.
    pub fn renderer(&self) -> PageRenderer {
        PageRenderer::new(Rc::new(PdfiumRasterizer::new(self.raster_options.clone())))
    }
}
