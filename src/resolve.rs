//! Per-page text resolution: text layer first, OCR when the page has none.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::document::PdfDocument;
use crate::error::Result;
use crate::ocr::{OcrEngine, OcrExtractor, TesseractEngine};
use crate::options::{ErrorMode, PageSelection};
use crate::raster::{PdfiumRasterizer, RasterOptions, Rasterizer};
use crate::text::{sanitize, shape_or_original, ArabicShaper, TextShaper};

/// Where the text of a page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    /// The page's embedded text layer
    TextLayer,
    /// OCR of the rendered page
    Ocr,
    /// No text layer and OCR found nothing
    Empty,
    /// Resolution failed and the page was skipped (lenient mode)
    Failed,
}

/// Resolved, sanitized and shaped text of one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-indexed)
    pub page: u32,
    /// Display-ready text
    pub text: String,
    /// Origin of the text
    pub source: TextSource,
}

impl PageText {
    /// Create a page text.
    pub fn new(page: u32, text: impl Into<String>, source: TextSource) -> Self {
        Self {
            page,
            text: text.into(),
            source,
        }
    }

    /// Placeholder for a page that could not be resolved.
    pub fn failed(page: u32) -> Self {
        Self::new(page, String::new(), TextSource::Failed)
    }

    /// Whether the page contributes no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Lines of the page, one per output paragraph. Blank pages have none.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        let text = if self.is_blank() { "" } else { self.text.as_str() };
        text.lines()
    }
}

/// Options for [`PageTextResolver`].
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Per-page error handling
    pub error_mode: ErrorMode,
    /// Pages to resolve
    pub pages: PageSelection,
}

impl ResolveOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log per-page failures and continue.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }
}

/// Chooses between the text layer and OCR for each page.
///
/// The decision is purely "is the extracted text blank": any non-whitespace
/// character means the text layer is used and OCR is never invoked.
pub struct PageTextResolver {
    rasterizer: Rc<dyn Rasterizer>,
    ocr: OcrExtractor,
    shaper: Box<dyn TextShaper>,
    options: ResolveOptions,
}

impl PageTextResolver {
    /// Create a resolver with the default [`ArabicShaper`].
    pub fn new(rasterizer: Rc<dyn Rasterizer>, engine: Box<dyn OcrEngine>) -> Self {
        Self {
            rasterizer,
            ocr: OcrExtractor::new(engine),
            shaper: Box::new(ArabicShaper::new()),
            options: ResolveOptions::default(),
        }
    }

    /// Create a resolver backed by PDFium and the `tesseract` executable,
    /// both with default settings. Neither is loaded until a page needs OCR.
    pub fn with_defaults() -> Self {
        Self::new(
            Rc::new(PdfiumRasterizer::new(RasterOptions::default())),
            Box::new(TesseractEngine::default()),
        )
    }

    /// Replace the shaper.
    pub fn with_shaper(mut self, shaper: Box<dyn TextShaper>) -> Self {
        self.shaper = shaper;
        self
    }

    /// Set options.
    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// The rasterizer used for OCR input.
    pub fn rasterizer(&self) -> Rc<dyn Rasterizer> {
        Rc::clone(&self.rasterizer)
    }

    /// Resolve one page.
    ///
    /// In lenient mode a failing page is logged and returned as
    /// [`TextSource::Failed`] instead of an error.
    pub fn resolve_page(&self, document: &PdfDocument, page: u32) -> Result<PageText> {
        self.resolve_page_as(document, page, self.options.error_mode)
    }

    fn resolve_page_as(
        &self,
        document: &PdfDocument,
        page: u32,
        mode: ErrorMode,
    ) -> Result<PageText> {
        match self.try_resolve_page(document, page, mode) {
            Ok(text) => Ok(text),
            Err(e) if mode == ErrorMode::Lenient => {
                log::warn!("Skipping text of page {}: {}", page, e);
                Ok(PageText::failed(page))
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve every selected page in page order.
    pub fn resolve_document(&self, document: &PdfDocument) -> Result<Vec<PageText>> {
        self.resolve_each(document, |_| {})
    }

    /// Like [`resolve_document`](Self::resolve_document), calling `on_page`
    /// after each page.
    pub fn resolve_each<F>(&self, document: &PdfDocument, mut on_page: F) -> Result<Vec<PageText>>
    where
        F: FnMut(&PageText),
    {
        let mut pages = Vec::with_capacity(document.page_count() as usize);
        for page in document.page_numbers() {
            if !self.options.pages.includes(page) {
                continue;
            }
            let text = self.resolve_page(document, page)?;
            on_page(&text);
            pages.push(text);
        }
        Ok(pages)
    }

    /// Text for the editing buffer: every page followed by a newline.
    pub fn preview_text(&self, document: &PdfDocument) -> Result<String> {
        let pages = self.resolve_document(document)?;
        Ok(join_pages(&pages))
    }

    /// Like [`preview_text`](Self::preview_text), but pages that fail are
    /// left blank whatever the error mode.
    pub fn preview_text_lenient(&self, document: &PdfDocument) -> String {
        let pages: Vec<PageText> = document
            .page_numbers()
            .filter(|page| self.options.pages.includes(*page))
            .map(|page| {
                self.resolve_page_as(document, page, ErrorMode::Lenient)
                    .unwrap_or_else(|_| PageText::failed(page))
            })
            .collect();
        join_pages(&pages)
    }

    fn try_resolve_page(
        &self,
        document: &PdfDocument,
        page: u32,
        mode: ErrorMode,
    ) -> Result<PageText> {
        let layer = match document.page_text(page) {
            Ok(text) => text,
            Err(e) if mode == ErrorMode::Lenient => {
                log::warn!("Page {}: text layer unreadable, trying OCR: {}", page, e);
                String::new()
            }
            Err(e) => return Err(e),
        };

        if !layer.trim().is_empty() {
            log::debug!("Page {}: using text layer", page);
            let text = shape_or_original(self.shaper.as_ref(), &sanitize(&layer));
            return Ok(PageText::new(page, text, TextSource::TextLayer));
        }

        log::debug!("Page {}: no text layer, running OCR", page);
        let image = self.rasterizer.rasterize(document, page)?;
        let text = self.ocr.extract(&image, self.shaper.as_ref())?;

        let source = if text.trim().is_empty() {
            TextSource::Empty
        } else {
            TextSource::Ocr
        };
        Ok(PageText::new(page, text, source))
    }
}

fn join_pages(pages: &[PageText]) -> String {
    pages.iter().fold(String::new(), |mut buffer, page| {
        buffer.push_str(&page.text);
        buffer.push('\n');
        buffer
    })
}

impl std::fmt::Debug for PageTextResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageTextResolver")
            .field("ocr", &self.ocr)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
