//! Page rasterization.
//!
//! Pages are rendered straight into [`image::DynamicImage`] buffers. Nothing
//! is written to disk: the same buffer feeds OCR and on-screen display.

mod pdfium;

pub use pdfium::PdfiumRasterizer;

use image::DynamicImage;
use std::path::PathBuf;

use crate::document::PdfDocument;
use crate::error::Result;

/// Points per inch in PDF user space.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Renders PDF pages to pixel images.
pub trait Rasterizer {
    /// Render `page` (1-indexed) of `document`.
    fn rasterize(&self, document: &PdfDocument, page: u32) -> Result<DynamicImage>;
}

/// Rasterization settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Output resolution in dots per inch
    pub dpi: f32,
    /// Directory holding the PDFium shared library; system paths when `None`
    pub library_dir: Option<PathBuf>,
}

impl RasterOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output resolution. Values are clamped to 18..=1200.
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi.clamp(18.0, 1200.0);
        self
    }

    /// Look for the PDFium library in `dir` before the system paths.
    pub fn with_library_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.library_dir = Some(dir.into());
        self
    }

    /// Pixel scale relative to one pixel per point.
    pub fn scale(&self) -> f32 {
        self.dpi / POINTS_PER_INCH
    }

    /// Pixel dimensions of a page of `width` x `height` points.
    pub fn pixel_size(&self, width: f32, height: f32) -> (u32, u32) {
        let scale = self.scale();
        let px = |points: f32| ((points * scale).round() as u32).max(1);
        (px(width), px(height))
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            dpi: POINTS_PER_INCH,
            library_dir: None,
        }
    }
}
