//! PDFium-backed rasterizer.

use std::cell::OnceCell;

use image::{DynamicImage, RgbaImage};
use pdfium_render::prelude::*;

use super::{RasterOptions, Rasterizer};
use crate::document::PdfDocument;
use crate::error::{Error, Result};

/// Renders pages with PDFium, loaded as a shared library at runtime.
///
/// The library is bound on the first page rendered, so documents whose
/// pages all carry a text layer never need it. A failed binding is retried
/// on the next page.
pub struct PdfiumRasterizer {
    pdfium: OnceCell<Pdfium>,
    options: RasterOptions,
}

impl PdfiumRasterizer {
    /// Create a rasterizer.
    ///
    /// Search order when binding: `options.library_dir`, the executable's
    /// directory, the current directory, then the system library paths.
    pub fn new(options: RasterOptions) -> Self {
        Self {
            pdfium: OnceCell::new(),
            options,
        }
    }

    /// Current options.
    pub fn options(&self) -> &RasterOptions {
        &self.options
    }

    /// Whether PDFium has been loaded.
    pub fn is_bound(&self) -> bool {
        self.pdfium.get().is_some()
    }

    fn pdfium(&self) -> Result<&Pdfium> {
        if let Some(pdfium) = self.pdfium.get() {
            return Ok(pdfium);
        }
        let pdfium = Pdfium::new(bind_pdfium(&self.options)?);
        Ok(self.pdfium.get_or_init(|| pdfium))
    }
}

impl std::fmt::Debug for PdfiumRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfiumRasterizer")
            .field("bound", &self.is_bound())
            .field("options", &self.options)
            .finish()
    }
}

fn bind_pdfium(options: &RasterOptions) -> Result<Box<dyn PdfiumLibraryBindings>> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));

    let candidates = options.library_dir.iter().chain(exe_dir.iter());
    for dir in candidates {
        if let Ok(bindings) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
        {
            log::debug!("Bound PDFium from {}", dir.display());
            return Ok(bindings);
        }
    }

    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Raster(format!("Failed to load PDFium: {}", e)))
}

impl Rasterizer for PdfiumRasterizer {
    fn rasterize(&self, document: &PdfDocument, page: u32) -> Result<DynamicImage> {
        if page == 0 || page > document.page_count() {
            return Err(Error::PageOutOfRange(page, document.page_count()));
        }
        let index = u16::try_from(page - 1)
            .map_err(|_| Error::Raster(format!("Page {} exceeds PDFium's page index", page)))?;

        let pdf = self.pdfium()?.load_pdf_from_byte_slice(document.bytes(), None)?;
        let pages = pdf.pages();
        let pdf_page = pages.get(index)?;

        let (width, height) = self
            .options
            .pixel_size(pdf_page.width().value, pdf_page.height().value);
        let config = PdfRenderConfig::new()
            .set_target_width(width as i32)
            .set_maximum_height(height as i32);

        let bitmap = pdf_page.render_with_config(&config)?;
        let (bitmap_width, bitmap_height) = (bitmap.width() as u32, bitmap.height() as u32);
        let rgba = bitmap.as_rgba_bytes().to_vec();

        let image = RgbaImage::from_raw(bitmap_width, bitmap_height, rgba).ok_or_else(|| {
            Error::Raster(format!(
                "Page {}: bitmap does not match {}x{}",
                page, bitmap_width, bitmap_height
            ))
        })?;

        log::debug!(
            "Rasterized page {} at {}x{} ({} dpi)",
            page,
            bitmap_width,
            bitmap_height,
            self.options.dpi
        );
        Ok(DynamicImage::ImageRgba8(image))
    }
}
