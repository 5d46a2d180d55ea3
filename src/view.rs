//! Page images for display.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::{DynamicImage, ImageFormat};

use crate::document::PdfDocument;
use crate::error::Result;
use crate::raster::Rasterizer;

/// One rendered page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Page number (1-indexed)
    pub page: u32,
    /// Rendered pixels
    pub image: DynamicImage,
}

/// The set of page images currently on display.
#[derive(Debug, Clone, Default)]
pub struct PageGallery {
    pages: Vec<RenderedPage>,
}

impl PageGallery {
    /// Create an empty gallery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every page.
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    /// Append a page.
    pub fn push(&mut self, page: RenderedPage) {
        self.pages.push(page);
    }

    /// Pages in display order.
    pub fn iter(&self) -> impl Iterator<Item = &RenderedPage> {
        self.pages.iter()
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if the gallery is empty.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Write every page to `dir` as `page-<n>.png`, returning the paths.
    pub fn save_png_dir<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        self.pages
            .iter()
            .map(|rendered| -> Result<PathBuf> {
                let path = dir.join(format!("page-{}.png", rendered.page));
                rendered.image.save_with_format(&path, ImageFormat::Png)?;
                Ok(path)
            })
            .collect()
    }
}

/// Renders all pages of a document into a [`PageGallery`].
pub struct PageRenderer {
    rasterizer: Rc<dyn Rasterizer>,
}

impl PageRenderer {
    /// Create a renderer.
    pub fn new(rasterizer: Rc<dyn Rasterizer>) -> Self {
        Self { rasterizer }
    }

    /// Replace the gallery's content with every page of `document`, in
    /// order. A failure leaves the pages rendered so far in the gallery.
    pub fn render_into(&self, document: &PdfDocument, gallery: &mut PageGallery) -> Result<()> {
        gallery.clear();
        for page in document.page_numbers() {
            let image = self.rasterizer.rasterize(document, page)?;
            gallery.push(RenderedPage { page, image });
        }
        log::info!("Rendered {} pages", gallery.len());
        Ok(())
    }
}

impl std::fmt::Debug for PageRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRenderer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::testing::build_pdf;

    struct SizedRasterizer;

    impl Rasterizer for SizedRasterizer {
        fn rasterize(&self, _document: &PdfDocument, page: u32) -> Result<DynamicImage> {
            Ok(DynamicImage::new_rgb8(page, 1))
        }
    }

    #[test]
    fn test_render_into_replaces_previous_pages() {
        let renderer = PageRenderer::new(Rc::new(SizedRasterizer));
        let mut gallery = PageGallery::new();
        gallery.push(RenderedPage {
            page: 99,
            image: DynamicImage::new_rgb8(1, 1),
        });

        let doc = PdfDocument::from_bytes(build_pdf(&[None, Some("x"), None])).unwrap();
        renderer.render_into(&doc, &mut gallery).unwrap();

        let pages: Vec<_> = gallery.iter().map(|p| (p.page, p.image.width())).collect();
        assert_eq!(pages, vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_save_png_dir_names_by_page() {
        let dir = tempfile::tempdir().unwrap();
        let mut gallery = PageGallery::new();
        for page in 1..=2 {
            gallery.push(RenderedPage {
                page,
                image: DynamicImage::new_rgb8(4, 4),
            });
        }

        let paths = gallery.save_png_dir(dir.path().join("out")).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("page-1.png"));
        assert!(paths[1].ends_with("page-2.png"));
        assert!(paths.iter().all(|p| p.exists()));
    }
}
