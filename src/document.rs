//! Opened PDF documents.
//!
//! A [`PdfDocument`] owns both the parsed lopdf tree (used for text-layer
//! extraction) and the raw file bytes (handed to the rasterizer). It is
//! meant to live for a single operation and is released when dropped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lopdf::{Document as LopdfDocument, ObjectId};

use crate::detect::{sniff_bytes, PdfHeader};
use crate::error::{Error, Result};

/// An opened PDF file.
pub struct PdfDocument {
    doc: LopdfDocument,
    bytes: Vec<u8>,
    pages: BTreeMap<u32, ObjectId>,
    header: PdfHeader,
    path: Option<PathBuf>,
}

impl PdfDocument {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let mut document = Self::from_bytes(bytes)?;
        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    /// Load a PDF held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let header = sniff_bytes(&bytes)?;

        let doc = LopdfDocument::load_mem(&bytes).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text extraction may return garbage");
        }

        let pages = doc.get_pages();
        Ok(Self {
            doc,
            bytes,
            pages,
            header,
            path: None,
        })
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Page numbers (1-indexed) in document order.
    pub fn page_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.keys().copied()
    }

    /// Raw file content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Path the document was opened from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// PDF version from the file header.
    pub fn version(&self) -> &str {
        &self.header.version
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Extract the text layer of a page.
    ///
    /// Returns an empty (or whitespace-only) string for pages without a
    /// text layer, such as scanned images.
    pub fn page_text(&self, page: u32) -> Result<String> {
        self.check_page(page)?;
        self.doc
            .extract_text(&[page])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page, e)))
    }

    /// Whether the page carries a non-blank text layer.
    pub fn has_text_layer(&self, page: u32) -> Result<bool> {
        Ok(!self.page_text(page)?.trim().is_empty())
    }

    /// Page size in points, falling back to Letter when the MediaBox is
    /// missing or malformed.
    pub fn page_size(&self, page: u32) -> Result<(f32, f32)> {
        self.check_page(page)?;
        let page_id = self.pages[&page];

        let media_box = self
            .doc
            .get_dictionary(page_id)
            .ok()
            .and_then(|dict| dict.get(b"MediaBox").ok())
            .and_then(|obj| obj.as_array().ok());

        if let Some(array) = media_box {
            if array.len() >= 4 {
                let coord = |i: usize| array[i].as_float().ok();
                if let (Some(x0), Some(y0), Some(x1), Some(y1)) =
                    (coord(0), coord(1), coord(2), coord(3))
                {
                    return Ok(((x1 - x0).abs(), (y1 - y0).abs()));
                }
            }
        }

        Ok((612.0, 792.0))
    }

    fn check_page(&self, page: u32) -> Result<()> {
        if self.pages.contains_key(&page) {
            Ok(())
        } else {
            Err(Error::PageOutOfRange(page, self.page_count()))
        }
    }
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("path", &self.path)
            .field("version", &self.header.version)
            .field("pages", &self.pages.len())
            .finish()
    }
}

/// Builders for small in-memory PDFs used by unit tests.
#[cfg(test)]
pub(crate) mod testing {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a PDF with one page per entry: `Some(text)` draws the text with
    /// Helvetica, `None` draws only a filled rectangle (no text layer).
    pub(crate) fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for page in pages {
            let operations = match page {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![
                    Operation::new("re", vec![50.into(), 50.into(), 200.into(), 200.into()]),
                    Operation::new("f", vec![]),
                ],
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(Object::from(page_id));
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

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }
}
