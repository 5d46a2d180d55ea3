//! Shared fixtures and test doubles for integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};

use pdfword::error::{Error, Result};
use pdfword::{OcrEngine, PageTextResolver, PdfDocument, Rasterizer};

/// Build a PDF with one page per entry. `Some(text)` draws the text with
/// Helvetica; `None` draws an unlabelled rectangle, leaving no text layer.
pub fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.7");
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
                Operation::new("Tf", vec!["F1".into(), 18.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
            None => vec![
                Operation::new("re", vec![100.into(), 100.into(), 300.into(), 400.into()]),
                Operation::new("f", vec![]),
            ],
        };
        let content = Content { operations }.encode().unwrap();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
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

/// Write a fixture PDF into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, pages: &[Option<&str>]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_pdf(pages)).unwrap();
    path
}

/// Rasterizer returning a blank image and counting calls.
#[derive(Default)]
pub struct FakeRasterizer {
    pub calls: Cell<usize>,
}

impl Rasterizer for FakeRasterizer {
    fn rasterize(&self, document: &PdfDocument, page: u32) -> Result<DynamicImage> {
        if page == 0 || page > document.page_count() {
            return Err(Error::PageOutOfRange(page, document.page_count()));
        }
        self.calls.set(self.calls.get() + 1);
        Ok(DynamicImage::new_rgb8(32, 32))
    }
}

/// OCR engine returning a fixed result and counting calls.
pub struct FakeOcr {
    text: Option<String>,
    calls: Rc<Cell<usize>>,
}

impl FakeOcr {
    /// Engine that always recognizes `text`.
    pub fn returning(text: &str) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let engine = Self {
            text: Some(text.to_string()),
            calls: Rc::clone(&calls),
        };
        (engine, calls)
    }

    /// Engine that always fails as if tesseract were missing.
    pub fn missing() -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let engine = Self {
            text: None,
            calls: Rc::clone(&calls),
        };
        (engine, calls)
    }
}

impl OcrEngine for FakeOcr {
    fn name(&self) -> &str {
        "fake"
    }

    fn recognize(&self, _image: &DynamicImage) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        self.text
            .clone()
            .ok_or_else(|| Error::Ocr("tesseract not found".to_string()))
    }
}

/// Resolver over the fakes, with the OCR call counter.
pub fn fake_resolver(ocr_text: &str) -> (PageTextResolver, Rc<FakeRasterizer>, Rc<Cell<usize>>) {
    let rasterizer = Rc::new(FakeRasterizer::default());
    let (engine, calls) = FakeOcr::returning(ocr_text);
    let resolver = PageTextResolver::new(rasterizer.clone(), Box::new(engine));
    (resolver, rasterizer, calls)
}

/// Read one part of a `.docx` package as text.
pub fn docx_part(path: &Path, part: &str) -> String {
    use std::io::Read;

    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(part).unwrap();
    let mut xml = String::new();
    entry.read_to_string(&mut xml).unwrap();
    xml
}

/// Texts of all `<w:t>` elements of `word/document.xml`, in order.
pub fn docx_texts(path: &Path) -> Vec<String> {
    let xml = docx_part(path, "word/document.xml");
    let re = regex::Regex::new(r"<w:t(?: [^>]*)?>([^<]*)</w:t>").unwrap();
    re.captures_iter(&xml)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Paths in `dir` with a raster image extension.
pub fn raster_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("png" | "ppm" | "jpg" | "tif")
            )
        })
        .collect()
}
