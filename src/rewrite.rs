//! Writing edited text into a new single-page PDF.
//!
//! This is not PDF editing: the output contains only the given text, set in
//! Helvetica on one blank page. Formatting, images and every other page of
//! the source are discarded.

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Layout of the rewritten page.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteOptions {
    /// Font size in points
    pub font_size: f32,
    /// First baseline, in points from the left and top edges
    pub origin: (f32, f32),
    /// Page width and height in points
    pub page_size: (f32, f32),
    /// Baseline distance as a multiple of the font size
    pub leading: f32,
}

impl RewriteOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the first baseline position.
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_size = (width, height);
        self
    }
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            origin: (72.0, 72.0),
            // A4
            page_size: (595.0, 842.0),
            leading: 1.2,
        }
    }
}

/// Path of the rewritten file: `<dir>/<stem>_edited.pdf`.
pub fn edited_path<P: AsRef<Path>>(original: P) -> PathBuf {
    let original = original.as_ref();
    let stem = original
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    original.with_file_name(format!("{}_edited.pdf", stem))
}

/// Encode text for a built-in Type1 font with WinAnsiEncoding.
///
/// Printable Latin-1 maps to itself, tabs become spaces and anything else
/// becomes `?`.
fn encode_latin1(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| match c {
            '\t' => b' ',
            ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Writes freeform text as a new one-page PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfRewriter {
    options: RewriteOptions,
}

impl PdfRewriter {
    /// Create a rewriter.
    pub fn new(options: RewriteOptions) -> Self {
        Self { options }
    }

    /// Current options.
    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Write `text` to [`edited_path`]`(original)` and return that path.
    ///
    /// The source file itself is never read.
    pub fn save<P: AsRef<Path>>(&self, original: P, text: &str) -> Result<PathBuf> {
        let path = edited_path(original);
        let mut document = self.build(text)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)?;
        document
            .save_to(staged.as_file_mut())
            .map_err(|e| Error::Write(e.to_string()))?;
        staged
            .persist(&path)
            .map_err(|e| Error::Write(format!("Failed to write {}: {}", path.display(), e.error)))?;

        log::info!("Saved edited text to {}", path.display());
        Ok(path)
    }

    /// Build the single-page document.
    pub fn build(&self, text: &str) -> Result<Document> {
        let options = &self.options;
        let (width, height) = options.page_size;
        let (x, top) = options.origin;

        let mut doc = Document::with_version("1.5");
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

        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), options.font_size.into()]),
            Operation::new("TL", vec![(options.font_size * options.leading).into()]),
            Operation::new("Td", vec![x.into(), (height - top).into()]),
        ];
        for (i, line) in text.lines().enumerate() {
            if i > 0 {
                operations.push(Operation::new("T*", vec![]));
            }
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(encode_latin1(line), StringFormat::Literal)],
            ));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations }
            .encode()
            .map_err(|e| Error::Write(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        Ok(doc)
    }
}
