//! The Word document model and its `docx-rs` writer.

use std::io::{Seek, Write};
use std::path::Path;

use docx_rs::{Docx, Paragraph, Run, RunFonts};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::resolve::PageText;

/// Paragraphs to be written, with a single font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDocument {
    font: String,
    paragraphs: Vec<String>,
}

impl WordDocument {
    /// Create an empty document.
    pub fn new(font: impl Into<String>) -> Self {
        Self {
            font: font.into(),
            paragraphs: Vec::new(),
        }
    }

    /// One paragraph per line of every non-blank page, in page order.
    pub fn from_pages(font: impl Into<String>, pages: &[PageText]) -> Self {
        let mut document = Self::new(font);
        for page in pages.iter().filter(|p| !p.is_blank()) {
            document.paragraphs.extend(page.lines().map(str::to_string));
        }
        document
    }

    /// Append a paragraph.
    pub fn push(&mut self, paragraph: impl Into<String>) {
        self.paragraphs.push(paragraph.into());
    }

    /// The font name.
    pub fn font(&self) -> &str {
        &self.font
    }

    /// The paragraphs in order.
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    fn run_fonts(&self) -> RunFonts {
        RunFonts::new()
            .ascii(&self.font)
            .hi_ansi(&self.font)
            .east_asia(&self.font)
            .cs(&self.font)
    }

    /// Build the `docx-rs` document.
    pub fn to_docx(&self) -> Docx {
        self.paragraphs.iter().fold(
            Docx::new().default_fonts(self.run_fonts()),
            |docx, text| {
                let run = Run::new().add_text(text.as_str()).fonts(self.run_fonts());
                docx.add_paragraph(Paragraph::new().add_run(run))
            },
        )
    }

    /// Pack the document into `writer`.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        self.to_docx()
            .build()
            .pack(writer)
            .map_err(|e| Error::Docx(e.to_string()))
    }

    /// Write the document to `path`.
    ///
    /// The file is staged next to `path` and renamed into place once fully
    /// written; on failure `path` is left untouched.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir)?;
        self.write_to(staged.as_file_mut())?;
        staged
            .persist(path)
            .map_err(|e| Error::Docx(format!("Failed to write {}: {}", path.display(), e.error)))?;
        Ok(())
    }
}
