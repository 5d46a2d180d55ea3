//! Error types for pdfword library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfword operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, converting or rewriting PDFs.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting the text layer of a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// The rendering engine could not be loaded or failed to rasterize a page.
    #[error("Rasterization error: {0}")]
    Raster(String),

    /// The OCR engine is unavailable or failed.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// Reshaping or bidi reordering failed.
    #[error("Shaping error: {0}")]
    Shaping(String),

    /// Error producing the Word document.
    #[error("Word document error: {0}")]
    Docx(String),

    /// Error serializing a PDF.
    #[error("PDF write error: {0}")]
    Write(String),

    /// An action needs a selected document and none is selected.
    #[error("No PDF selected")]
    NoDocument,

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<pdfium_render::prelude::PdfiumError> for Error {
    fn from(err: pdfium_render::prelude::PdfiumError) -> Self {
        Error::Raster(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Raster(err.to_string())
    }
}
