//! OCR for pages without a text layer.
//!
//! [`OcrEngine`] is the seam to the recognizer; [`TesseractEngine`] drives the
//! `tesseract` executable. [`OcrExtractor`] runs an engine and passes the raw
//! result through the sanitizer and a [`TextShaper`].

mod tesseract;

pub use tesseract::TesseractEngine;

use image::DynamicImage;
use std::path::PathBuf;

use crate::error::Result;
use crate::text::{sanitize, shape_or_original, TextShaper};

/// A text recognizer for page images.
pub trait OcrEngine {
    /// Short engine name used in log messages.
    fn name(&self) -> &str;

    /// Recognize the text in `image`, in logical order.
    fn recognize(&self, image: &DynamicImage) -> Result<String>;
}

/// Tesseract page segmentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSegmentationMode {
    /// Fully automatic page segmentation, but no OSD
    Auto = 3,
    /// Assume a single column of text of variable sizes
    SingleColumn = 4,
    /// Assume a single uniform block of vertically aligned text
    SingleBlockVertical = 5,
    /// Assume a single uniform block of text
    #[default]
    SingleBlock = 6,
    /// Treat the image as a single text line
    SingleLine = 7,
    /// Treat the image as a single word
    SingleWord = 8,
    /// Find as much text as possible in no particular order
    SparseText = 11,
    /// Treat the image as a single text line, bypassing hacks
    RawLine = 13,
}

impl PageSegmentationMode {
    /// Numeric value passed to `--psm`.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Map a `--psm` number to a mode.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            3 => Some(Self::Auto),
            4 => Some(Self::SingleColumn),
            5 => Some(Self::SingleBlockVertical),
            6 => Some(Self::SingleBlock),
            7 => Some(Self::SingleLine),
            8 => Some(Self::SingleWord),
            11 => Some(Self::SparseText),
            13 => Some(Self::RawLine),
            _ => None,
        }
    }
}

/// Tesseract engine mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineMode {
    /// Legacy engine only
    Legacy = 0,
    /// Neural nets LSTM engine only
    Lstm = 1,
    /// Legacy + LSTM engines
    LegacyLstm = 2,
    /// Whatever is available
    #[default]
    Default = 3,
}

impl EngineMode {
    /// Numeric value passed to `--oem`.
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// OCR configuration.
#[derive(Debug, Clone)]
pub struct OcrOptions {
    /// Tesseract executable
    pub program: PathBuf,
    /// Language model(s), e.g. "ara" or "ara+eng"
    pub language: String,
    /// Page segmentation mode
    pub psm: PageSegmentationMode,
    /// Engine mode
    pub oem: EngineMode,
}

impl OcrOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tesseract executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the language model.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the page segmentation mode.
    pub fn with_psm(mut self, psm: PageSegmentationMode) -> Self {
        self.psm = psm;
        self
    }

    /// Set the engine mode.
    pub fn with_oem(mut self, oem: EngineMode) -> Self {
        self.oem = oem;
        self
    }
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            program: PathBuf::from("tesseract"),
            language: "ara".to_string(),
            psm: PageSegmentationMode::default(),
            oem: EngineMode::default(),
        }
    }
}

/// Runs an [`OcrEngine`] and post-processes its output.
pub struct OcrExtractor {
    engine: Box<dyn OcrEngine>,
}

impl OcrExtractor {
    /// Wrap an engine.
    pub fn new(engine: Box<dyn OcrEngine>) -> Self {
        Self { engine }
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &dyn OcrEngine {
        self.engine.as_ref()
    }

    /// Recognize `image` and return sanitized, shaped text.
    pub fn extract(&self, image: &DynamicImage, shaper: &dyn TextShaper) -> Result<String> {
        let raw = self.engine.recognize(image)?;
        log::debug!(
            "{} recognized {} characters",
            self.engine.name(),
            raw.chars().count()
        );
        Ok(shape_or_original(shaper, &sanitize(&raw)))
    }
}

impl std::fmt::Debug for OcrExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrExtractor")
            .field("engine", &self.engine.name())
            .finish()
    }
}
