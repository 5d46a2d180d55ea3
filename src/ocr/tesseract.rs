//! Tesseract driven through its command-line interface.
//!
//! The page image is PNG-encoded in memory and piped to `tesseract stdin
//! stdout`, so no image file is ever written to disk.

use std::io::{Cursor, ErrorKind, Write};
use std::process::{Command, Stdio};

use image::{DynamicImage, ImageFormat};

use super::{OcrEngine, OcrOptions};
use crate::error::{Error, Result};

/// OCR engine backed by the `tesseract` executable.
#[derive(Debug, Clone, Default)]
pub struct TesseractEngine {
    options: OcrOptions,
}

impl TesseractEngine {
    /// Create an engine with the given options.
    pub fn new(options: OcrOptions) -> Self {
        Self { options }
    }

    /// Current options.
    pub fn options(&self) -> &OcrOptions {
        &self.options
    }

    /// Check whether the executable can be started.
    pub fn is_available(&self) -> bool {
        Command::new(&self.options.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Arguments following the executable name.
    fn args(&self) -> Vec<String> {
        vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.options.language.clone(),
            "--oem".to_string(),
            self.options.oem.value().to_string(),
            "--psm".to_string(),
            self.options.psm.value().to_string(),
        ]
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| Error::Ocr(format!("Failed to encode page image: {}", e)))?;

        let mut child = Command::new(&self.options.program)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::Ocr(format!(
                    "{} not found; install Tesseract or pass its path",
                    self.options.program.display()
                )),
                _ => Error::Ocr(format!("Failed to run tesseract: {}", e)),
            })?;

        // A tesseract that exits early closes its stdin; its stderr says why.
        let sent = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&png),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Ocr(format!("Failed to read tesseract output: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Ocr(format!("Tesseract failed: {}", stderr.trim())));
        }
        sent.map_err(|e| Error::Ocr(format!("Failed to send image to tesseract: {}", e)))?;

        String::from_utf8(output.stdout)
            .map_err(|e| Error::Ocr(format!("Tesseract produced invalid UTF-8: {}", e)))
    }
}
