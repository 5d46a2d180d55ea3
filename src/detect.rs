//! PDF header sniffing used when a file is selected.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Leading bytes of every PDF file.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Length of a version string such as `1.7`.
const VERSION_LEN: usize = 3;

/// Bytes before the header that readers tolerate.
const HEADER_SEARCH_LEN: usize = 1024;

/// Header information of a PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Read and validate the header of the file at `path`.
///
/// Files shorter than a header are reported as [`Error::UnknownFormat`]
/// rather than an I/O error.
pub fn sniff_path<P: AsRef<Path>>(path: P) -> Result<PdfHeader> {
    let limit = HEADER_SEARCH_LEN + PDF_MAGIC.len() + VERSION_LEN;
    let mut file = File::open(path)?;
    let mut header = Vec::with_capacity(limit);
    file.by_ref().take(limit as u64).read_to_end(&mut header)?;
    sniff_bytes(&header)
}

/// Validate a PDF header held in memory.
///
/// The header may be preceded by up to 1 KiB of other bytes.
pub fn sniff_bytes(data: &[u8]) -> Result<PdfHeader> {
    let window = &data[..data.len().min(HEADER_SEARCH_LEN + PDF_MAGIC.len())];
    let start = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;
    let rest = &data[start + PDF_MAGIC.len()..];
    let version = rest.get(..VERSION_LEN).ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfHeader { version })
}

/// `d.d` where both parts are ASCII digits.
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == VERSION_LEN
        && bytes[0].is_ascii_digit()
        && bytes[1] == b'.'
        && bytes[2].is_ascii_digit()
}

/// Check whether the file at `path` looks like a PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    sniff_path(path).is_ok()
}
