//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header,
//! and maps file extensions to formats for writing.

use crate::{IoError, IoResult};
use std::path::Path;

/// Magic numbers for image format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// PNM formats
    pub const PGM_ASCII: &[u8] = b"P2";
    pub const PPM_ASCII: &[u8] = b"P3";
    pub const PGM_BINARY: &[u8] = b"P5";
    pub const PPM_BINARY: &[u8] = b"P6";
}

/// Supported image file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// Portable Network Graphics
    #[default]
    Png,
    /// Portable graymap / pixmap (P2, P3, P5, P6)
    Pnm,
}

impl ImageFormat {
    /// Format for a file extension (case insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "pnm" | "pgm" | "ppm" => Some(Self::Pnm),
            _ => None,
        }
    }

    /// Format for a path, judged by its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// File extension used when writing this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pnm => "pnm",
        }
    }
}

/// Detect image format from the leading bytes of an encoded image
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.len() >= 8 && data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }

    if [
        magic::PGM_ASCII,
        magic::PPM_ASCII,
        magic::PGM_BINARY,
        magic::PPM_BINARY,
    ]
    .iter()
    .any(|m| data.starts_with(m))
    {
        return Ok(ImageFormat::Pnm);
    }

    Err(IoError::UnsupportedFormat(format!(
        "unrecognized header {:02x?}",
        &data[..data.len().min(8)]
    )))
}
