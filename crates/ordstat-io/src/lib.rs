//! ordstat-io - Image I/O for ordstat
//!
//! Decodes images into planar [`Raster`]s for the rank filters and encodes
//! filtered rasters back to disk.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | yes  | yes   | `png-format` |
//! | PNM    | yes  | yes   | `pnm` |
//!
//! The format of an input is detected from its magic number, never from
//! its file name.

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format_from_bytes};

use ordstat_core::Raster;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let data = std::fs::read(path)?;
    read_image_mem(&data)
}

/// Read an image from encoded bytes
pub fn read_image_mem(data: &[u8]) -> IoResult<Raster> {
    let format = detect_format_from_bytes(data)?;
    let cursor = Cursor::new(data);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(cursor),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(cursor),
        #[allow(unreachable_patterns)]
        other => {
            let _ = cursor;
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )))
        }
    }
}

/// Write an image to a file path
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_format(raster, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory
pub fn write_image_mem(raster: &Raster, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(raster, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_format<W: Write>(raster: &Raster, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(raster, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(raster, writer),
        #[allow(unreachable_patterns)]
        other => {
            let _ = (raster, writer);
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )))
        }
    }
}
