//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII, P5 binary) and PPM (P3 ASCII, P6 binary) with a
//! maxval of at most 255. Samples are stored as read, without rescaling
//! to 255. Writing produces P5 for gray and gray+alpha rasters and P6
//! for RGB and RGBA rasters; alpha is dropped.
//!
//! PBM (P1/P4) and PAM (P7) are not supported.

use crate::{IoError, IoResult};
use log::debug;
use ordstat_core::{ChannelLayout, Raster};
use std::io::{BufRead, Write};

/// Read a PNM image (P2/P3/P5/P6) from a reader.
///
/// # Arguments
/// * `reader` - A buffered reader positioned at the magic number
///
/// # Returns
/// A 1-channel raster for PGM, a 3-channel raster for PPM.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Raster> {
    let magic = read_token(&mut reader)?;
    let (channels, binary) = match magic.as_str() {
        "P2" => (1, false),
        "P3" => (3, false),
        "P5" => (1, true),
        "P6" => (3, true),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM magic: {}",
                other
            )));
        }
    };

    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let maxval = read_number(&mut reader, "maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM maxval {} (only 1..=255 supported)",
            maxval
        )));
    }
    debug!("pnm: {} {}x{} maxval {}", magic, width, height, maxval);

    let count = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            IoError::InvalidData(format!("PNM dimensions {}x{} too large", width, height))
        })?;

    // Sample buffers grow with the data actually present, so a header
    // promising more than the stream holds fails as truncated
    let samples = if binary {
        read_binary_samples(&mut reader, count)?
    } else {
        let mut samples = Vec::new();
        for _ in 0..count {
            let v = read_number(&mut reader, "sample")?;
            let sample = u8::try_from(v)
                .ok()
                .filter(|&s| s as usize <= maxval)
                .ok_or_else(|| IoError::InvalidData(format!("sample {} exceeds maxval", v)))?;
            samples.push(sample);
        }
        samples
    };

    Ok(Raster::from_interleaved(width, height, channels, &samples)?)
}

/// Write a raster as binary PNM to a writer.
///
/// Chooses P5 (gray, gray+alpha) or P6 (RGB, RGBA) based on the layout.
pub fn write_pnm<W: Write>(raster: &Raster, mut writer: W) -> IoResult<()> {
    let (magic, channels) = match raster.layout() {
        ChannelLayout::Gray | ChannelLayout::GrayAlpha => ("P5", 1),
        ChannelLayout::Rgb | ChannelLayout::Rgba => ("P6", 3),
    };

    write!(
        writer,
        "{}\n{} {}\n255\n",
        magic,
        raster.width(),
        raster.height()
    )?;

    writer.write_all(&raster.interleave_channels(channels))?;
    writer.flush()?;
    Ok(())
}

/// Read exactly `count` raw samples.
fn read_binary_samples<R: BufRead>(reader: &mut R, count: usize) -> IoResult<Vec<u8>> {
    let mut samples = Vec::new();
    while samples.len() < count {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Err(IoError::InvalidData("truncated PNM data".to_string()));
        }
        let take = available.len().min(count - samples.len());
        samples.extend_from_slice(&available[..take]);
        reader.consume(take);
    }
    Ok(samples)
}

/// Read one whitespace-delimited header token, skipping `#` comments.
///
/// Consumes the single whitespace byte that ends the token, which for the
/// maxval field is the separator before binary sample data.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte)? {
            0 if token.is_empty() => {
                return Err(IoError::InvalidData("truncated PNM header".to_string()));
            }
            0 => break,
            _ => {}
        }
        match byte[0] {
            b'#' if token.is_empty() => {
                let mut comment = Vec::new();
                reader.read_until(b'\n', &mut comment)?;
            }
            b if b.is_ascii_whitespace() => {
                if !token.is_empty() {
                    break;
                }
            }
            b => token.push(b),
        }
    }
    String::from_utf8(token).map_err(|_| IoError::InvalidData("non-ASCII PNM header".to_string()))
}

fn read_number<R: BufRead>(reader: &mut R, field: &str) -> IoResult<usize> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("bad PNM {}: {:?}", field, token)))
}
