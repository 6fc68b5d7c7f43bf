//! PNG image format support
//!
//! Decoding expands palettes and sub-byte grayscale to 8-bit samples and
//! strips 16-bit samples to their high byte, so every PNG lands in a
//! 1-4 channel 8-bit [`Raster`]. Encoding always writes 8-bit samples.

use crate::{IoError, IoResult};
use log::debug;
use ordstat_core::{ChannelLayout, Raster};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width as usize;
    let height = info.height as usize;
    debug!(
        "png: {}x{} source {:?} {:?}",
        width, height, info.color_type, info.bit_depth
    );

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unexpected PNG output depth: {:?}",
            bit_depth
        )));
    }
    let channels = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let row_len = width * channels;
    if bytes_per_row < row_len {
        return Err(IoError::InvalidData(format!(
            "PNG row of {} bytes is shorter than {} samples",
            bytes_per_row, row_len
        )));
    }

    let data = &buf[..output_info.buffer_size()];
    let mut samples = Vec::with_capacity(row_len * height);
    for row in data.chunks(bytes_per_row).take(height) {
        samples.extend_from_slice(&row[..row_len]);
    }

    Ok(Raster::from_interleaved(width, height, channels, &samples)?)
}

/// Write a PNG image
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let color_type = match raster.layout() {
        ChannelLayout::Gray => ColorType::Grayscale,
        ChannelLayout::GrayAlpha => ColorType::GrayscaleAlpha,
        ChannelLayout::Rgb => ColorType::Rgb,
        ChannelLayout::Rgba => ColorType::Rgba,
    };

    let mut encoder = Encoder::new(writer, raster.width() as u32, raster.height() as u32);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(&raster.to_interleaved())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordstat_core::Grid;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let data: Vec<u8> = (0..100).map(|i| (i * 7 % 256) as u8).collect();
        let plane = Grid::from_data(10, 10, data).unwrap();
        let raster = Raster::from_planes(vec![plane]).unwrap();

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();

        let raster2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(raster2, raster);
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let samples: Vec<u8> = (0..5 * 4 * 3).map(|i| (i * 13) as u8).collect();
        let raster = Raster::from_interleaved(5, 4, 3, &samples).unwrap();

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();

        let raster2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(raster2.layout(), ChannelLayout::Rgb);
        assert_eq!(raster2.to_interleaved(), samples);
    }

    #[test]
    fn test_png_garbage() {
        assert!(read_png(Cursor::new(vec![1u8, 2, 3, 4])).is_err());
    }
}
