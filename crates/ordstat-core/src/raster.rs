//! Raster - multi-channel 8-bit image as independent planes
//!
//! Each channel is stored as its own `Grid<u8>` (rows = height,
//! cols = width), so per-channel filtering never mixes samples from
//! different channels or different pixels.

use crate::error::{Error, Result};
use crate::grid::Grid;

/// Maximum number of channels (RGBA)
pub const MAX_CHANNELS: usize = 4;

/// Interpretation of the channel count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// One gray channel
    Gray,
    /// Gray plus alpha
    GrayAlpha,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
}

impl ChannelLayout {
    /// Layout for a channel count, if supported.
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(Self::Gray),
            2 => Some(Self::GrayAlpha),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }

    /// Number of channels in this layout.
    pub fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::GrayAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Planar 8-bit image with 1 to 4 channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    planes: Vec<Grid<u8>>,
}

impl Raster {
    /// Create a zero-filled raster.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if a dimension is zero or the
    /// channel count is outside `1..=4`.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        check_dimensions(width, height, channels)?;
        Ok(Raster {
            width,
            height,
            planes: (0..channels).map(|_| Grid::new(height, width)).collect(),
        })
    }

    /// Build a raster from channel planes that all share one shape.
    pub fn from_planes(planes: Vec<Grid<u8>>) -> Result<Self> {
        let (height, width) = planes.first().map_or((0, 0), Grid::dimensions);
        check_dimensions(width, height, planes.len())?;
        for plane in &planes[1..] {
            planes[0].check_same_shape(plane)?;
        }
        Ok(Raster {
            width,
            height,
            planes,
        })
    }

    /// Build a raster from interleaved samples (`RGBRGB...`).
    pub fn from_interleaved(
        width: usize,
        height: usize,
        channels: usize,
        samples: &[u8],
    ) -> Result<Self> {
        check_dimensions(width, height, channels)?;
        let expected = width * height * channels;
        if samples.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: samples.len(),
            });
        }

        let planes = (0..channels)
            .map(|c| {
                let data = samples.iter().skip(c).step_by(channels).copied().collect();
                Grid::from_data(height, width, data)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Raster {
            width,
            height,
            planes,
        })
    }

    /// Interleave the planes back into `RGBRGB...` order.
    pub fn to_interleaved(&self) -> Vec<u8> {
        self.interleave_channels(self.channels())
    }

    /// Interleave only the first `channels` planes.
    ///
    /// Used to drop trailing alpha. `channels` is clamped to the number of
    /// planes.
    pub fn interleave_channels(&self, channels: usize) -> Vec<u8> {
        let channels = channels.min(self.channels());
        let mut out = vec![0u8; self.width * self.height * channels];
        for (c, plane) in self.planes[..channels].iter().enumerate() {
            for (i, &v) in plane.data().iter().enumerate() {
                out[i * channels + c] = v;
            }
        }
        out
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of channels
    #[inline]
    pub fn channels(&self) -> usize {
        self.planes.len()
    }

    /// Channel layout
    pub fn layout(&self) -> ChannelLayout {
        // Constructors only admit 1..=4 channels
        ChannelLayout::from_channels(self.channels()).unwrap_or(ChannelLayout::Gray)
    }

    /// Borrow one channel plane.
    pub fn plane(&self, channel: usize) -> Option<&Grid<u8>> {
        self.planes.get(channel)
    }

    /// Mutably borrow one channel plane.
    pub fn plane_mut(&mut self, channel: usize) -> Option<&mut Grid<u8>> {
        self.planes.get_mut(channel)
    }

    /// All channel planes in order.
    pub fn planes(&self) -> &[Grid<u8>] {
        &self.planes
    }

    /// Consume the raster and return its planes.
    pub fn into_planes(self) -> Vec<Grid<u8>> {
        self.planes
    }
}

fn check_dimensions(width: usize, height: usize, channels: usize) -> Result<()> {
    if width == 0 || height == 0 || channels == 0 || channels > MAX_CHANNELS {
        return Err(Error::InvalidDimension {
            width,
            height,
            channels,
        });
    }
    Ok(())
}
