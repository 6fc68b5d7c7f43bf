//! ordstat Core - selection primitive and grid containers
//!
//! This crate provides the leaf pieces the rank filters are built on:
//!
//! - [`select()`] - worst-case linear order-statistic selection
//!   (median of medians)
//! - [`Grid`] - row-major 2D scalar array
//! - [`Raster`] - multi-channel 8-bit image stored as one [`Grid`] per channel
//!
//! Values only need `Copy + Ord`. Floating-point data can be selected
//! through `ordered_float::OrderedFloat`.

pub mod error;
pub mod grid;
pub mod raster;
pub mod select;

pub use error::{Error, Result};
pub use grid::Grid;
pub use raster::{ChannelLayout, Raster};
pub use select::{Partition, median, median_of_medians, partition3, select};
