//! ordstat-filter - Windowed rank filtering
//!
//! This crate applies the linear-time selection primitive from
//! `ordstat-core` as a sliding-window filter over 2D grids:
//!
//! - Median filtering with zero-padded borders
//! - General rank filtering (min, max, any rank in `[0.0, 1.0]`)
//! - Per-channel filtering of multi-channel rasters

mod error;
pub mod rank;

pub use error::{FilterError, FilterResult};

// Re-export commonly used functions
pub use rank::{
    PARALLEL_CELL_THRESHOLD, extract_window, max_filter, median_filter, median_filter_raster,
    min_filter, rank_filter, rank_filter_raster, rank_index,
};
