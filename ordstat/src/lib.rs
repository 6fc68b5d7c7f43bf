//! ordstat - Linear-time selection and windowed median filtering
//!
//! The workspace is split the same way the processing is:
//!
//! - `ordstat-core`, re-exported at the root: median-of-medians
//!   selection, `Grid` and `Raster`
//! - [`filter`]: zero-padded windowed rank filters
//! - [`io`]: PNG / PNM decoding and encoding
//!
//! This crate adds the batch driver around them: an explicit
//! [`BatchConfig`], input discovery, and the `ordstat` binary.
//!
//! # Example
//!
//! ```
//! use ordstat::{Grid, filter::median_filter, select};
//!
//! assert_eq!(select(&[9, 1, 8, 2, 7, 3, 6, 4, 5], 4).unwrap(), 5);
//!
//! let grid = Grid::from_rows(vec![vec![5u8]]).unwrap();
//! assert_eq!(median_filter(&grid, 3).unwrap().data(), &[0]);
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod logging;

// Re-export core types (primary data structures used everywhere)
pub use ordstat_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use ordstat_filter as filter;
pub use ordstat_io as io;

pub use batch::{BatchError, BatchReport, discover_inputs, run_batch};
pub use config::{BatchConfig, ConfigError, OutputFormat};
pub use logging::setup_logging;

