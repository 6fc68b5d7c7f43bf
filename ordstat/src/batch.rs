//! Batch filtering of an image directory
//!
//! Discovers inputs in [`BatchConfig::input_dir`], filters every channel
//! of each image with the configured window and rank, and writes the
//! results to [`BatchConfig::output_dir`] as `0.png`, `1.png`, ... in
//! sorted input order.
//!
//! Inputs that cannot be decoded are skipped with a warning. Failures of
//! the filter itself or of writing an output abort the run.

use crate::config::{BatchConfig, ConfigError};
use log::{debug, info, warn};
use ordstat_filter::{FilterError, rank_filter_raster};
use ordstat_io::{ImageFormat, IoError, read_image, write_image};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a batch run
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to filter {path}: {source}")]
    Filter {
        path: PathBuf,
        source: FilterError,
    },
    #[error("Failed to write {path}: {source}")]
    Image { path: PathBuf, source: IoError },
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Output files written, in input order
    pub outputs: Vec<PathBuf>,
    /// Inputs that could not be decoded
    pub skipped: Vec<PathBuf>,
}

impl BatchReport {
    /// Number of images filtered and written
    pub fn processed(&self) -> usize {
        self.outputs.len()
    }
}

/// List input files in the configured directory, sorted by path.
pub fn discover_inputs(config: &BatchConfig) -> Result<Vec<PathBuf>, BatchError> {
    let dir = &config.input_dir;
    let io_err = |source: std::io::Error| BatchError::Io {
        path: dir.clone(),
        source,
    };

    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && config.matches_extension(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();
    debug!("discovered {} inputs in {}", inputs.len(), dir.display());
    Ok(inputs)
}

/// Filter every discovered input and write the results.
pub fn run_batch(config: &BatchConfig) -> Result<BatchReport, BatchError> {
    config.validate()?;
    let inputs = discover_inputs(config)?;

    std::fs::create_dir_all(&config.output_dir).map_err(|source| BatchError::Io {
        path: config.output_dir.clone(),
        source,
    })?;

    let format = ImageFormat::from(config.output_format);
    let mut report = BatchReport::default();
    for input in inputs {
        let raster = match read_image(&input) {
            Ok(raster) => raster,
            Err(err) => {
                warn!("skipping {}: {}", input.display(), err);
                report.skipped.push(input);
                continue;
            }
        };

        let filtered = rank_filter_raster(&raster, config.window_size, config.rank).map_err(
            |source| BatchError::Filter {
                path: input.clone(),
                source,
            },
        )?;

        let output = config
            .output_dir
            .join(format!("{}.{}", report.outputs.len(), format.extension()));
        write_image(&filtered, &output, format).map_err(|source| BatchError::Image {
            path: output.clone(),
            source,
        })?;

        info!(
            "filtered {} ({}x{}, {} channels) -> {}",
            input.display(),
            raster.width(),
            raster.height(),
            raster.channels(),
            output.display()
        );
        report.outputs.push(output);
    }

    info!(
        "batch done: {} written, {} skipped",
        report.processed(),
        report.skipped.len()
    );
    Ok(report)
}
