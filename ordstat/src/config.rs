//! Batch configuration
//!
//! Everything the batch driver needs is carried in [`BatchConfig`]: where
//! to look for images, where to write results, and the filter parameters.
//! The struct is loaded from TOML, any field may be omitted, and
//! command-line flags are applied on top of it.
//!
//! ```toml
//! input_dir = "pics"
//! output_dir = "filtered"
//! window_size = 5
//! rank = 0.5
//! extensions = ["png", "pgm"]
//! output_format = "png"
//! ```

use ordstat_io::ImageFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating a [`BatchConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Encoding used for filtered outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Pnm,
}

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Pnm => ImageFormat::Pnm,
        }
    }
}

/// Parameters for one batch filtering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory scanned (non-recursively) for input images
    pub input_dir: PathBuf,
    /// Directory receiving `0.png`, `1.png`, ...
    pub output_dir: PathBuf,
    /// Side of the square filter window
    pub window_size: usize,
    /// Rank in [0.0, 1.0]; 0.5 is the median
    pub rank: f32,
    /// File extensions (without dot, case insensitive) treated as inputs
    pub extensions: Vec<String>,
    /// Encoding of the outputs
    pub output_format: OutputFormat,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("pics"),
            output_dir: PathBuf::from("filtered"),
            window_size: 3,
            rank: 0.5,
            extensions: ["png", "pgm", "ppm", "pnm"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            output_format: OutputFormat::Png,
        }
    }
}

impl BatchConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: BatchConfig =
            toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check filter parameters before any file is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::Invalid(
                "window_size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.rank) {
            return Err(ConfigError::Invalid(format!(
                "rank must be in [0.0, 1.0], got {}",
                self.rank
            )));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "extensions must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns `true` if `path` has one of the configured extensions.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|want| want.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window_size, 3);
        assert_eq!(config.rank, 0.5);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: BatchConfig =
            toml::from_str("window_size = 7\noutput_format = \"pnm\"").unwrap();
        assert_eq!(config.window_size, 7);
        assert_eq!(config.output_format, OutputFormat::Pnm);
        assert_eq!(config.input_dir, PathBuf::from("pics"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = BatchConfig {
            window_size: 0,
            ..BatchConfig::default()
        };
        assert!(config.validate().is_err());
        config.window_size = 3;
        config.rank = 1.5;
        assert!(config.validate().is_err());
        config.rank = 0.5;
        config.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_matches_extension() {
        let config = BatchConfig {
            extensions: vec!["png".to_string(), ".PGM".to_string()],
            ..BatchConfig::default()
        };
        assert!(config.matches_extension(Path::new("a/b.PNG")));
        assert!(config.matches_extension(Path::new("c.pgm")));
        assert!(!config.matches_extension(Path::new("notes.txt")));
        assert!(!config.matches_extension(Path::new("README")));
    }
}
