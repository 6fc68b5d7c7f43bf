//! Command-line options for the `ordstat` binary

use crate::config::{BatchConfig, OutputFormat};
use std::path::PathBuf;

/// Parsed command-line options.
///
/// Every field is an override; unset fields keep the value from the
/// config file (or the built-in default when no file is given).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub window_size: Option<usize>,
    pub rank: Option<f32>,
    pub output_format: Option<OutputFormat>,
    pub log_level: Option<String>,
}

impl CliOptions {
    /// Build the effective config: file (or defaults) plus overrides.
    pub fn into_config(self) -> Result<BatchConfig, String> {
        let mut config = match &self.config_path {
            Some(path) => BatchConfig::load(path).map_err(|err| err.to_string())?,
            None => BatchConfig::default(),
        };
        if let Some(dir) = self.input_dir {
            config.input_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(window_size) = self.window_size {
            config.window_size = window_size;
        }
        if let Some(rank) = self.rank {
            config.rank = rank;
        }
        if let Some(format) = self.output_format {
            config.output_format = format;
        }
        config.validate().map_err(|err| err.to_string())?;
        Ok(config)
    }
}

/// Parse arguments (without the program name).
///
/// Returns `Ok(None)` after printing help.
pub fn parse_args(args: Vec<String>) -> Result<Option<CliOptions>, String> {
    let mut options = CliOptions::default();

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--config" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--config requires a value".to_string())?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--input" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--input requires a value".to_string())?;
                options.input_dir = Some(PathBuf::from(value));
            }
            "--output" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--output requires a value".to_string())?;
                options.output_dir = Some(PathBuf::from(value));
            }
            "--window" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--window requires a value".to_string())?;
                options.window_size = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| format!("Invalid --window value: {value}"))?,
                );
            }
            "--rank" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--rank requires a value".to_string())?;
                options.rank = Some(
                    value
                        .parse::<f32>()
                        .map_err(|_| format!("Invalid --rank value: {value}"))?,
                );
            }
            "--format" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--format requires a value".to_string())?;
                options.output_format = Some(match value.as_str() {
                    "png" => OutputFormat::Png,
                    "pnm" => OutputFormat::Pnm,
                    _ => return Err(format!("Invalid --format {value}. Use png or pnm.")),
                });
            }
            "--log-level" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--log-level requires a value".to_string())?;
                options.log_level = Some(value.to_string());
            }
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }

    Ok(Some(options))
}

fn help_text() -> String {
    [
        "ordstat",
        "",
        "Median (or any rank) filter every image in a directory.",
        "",
        "Usage:",
        "  ordstat [options]",
        "",
        "Options:",
        "  --config <file>      TOML config file",
        "  --input <dir>        Input directory (default: pics)",
        "  --output <dir>       Output directory (default: filtered)",
        "  --window <n>         Window side length (default: 3)",
        "  --rank <r>           Rank in [0, 1] (default: 0.5, the median)",
        "  --format <png|pnm>   Output format (default: png)",
        "  --log-level <level>  Log level or filter string (default: info; RUST_LOG wins)",
        "  -h, --help           Show this help",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_overrides() {
        let options = parse_args(args(&[
            "--input", "in", "--output", "out", "--window", "5", "--rank", "0.25", "--format",
            "pnm",
        ]))
        .unwrap()
        .unwrap();
        let config = options.into_config().unwrap();
        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.window_size, 5);
        assert_eq!(config.rank, 0.25);
        assert_eq!(config.output_format, OutputFormat::Pnm);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(args(&["--window"])).is_err());
        assert!(parse_args(args(&["--window", "three"])).is_err());
        assert!(parse_args(args(&["--format", "gif"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_zero_window_rejected_by_config() {
        let options = parse_args(args(&["--window", "0"])).unwrap().unwrap();
        assert!(options.into_config().is_err());
    }

    #[test]
    fn test_help_returns_none() {
        assert_eq!(parse_args(args(&["--help"])).unwrap(), None);
    }
}
