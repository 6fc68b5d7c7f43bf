use log::{error, warn};
use ordstat::{cli, run_batch, setup_logging};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = cli::parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    let level = options.log_level.clone().unwrap_or_else(|| "info".to_string());
    let _logger = setup_logging(&level).map_err(|err| format!("Failed to start logging: {err}"))?;

    let config = options.into_config()?;
    let report = run_batch(&config).map_err(|err| {
        error!("{err}");
        err.to_string()
    })?;
    if report.processed() == 0 {
        warn!("no images found in {}", config.input_dir.display());
    }
    Ok(())
}
