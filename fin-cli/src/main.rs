use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};

use fin_cli::cli::Cli;
use fin_cli::config::Config;
use fin_cli::{app, logging};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging("info");

    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let config = Config::resolve(cli.config.as_deref(), &cwd)?;

    // An explicit flag beats RUST_LOG, which beats the config file.
    let level = match &cli.log_level {
        Some(level) => Some(level.as_str()),
        None if std::env::var_os("RUST_LOG").is_none() => Some(config.logging.level.as_str()),
        None => None,
    };
    if let Some(level) = level {
        if let Err(e) = logging::set_log_level(level) {
            warn!("{e:#}");
        }
    }
    if let Some(path) = &config.logging.file {
        logging::enable_file_logging(path)?;
        debug!(path = %path.display(), "file logging enabled");
    }

    let mut stdout = io::stdout().lock();
    app::run(&cli, &config, &mut stdout).await
}
