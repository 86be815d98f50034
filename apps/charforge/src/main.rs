//! Charforge binary entry point.

use charforge::cli::{self, Cli};
use charforge::config::Config;
use charforge::logging;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(database) = &cli.database {
        config.database.clone_from(database);
    }

    logging::init(&config.log.filter);
    tracing::debug!(database = %config.database.display(), "configuration loaded");

    match cli::run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
