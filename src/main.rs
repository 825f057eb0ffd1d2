//! mediagraph - media library read API with per-request batched loading

#![allow(missing_docs)]

use clap::Parser;
use mediagraph::config::Config;
use mediagraph::server;
use mediagraph::utils::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "mediagraph", version, about)]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "MEDIAGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter, overrides the configured level
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let mut config = match Config::load(args.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            // Logging is not up yet
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display, not Debug, keeps multi-line messages readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
