#![forbid(unsafe_code)]

mod cli;
mod color;
mod config;
mod fonts;
mod generate;
mod gui;
mod overlay;

use clap::Parser;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    info!(broadcast = args.broadcast, "Starting lower-third studio");

    gui::run(args)?;
    Ok(())
}
