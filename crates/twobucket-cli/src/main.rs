//! twobucket CLI - Command line interface for the two-bucket puzzle solver

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unused_async)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{batch, measure};
use crate::config::Config;

#[derive(Parser)]
#[command(name = "twobucket")]
#[command(author, version, about = "twobucket - two-bucket puzzle solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file
    #[arg(short, long, global = true, env = "TWOBUCKET_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure a goal volume with two buckets
    Measure(measure::MeasureArgs),

    /// Solve every puzzle in a TOML file
    Batch(batch::BatchArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(commands::config::ConfigCommands),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // Initialize logging based on verbosity
    let log_level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("twobucket={log_level},twobucket_core={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &config.source {
        Some(path) => debug!("Loaded config from: {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }

    match cli.command {
        Commands::Measure(args) => measure::run(args, &config).await,
        Commands::Batch(args) => batch::run(args, &config).await,
        Commands::Config(cmd) => commands::config::run(cmd, &config).await,
    }
}
