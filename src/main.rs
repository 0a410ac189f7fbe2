//! segcut CLI
//!
//! Cuts named segments out of a video into a dated folder next to it,
//! using ffprobe for the duration and ffmpeg stream copy for each cut.
//!
//! # Usage
//!
//! ```bash
//! segcut split --input talk.mp4 --date 2024-06-01 \
//!     --segment 00:00:00-00:00:10=Intro --segment 00:00:10-00:00:30="Part 1"
//! segcut plan --input talk.mp4 --plan-file segments.toml --json
//! segcut probe --input talk.mp4
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use segment_cutter::adapters::TomlConfigAdapter;
use segment_cutter::app::DefaultAppContainer;
use segment_cutter::cli::{commands, Cli, Commands};
use segment_cutter::config_initialization::{initialize_configuration_hierarchy, logging_config};
use segment_cutter::utils::logging::LoggingSystem;

/// Main entry point for the segcut CLI
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Resolve configuration before logging so its level applies
    let config = TomlConfigAdapter::new();
    initialize_configuration_hierarchy(&config, &cli).await?;

    let logging = LoggingSystem::new(logging_config(&config).await?);
    logging.initialize();
    logging.log_system_info();
    if let Some(path) = config.config_file_path()? {
        debug!("Configuration loaded from {}", path.display());
    }

    let container = DefaultAppContainer::new(&config).await?;

    match cli.command {
        Commands::Split(args) => {
            info!("Executing split command");
            commands::split(&container, args).await?;
        }
        Commands::Plan(args) => {
            info!("Executing plan command");
            commands::plan(&container, args).await?;
        }
        Commands::Probe(args) => {
            info!("Executing probe command");
            commands::probe(&container, args).await?;
        }
    }

    Ok(())
}
