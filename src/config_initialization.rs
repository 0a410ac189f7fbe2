//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::toml_config::*;
use crate::cli::{Cli, Commands};
use crate::ports::{ConfigPort, LogLevel};
use crate::utils::logging::{LogFormat, LoggingConfig};

/// Files searched, in order, when `--config` is not given
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["segcut.toml", "config/segcut.toml"];

/// Environment variables and the keys they override
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("SEGCUT_FFMPEG", KEY_FFMPEG_PATH),
    ("SEGCUT_FFPROBE", KEY_FFPROBE_PATH),
    ("SEGCUT_LOG_LEVEL", KEY_LOG_LEVEL),
    ("SEGCUT_LOG_FORMAT", KEY_LOG_FORMAT),
    ("SEGCUT_CLEANUP_ON_FAILURE", KEY_CLEANUP_ON_FAILURE),
];

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub async fn initialize_configuration_hierarchy(
    config: &dyn ConfigPort,
    cli: &Cli,
) -> Result<()> {
    // Defaults are already present in the adapter
    load_config_file(config, cli.config.as_deref()).await?;

    let env_overrides = apply_env_overrides(config, |name| std::env::var(name).ok()).await?;
    if env_overrides > 0 {
        debug!("Applied {} environment variable overrides", env_overrides);
    }

    let cli_overrides = apply_cli_overrides(config, cli).await?;
    if cli_overrides > 0 {
        debug!("Applied {} CLI configuration overrides", cli_overrides);
    }

    config
        .validate_config()
        .await
        .context("Invalid configuration")?;

    Ok(())
}

/// Load the explicit config file, or the first default one that exists
pub async fn load_config_file(
    config: &dyn ConfigPort,
    explicit: Option<&Path>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        config
            .load_config(path)
            .await
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        return Ok(Some(path.to_path_buf()));
    }

    for candidate in DEFAULT_CONFIG_PATHS {
        let path = Path::new(candidate);
        if path.exists() {
            info!("Loading configuration from: {}", path.display());
            config.load_config(path).await?;
            return Ok(Some(path.to_path_buf()));
        }
    }

    Ok(None)
}

/// Apply `SEGCUT_*` variables; `lookup` stands in for `std::env::var`
pub async fn apply_env_overrides<F>(config: &dyn ConfigPort, lookup: F) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = 0;
    for (env_var, key) in ENV_MAPPINGS {
        if let Some(value) = lookup(env_var) {
            debug!("Found environment override: {} = {}", env_var, value);
            config.set_config(key, &value).await?;
            applied += 1;
        }
    }
    Ok(applied)
}

/// Apply command-line flags on top of everything else
pub async fn apply_cli_overrides(config: &dyn ConfigPort, cli: &Cli) -> Result<usize> {
    let mut overrides: Vec<(&str, String)> = Vec::new();

    if let Some(level) = &cli.log_level {
        overrides.push((KEY_LOG_LEVEL, level.clone()));
    }
    if let Some(format) = &cli.log_format {
        overrides.push((KEY_LOG_FORMAT, format.clone()));
    }
    if let Some(ffmpeg) = &cli.ffmpeg {
        overrides.push((KEY_FFMPEG_PATH, ffmpeg.clone()));
    }
    if let Some(ffprobe) = &cli.ffprobe {
        overrides.push((KEY_FFPROBE_PATH, ffprobe.clone()));
    }
    if let Commands::Split(args) = &cli.command {
        if args.cleanup_on_failure {
            overrides.push((KEY_CLEANUP_ON_FAILURE, "true".to_string()));
        }
    }

    for (key, value) in &overrides {
        config.set_config(key, value).await?;
    }
    Ok(overrides.len())
}

/// Logging settings out of the resolved configuration
pub async fn logging_config(config: &dyn ConfigPort) -> Result<LoggingConfig> {
    let level = config.get_config_or_default(KEY_LOG_LEVEL, "info").await?;
    let format = config.get_config_or_default(KEY_LOG_FORMAT, "pretty").await?;
    Ok(LoggingConfig {
        level: LogLevel::parse(&level)?,
        format: LogFormat::parse(&format)?,
    })
}
