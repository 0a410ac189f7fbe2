// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media duration probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Total duration of the source in seconds
    async fn probe_duration(&self, source_path: &Path) -> Result<f64, DomainError>;
}

/// Port for stream-copy extraction of one segment
#[async_trait]
pub trait TrimPort: Send + Sync {
    /// Copy `[start, end)` of the source into the output path, overwriting it.
    ///
    /// Errors carry no segment position; the interactor adds it.
    async fn trim(&self, request: &TrimRequest) -> Result<(), TrimFailure>;
}

/// Raw failure of one trim invocation
#[derive(Debug, Clone, PartialEq)]
pub struct TrimFailure {
    pub exit_code: Option<i32>,
    pub output: String,
}

impl TrimFailure {
    pub fn new(exit_code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            exit_code,
            output: output.into(),
        }
    }
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Create directory (including parent directories); no-op if present
    async fn ensure_directory(&self, dir_path: &Path) -> Result<(), DomainError>;

    /// Delete file
    async fn remove_file(&self, file_path: &Path) -> Result<(), DomainError>;
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Get configuration value
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Get configuration value with default
    async fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, DomainError>;

    /// Set configuration value
    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Load configuration from file
    async fn load_config(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Validate configuration
    async fn validate_config(&self) -> Result<(), DomainError>;

    /// Get all configuration keys
    async fn get_all_config_keys(&self) -> Result<Vec<String>, DomainError>;

    /// Read a boolean key, falling back to `default` when unset
    async fn get_bool(&self, key: &str, default: bool) -> Result<bool, DomainError> {
        match self.get_config(key).await? {
            Some(value) => parse_bool(key, &value),
            None => Ok(default),
        }
    }
}

/// Parse the boolean spellings accepted in config files and env vars
pub fn parse_bool(key: &str, value: &str) -> Result<bool, DomainError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(DomainError::ConfigFail(format!(
            "Invalid boolean value for {}: {}",
            key, other
        ))),
    }
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> Result<Self, DomainError> {
        match level_str.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(DomainError::ConfigFail(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level_str
            ))),
        }
    }

    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::parse("warn").unwrap().as_filter(), "warn");
        assert!(LogLevel::parse("loud").is_err());
    }

    #[test]
    fn test_parse_bool_spellings() {
        assert!(parse_bool("k", "Yes").unwrap());
        assert!(!parse_bool("k", "0").unwrap());
        assert!(parse_bool("k", "maybe").is_err());
    }
}
