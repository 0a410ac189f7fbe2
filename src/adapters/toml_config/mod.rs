// TOML config adapter - Configuration management using TOML files

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// Section holding our keys in a config file
pub const CONFIG_SECTION: &str = "segcut";

pub const KEY_FFMPEG_PATH: &str = "ffmpeg_path";
pub const KEY_FFPROBE_PATH: &str = "ffprobe_path";
pub const KEY_LOG_LEVEL: &str = "log_level";
pub const KEY_LOG_FORMAT: &str = "log_format";
pub const KEY_CLEANUP_ON_FAILURE: &str = "cleanup_on_failure";

const BOOLEAN_KEYS: &[&str] = &[KEY_CLEANUP_ON_FAILURE];

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    config: Arc<RwLock<HashMap<String, String>>>,
    config_file_path: Arc<RwLock<Option<PathBuf>>>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter holding the defaults
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(Self::default_values())),
            config_file_path: Arc::new(RwLock::new(None)),
        }
    }

    /// Default configuration values
    pub fn default_values() -> HashMap<String, String> {
        [
            (KEY_FFMPEG_PATH, "ffmpeg"),
            (KEY_FFPROBE_PATH, "ffprobe"),
            (KEY_LOG_LEVEL, "info"),
            (KEY_LOG_FORMAT, "pretty"),
            (KEY_CLEANUP_ON_FAILURE, "false"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    /// Path of the file the values were last loaded from
    pub fn config_file_path(&self) -> Result<Option<PathBuf>, DomainError> {
        let path = self
            .config_file_path
            .read()
            .map_err(|_| poisoned())?;
        Ok(path.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>, DomainError> {
        self.config.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>, DomainError> {
        self.config.write().map_err(|_| poisoned())
    }

    /// Deserialize config from TOML string
    fn deserialize_config(&self, toml_content: &str) -> Result<(), DomainError> {
        let parsed: toml::Value = toml::from_str(toml_content)
            .map_err(|e| DomainError::ConfigFail(format!("Failed to parse TOML config: {}", e)))?;

        let mut config = self.write()?;
        if let Some(table) = parsed.get(CONFIG_SECTION).and_then(|s| s.as_table()) {
            for (key, value) in table {
                let value = match value {
                    toml::Value::String(s) => s.clone(),
                    toml::Value::Boolean(b) => b.to_string(),
                    toml::Value::Integer(i) => i.to_string(),
                    other => {
                        return Err(DomainError::ConfigFail(format!(
                            "Unsupported value for {}: {}",
                            key, other
                        )))
                    }
                };
                config.insert(key.clone(), value);
            }
        }

        Ok(())
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> DomainError {
    DomainError::ConfigFail("configuration lock poisoned".to_string())
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.read()?.get(key).cloned())
    }

    async fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, DomainError> {
        Ok(self
            .read()?
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string()))
    }

    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.write()?.insert(key.to_string(), value.to_string());
        tracing::debug!("Set config {} = {}", key, value);
        Ok(())
    }

    async fn load_config(&self, file_path: &Path) -> Result<(), DomainError> {
        if !file_path.exists() {
            return Err(DomainError::ConfigFail(format!(
                "Config file does not exist: {}",
                file_path.display()
            )));
        }

        let content = tokio::fs::read_to_string(file_path)
            .await
            .map_err(|e| DomainError::ConfigFail(format!("Failed to read config file: {}", e)))?;

        self.deserialize_config(&content)?;
        let mut config_path = self
            .config_file_path
            .write()
            .map_err(|_| poisoned())?;
        *config_path = Some(file_path.to_path_buf());

        Ok(())
    }

    async fn validate_config(&self) -> Result<(), DomainError> {
        let config = self.read()?;

        if let Some(log_level) = config.get(KEY_LOG_LEVEL) {
            LogLevel::parse(log_level)?;
        }

        if let Some(format) = config.get(KEY_LOG_FORMAT) {
            crate::utils::logging::LogFormat::parse(format)?;
        }

        for key in BOOLEAN_KEYS {
            if let Some(value) = config.get(*key) {
                parse_bool(key, value)?;
            }
        }

        for key in [KEY_FFMPEG_PATH, KEY_FFPROBE_PATH] {
            if config.get(key).is_some_and(|v| v.trim().is_empty()) {
                return Err(DomainError::ConfigFail(format!("{} must not be empty", key)));
            }
        }

        Ok(())
    }

    async fn get_all_config_keys(&self) -> Result<Vec<String>, DomainError> {
        let mut keys: Vec<String> = self.read()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_defaults() {
        let config = TomlConfigAdapter::new();
        assert_eq!(
            config.get_config(KEY_FFMPEG_PATH).await.unwrap().as_deref(),
            Some("ffmpeg")
        );
        assert!(!config.get_bool(KEY_CLEANUP_ON_FAILURE, true).await.unwrap());
        assert_eq!(
            config.get_config_or_default("missing", "x").await.unwrap(),
            "x"
        );
        config.validate_config().await.unwrap();
    }

    #[tokio::test]
    async fn test_load_config_section() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("segcut.toml");
        std::fs::write(
            &path,
            "[segcut]\nffmpeg_path = \"/opt/ffmpeg/bin/ffmpeg\"\ncleanup_on_failure = true\n\n[other]\nffmpeg_path = \"ignored\"\n",
        )
        .unwrap();

        let config = TomlConfigAdapter::new();
        config.load_config(&path).await.unwrap();

        assert_eq!(
            config.get_config(KEY_FFMPEG_PATH).await.unwrap().as_deref(),
            Some("/opt/ffmpeg/bin/ffmpeg")
        );
        assert!(config.get_bool(KEY_CLEANUP_ON_FAILURE, false).await.unwrap());
        assert_eq!(config.config_file_path().unwrap(), Some(path));
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let config = TomlConfigAdapter::new();
        let err = config
            .load_config(Path::new("/nonexistent/segcut.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ConfigFail(_)));
    }

    #[tokio::test]
    async fn test_validate_rejects_bad_values() {
        let config = TomlConfigAdapter::new();
        config.set_config(KEY_LOG_LEVEL, "chatty").await.unwrap();
        assert!(config.validate_config().await.is_err());

        let config = TomlConfigAdapter::new();
        config
            .set_config(KEY_CLEANUP_ON_FAILURE, "sometimes")
            .await
            .unwrap();
        assert!(config.validate_config().await.is_err());

        let config = TomlConfigAdapter::new();
        config.set_config(KEY_FFPROBE_PATH, " ").await.unwrap();
        assert!(config.validate_config().await.is_err());
    }

    #[tokio::test]
    async fn test_all_keys_sorted() {
        let keys = TomlConfigAdapter::new().get_all_config_keys().await.unwrap();
        assert_eq!(keys.first().map(String::as_str), Some(KEY_CLEANUP_ON_FAILURE));
        assert_eq!(keys.len(), 5);
    }
}
