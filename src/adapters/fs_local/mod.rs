// Local filesystem adapter - File system operations on the host

use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
#[derive(Debug, Default)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        match fs::metadata(file_path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to stat {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn ensure_directory(&self, dir_path: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(dir_path).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to create directory {}: {}",
                dir_path.display(),
                e
            ))
        })
    }

    async fn remove_file(&self, file_path: &Path) -> Result<(), DomainError> {
        fs::remove_file(file_path).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to delete file {}: {}",
                file_path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ensure_directory_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("segments_2024-06-01");
        let adapter = LocalFsAdapter::new();

        adapter.ensure_directory(&dir).await.unwrap();
        adapter.ensure_directory(&dir).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn test_file_exists_and_remove() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.mp4");
        let adapter = LocalFsAdapter::new();

        assert!(!adapter.file_exists(&file).await.unwrap());
        std::fs::write(&file, b"data").unwrap();
        assert!(adapter.file_exists(&file).await.unwrap());
        // A directory is not a source file
        assert!(!adapter.file_exists(temp.path()).await.unwrap());

        adapter.remove_file(&file).await.unwrap();
        assert!(!file.exists());
        assert!(adapter.remove_file(&file).await.is_err());
    }
}
