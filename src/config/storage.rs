use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Filesystem storage. Never creates missing parent directories.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_file_truncates_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output.txt");
        std::fs::write(&path, "stale content that is longer\n").unwrap();

        LocalStorage::new().write_file(&path, b"fresh\n").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[tokio::test]
    async fn test_write_file_does_not_create_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("output.txt");

        let result = LocalStorage::new().write_file(&path, b"data").await;

        assert!(result.is_err());
        assert!(!dir.path().join("missing").exists());
    }
}
