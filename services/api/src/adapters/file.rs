//! services/api/src/adapters/file.rs
//!
//! This module contains the filesystem adapter for the `BlobStore` port.
//! Each blob lives in `<dir>/<key>.json`.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use study_pack_core::ports::{BlobStore, PortError, PortResult};
use tokio::fs;

/// A `BlobStore` backed by one file per key.
#[derive(Clone, Debug)]
pub struct FileBlobAdapter {
    dir: PathBuf,
}

impl FileBlobAdapter {
    /// Creates a new `FileBlobAdapter`. The directory is created on first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl BlobStore for FileBlobAdapter {
    async fn read(&self, key: &str) -> PortResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PortError::Unexpected(e.to_string())),
        }
    }

    async fn write(&self, key: &str, value: &str) -> PortResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Write beside the target and rename over it so readers never see a partial blob.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use study_pack_core::{HeuristicGenerator, PackStore};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = FileBlobAdapter::new(temp_dir.path().join("nested"));

        assert!(adapter.read("packs").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = FileBlobAdapter::new(temp_dir.path().join("nested"));

        adapter.write("packs", "[]").await.unwrap();
        adapter.write("packs", "[1]").await.unwrap();

        assert_eq!(adapter.read("packs").await.unwrap().as_deref(), Some("[1]"));
        assert!(temp_dir.path().join("nested/packs.json").exists());
        assert!(!temp_dir.path().join("nested/packs.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_store_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = Arc::new(FileBlobAdapter::new(temp_dir.path().to_path_buf()));

        let store = PackStore::open(adapter.clone(), Arc::new(HeuristicGenerator), "packs").await;
        store
            .create_generated("Cats", "Cats are mammals. Cats sleep a lot.")
            .await
            .unwrap();
        store.create_manual("Dogs", "").await.unwrap();

        let reopened = PackStore::open(adapter, Arc::new(HeuristicGenerator), "packs").await;
        assert_eq!(reopened.snapshot().await, store.snapshot().await);
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("packs.json"), "{ definitely not packs").unwrap();
        let adapter = Arc::new(FileBlobAdapter::new(temp_dir.path().to_path_buf()));

        let store = PackStore::open(adapter, Arc::new(HeuristicGenerator), "packs").await;
        assert!(store.snapshot().await.is_empty());
    }
}
