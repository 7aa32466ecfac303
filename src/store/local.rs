//! # Local Filesystem Store
//!
//! Buckets are subdirectories under a root path; keys are relative paths
//! within their bucket.

use std::fs;
use std::path::PathBuf;

use super::{ObjectStore, StoreError, StoreResult, WriteOptions};

/// Filesystem-rooted object store
#[derive(Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at the given directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn blob_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.root.join(bucket).join(key)
    }
}

impl ObjectStore for LocalStore {
    fn get(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
        fs::read(self.blob_path(bucket, key)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(key.to_string())
            } else {
                StoreError::Io(e.to_string())
            }
        })
    }

    fn put(&self, bucket: &str, key: &str, data: &[u8], _options: &WriteOptions) -> StoreResult<()> {
        let path = self.blob_path(bucket, key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        fs::write(&path, data).map_err(|e| StoreError::Io(e.to_string()))
    }

    fn exists(&self, bucket: &str, key: &str) -> StoreResult<bool> {
        Ok(self.blob_path(bucket, key).exists())
    }

    fn delete(&self, bucket: &str, key: &str) -> StoreResult<()> {
        fs::remove_file(self.blob_path(bucket, key)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(key.to_string())
            } else {
                StoreError::Io(e.to_string())
            }
        })
    }
}
