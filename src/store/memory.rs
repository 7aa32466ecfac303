//! # In-Memory Store

use std::collections::HashMap;
use std::sync::RwLock;

use super::{ObjectStore, StoreError, StoreResult, WriteOptions};

/// In-memory object store, keyed by `{bucket}/{key}`
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn object_key(bucket: &str, key: &str) -> String {
        format!("{}/{}", bucket, key)
    }

    /// Number of blobs held across all buckets
    pub fn len(&self) -> usize {
        self.objects.read().map(|m| m.len()).unwrap_or(0)
    }

    /// True when no blobs are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for MemoryStore {
    fn get(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
        let objects = self
            .objects
            .read()
            .map_err(|_| StoreError::Backend("Lock poisoned".into()))?;
        objects
            .get(&Self::object_key(bucket, key))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn put(&self, bucket: &str, key: &str, data: &[u8], _options: &WriteOptions) -> StoreResult<()> {
        let mut objects = self
            .objects
            .write()
            .map_err(|_| StoreError::Backend("Lock poisoned".into()))?;
        objects.insert(Self::object_key(bucket, key), data.to_vec());
        Ok(())
    }

    fn exists(&self, bucket: &str, key: &str) -> StoreResult<bool> {
        let objects = self
            .objects
            .read()
            .map_err(|_| StoreError::Backend("Lock poisoned".into()))?;
        Ok(objects.contains_key(&Self::object_key(bucket, key)))
    }

    fn delete(&self, bucket: &str, key: &str) -> StoreResult<()> {
        let mut objects = self
            .objects
            .write()
            .map_err(|_| StoreError::Backend("Lock poisoned".into()))?;
        objects
            .remove(&Self::object_key(bucket, key))
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get() {
        let store = MemoryStore::new();
        store.put("test", "a/1", b"hello", &WriteOptions::default()).unwrap();
        assert_eq!(store.get("test", "a/1").unwrap(), b"hello");
    }

    #[test]
    fn test_buckets_are_separate() {
        let store = MemoryStore::new();
        store.put("one", "a/1", b"x", &WriteOptions::default()).unwrap();
        assert!(store.exists("one", "a/1").unwrap());
        assert!(!store.exists("two", "a/1").unwrap());
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        store.put("test", "a/1", b"x", &WriteOptions::default()).unwrap();
        store.delete("test", "a/1").unwrap();
        assert!(!store.exists("test", "a/1").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.get("test", "nope"), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete("test", "nope"), Err(StoreError::NotFound(_))));
    }
}
