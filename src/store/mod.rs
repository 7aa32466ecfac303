//! # Object Store Adapter
//!
//! Thin interface to the object-storage provider. The engine only ever talks
//! to storage through [`ObjectStore`]; the real networked client lives
//! outside this crate. Two implementations ship here: an in-memory store for
//! tests and a filesystem-rooted store for embedded use.

pub mod local;
pub mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use local::LocalStore;
pub use memory::MemoryStore;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Object store errors
///
/// `NotFound` is the only kind the engine's read path retries; every other
/// variant propagates immediately.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Options applied to storage writes (storage class, ACL, content type)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Adapter trait for object-storage backends
pub trait ObjectStore: Send + Sync + fmt::Debug {
    /// Fetch the blob at key
    fn get(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>>;

    /// Write a blob at key, overwriting any previous blob there
    fn put(&self, bucket: &str, key: &str, data: &[u8], options: &WriteOptions) -> StoreResult<()>;

    /// Check whether a blob exists at key
    fn exists(&self, bucket: &str, key: &str) -> StoreResult<bool>;

    /// Delete the blob at key
    fn delete(&self, bucket: &str, key: &str) -> StoreResult<()>;
}
