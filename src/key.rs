//! # Storage Keys
//!
//! Key derivation maps a record and field name to the object-storage path that
//! holds the externalized value. The default shape is `{field}/{record.id}`,
//! falling back to a generated unique token when the record has no identity
//! yet (fields set before the row is created).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::HostRecord;

/// Opaque path into object storage identifying one stored blob
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Create a key from any string-like path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Borrow the key as a path string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the path string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StorageKey {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&str> for StorageKey {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Function computing a StorageKey from record state
pub type KeyDeriver<R> = Arc<dyn Fn(&R) -> StorageKey + Send + Sync>;

/// Default deriver for a field: `{field}/{id}`, or `{field}/{uuid}` when the
/// record has no identity yet
pub fn default_deriver<R: HostRecord>(field: &str) -> KeyDeriver<R> {
    let field = field.to_string();
    Arc::new(move |record: &R| match record.id() {
        Some(id) => StorageKey::new(format!("{}/{}", field, id)),
        None => StorageKey::new(format!("{}/{}", field, Uuid::new_v4())),
    })
}
