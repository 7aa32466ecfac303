//! # Engine Errors

use thiserror::Error;

use crate::store::StoreError;

/// Result type for engine operations
pub type FieldResult<T> = Result<T, FieldError>;

/// Externalized-field engine errors
#[derive(Debug, Clone, Error)]
pub enum FieldError {
    /// No bucket available at registration time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Access to a field that was never registered
    #[error("Field not registered: {0}")]
    NotRegistered(String),

    /// Blob absent after the bounded retry window
    #[error("Object not found in bucket '{bucket}': {key}")]
    NotFound { bucket: String, key: String },

    /// Any non-recoverable storage failure (auth, network, permission)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Value could not be encoded or decoded
    #[error("Codec error: {0}")]
    Codec(String),
}

impl FieldError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a not-registered error
    pub fn not_registered(field: impl Into<String>) -> Self {
        Self::NotRegistered(field.into())
    }

    /// Map an adapter error for a specific bucket/key into an engine error
    pub(crate) fn from_store(bucket: &str, key: &str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            other => Self::Storage(other.to_string()),
        }
    }

    /// True when the error is the retryable not-found kind
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
