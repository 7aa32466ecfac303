//! # Engine Configuration
//!
//! Construction-time configuration for the engine. There is no process-wide
//! state: the default bucket and write options are held by the engine that
//! was given them, and apply to every field registered against it unless
//! overridden per field.

use serde::{Deserialize, Serialize};

use crate::store::WriteOptions;

/// Engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Bucket used by fields registered without an explicit bucket.
    /// Registration fails if neither this nor a per-field bucket is set.
    #[serde(default)]
    pub default_bucket: Option<String>,

    /// Write options applied to every storage put
    #[serde(default)]
    pub write_options: WriteOptions,
}

impl EngineConfig {
    /// Configuration with a default bucket and default write options
    pub fn with_default_bucket(bucket: impl Into<String>) -> Self {
        Self {
            default_bucket: Some(bucket.into()),
            write_options: WriteOptions::default(),
        }
    }
}
