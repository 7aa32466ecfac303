//! fieldstore - externalized record fields backed by object storage
//!
//! Large or infrequently-queried field values live as blobs in an object
//! store; the database row keeps only a reference key. The engine covers key
//! derivation, write-then-reference-update sequencing, lazy reads with a
//! bounded retry on not-yet-visible blobs, and per-record lifecycle cleanup.
//! Best-effort synchronization with explicit retry — not a transactional
//! bridge between the two stores.

pub mod accessor;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod key;
pub mod lifecycle;
pub mod record;
pub mod registry;
pub mod store;

pub use accessor::RetryPolicy;
pub use codec::Format;
pub use config::EngineConfig;
pub use engine::FieldEngine;
pub use error::{FieldError, FieldResult};
pub use key::{default_deriver, KeyDeriver, StorageKey};
pub use lifecycle::{CleanupAttempt, CleanupReport};
pub use record::{CacheEntry, FieldCache, HostRecord};
pub use registry::{FieldOptions, FieldRegistry, FieldSpec};
pub use store::{LocalStore, MemoryStore, ObjectStore, StoreError, StoreResult, WriteOptions};
