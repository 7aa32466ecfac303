//! # Field Accessor
//!
//! Runtime get/set for externalized fields. Reads are lazy: the cache is
//! consulted first, then the reference column, and only then storage. A read
//! that finds the key but not the blob retries on the not-found kind alone,
//! covering the window where a racing writer's blob is not visible yet.
//! Writes go to storage first and update the reference column only after the
//! put succeeds, so a raw value never reaches the relational store.

use std::thread;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::engine::FieldEngine;
use crate::error::{FieldError, FieldResult};
use crate::key::StorageKey;
use crate::record::HostRecord;
use crate::store::StoreError;

/// Bounded retry for reads that hit a not-yet-visible blob
///
/// `attempts` counts total tries, first included. Only the store's not-found
/// kind is retried; everything else surfaces immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// Policy with the given total attempts and inter-attempt delay
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 10,
            delay: Duration::from_secs(1),
        }
    }
}

impl<R: HostRecord> FieldEngine<R> {
    /// Read an externalized field
    ///
    /// Returns `Ok(None)` without any storage access when the reference
    /// column is null or empty. The decoded value is cached on the record;
    /// later reads return it without re-fetching.
    pub fn get(&self, record: &mut R, field: &str) -> FieldResult<Option<Value>> {
        let spec = self.registry.lookup(field)?;

        if let Some(value) = record.cache().value(field) {
            return Ok(Some(value.clone()));
        }

        let key = match record.read_reference(field) {
            Some(key) if !key.is_empty() => key,
            _ => return Ok(None),
        };

        let bytes = self.fetch_with_retry(spec.bucket(), &key)?;
        let value = spec.format().decode(&bytes)?;
        record.cache_mut().insert_loaded(field, value.clone());
        Ok(Some(value))
    }

    /// Write an externalized field
    ///
    /// Encodes the value, derives the key against current record state (a
    /// generated token stands in for a missing id), puts the blob, then
    /// updates the reference column and cache. Returns the derived key.
    pub fn set(&self, record: &mut R, field: &str, value: Value) -> FieldResult<StorageKey> {
        let spec = self.registry.lookup(field)?;

        let bytes = spec.format().encode(&value)?;
        let key = (spec.deriver())(&*record);

        self.store
            .put(spec.bucket(), key.as_str(), &bytes, &self.config.write_options)
            .map_err(|e| FieldError::from_store(spec.bucket(), key.as_str(), e))?;
        debug!(field, bucket = spec.bucket(), key = %key, "externalized field value");

        record.write_reference(field, Some(key.as_str()));
        record.cache_mut().insert_loaded(field, value);
        Ok(key)
    }

    /// Stage a value locally without touching storage
    ///
    /// The value is visible to [`get`](Self::get) immediately and is written
    /// out by [`upload_on_create`](Self::upload_on_create).
    pub fn stage(&self, record: &mut R, field: &str, value: Value) -> FieldResult<()> {
        self.registry.lookup(field)?;
        record.cache_mut().insert_staged(field, value);
        Ok(())
    }

    fn fetch_with_retry(&self, bucket: &str, key: &str) -> FieldResult<Vec<u8>> {
        let mut attempt: u32 = 1;
        loop {
            match self.store.get(bucket, key) {
                Ok(bytes) => {
                    debug!(bucket, key, attempt, "fetched externalized blob");
                    return Ok(bytes);
                }
                Err(StoreError::NotFound(_)) if attempt < self.retry.attempts => {
                    warn!(bucket, key, attempt, "blob not visible yet, retrying");
                    thread::sleep(self.retry.delay);
                    attempt += 1;
                }
                Err(err) => return Err(FieldError::from_store(bucket, key, err)),
            }
        }
    }
}
