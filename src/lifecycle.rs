//! # Record Lifecycle Coordination
//!
//! Two once-per-record operations driven by the host's lifecycle hooks:
//! upload-on-create writes out every staged field before the creation
//! transaction completes, and cleanup deletes every referenced blob when the
//! record is destroyed.

use tracing::{debug, warn};

use crate::engine::FieldEngine;
use crate::error::{FieldError, FieldResult};
use crate::key::StorageKey;
use crate::record::HostRecord;
use crate::store::StoreError;

/// One field's deletion attempt during cleanup
#[derive(Debug)]
pub struct CleanupAttempt {
    pub field: String,
    pub key: StorageKey,
    /// Present when the delete failed; an already-absent blob is not a failure
    pub error: Option<FieldError>,
}

/// Outcome of a cleanup pass: every referenced field was attempted,
/// failures are reported rather than short-circuiting
#[derive(Debug, Default)]
pub struct CleanupReport {
    attempts: Vec<CleanupAttempt>,
}

impl CleanupReport {
    /// All attempts, in field-registration order
    pub fn attempts(&self) -> &[CleanupAttempt] {
        &self.attempts
    }

    /// Number of fields a delete was issued for
    pub fn attempted(&self) -> usize {
        self.attempts.len()
    }

    /// Attempts that failed
    pub fn failures(&self) -> impl Iterator<Item = &CleanupAttempt> {
        self.attempts.iter().filter(|a| a.error.is_some())
    }

    /// True when every attempted delete succeeded
    pub fn is_clean(&self) -> bool {
        self.attempts.iter().all(|a| a.error.is_none())
    }
}

impl<R: HostRecord> FieldEngine<R> {
    /// Upload every staged field as part of record creation
    ///
    /// Runs once, synchronously, inside the creation flow. Fields with no
    /// staged value (or a staged null) are skipped. Each uploaded field's
    /// reference column is marked changed and updated before the creation
    /// transaction completes, so raw values never reach the relational
    /// store. The first storage or codec failure aborts the pass.
    ///
    /// A no-op when the engine's upload-on-create toggle is off.
    pub fn upload_on_create(&self, record: &mut R) -> FieldResult<()> {
        if !self.upload_on_create {
            return Ok(());
        }
        for spec in self.registry.specs() {
            let field = spec.name();
            let value = match record.cache().staged(field) {
                Some(v) if !v.is_null() => v.clone(),
                _ => continue,
            };

            let bytes = spec.format().encode(&value)?;
            let key = (spec.deriver())(&*record);
            self.store
                .put(spec.bucket(), key.as_str(), &bytes, &self.config.write_options)
                .map_err(|e| FieldError::from_store(spec.bucket(), key.as_str(), e))?;

            record.mark_changed(field);
            record.write_reference(field, Some(key.as_str()));
            record.cache_mut().promote(field);
            debug!(
                field,
                bucket = spec.bucket(),
                key = %key,
                persisted = record.is_persisted(),
                "uploaded staged field"
            );
        }
        Ok(())
    }

    /// Delete every referenced blob as part of record deletion
    ///
    /// Runs once, synchronously, as a pre-delete hook. Storage deletion has
    /// no transactional link to the row: if the surrounding transaction
    /// rolls the row delete back afterwards, the blobs are already gone.
    /// That gap is deliberate and documented rather than papered over.
    ///
    /// Every field with a non-empty reference column gets a delete attempt;
    /// one failure never blocks the rest. Blobs already absent count as
    /// cleaned.
    pub fn cleanup(&self, record: &R) -> CleanupReport {
        let mut report = CleanupReport::default();

        for spec in self.registry.specs() {
            let field = spec.name();
            let key = match record.read_reference(field) {
                Some(key) if !key.is_empty() => key,
                _ => continue,
            };

            let error = match self.store.delete(spec.bucket(), &key) {
                Ok(()) | Err(StoreError::NotFound(_)) => None,
                Err(err) => {
                    let err = FieldError::from_store(spec.bucket(), &key, err);
                    warn!(
                        field,
                        bucket = spec.bucket(),
                        key = %key,
                        error = %err,
                        "failed to delete externalized blob"
                    );
                    Some(err)
                }
            };

            report.attempts.push(CleanupAttempt {
                field: field.to_string(),
                key: StorageKey::from(key),
                error,
            });
        }

        report
    }
}
