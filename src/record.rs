//! # Host Record Boundary
//!
//! The relational persistence layer is an external collaborator. The engine
//! reaches it through [`HostRecord`]: reference-column reads and writes,
//! change marking for the host's dirty tracking, record identity, and the
//! per-record cache of decoded values.
//!
//! Records are not thread-shared in this design; nothing here locks. Callers
//! that share a record across threads must serialize access themselves.

use std::collections::HashMap;

use serde_json::Value;

/// One cached field value on a record
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    /// Set locally, not yet written to storage (consumed by upload-on-create)
    Staged(Value),
    /// Written to or fetched from storage
    Loaded(Value),
}

impl CacheEntry {
    /// The value regardless of state
    pub fn value(&self) -> &Value {
        match self {
            CacheEntry::Staged(v) | CacheEntry::Loaded(v) => v,
        }
    }

    /// True for values awaiting their storage write
    pub fn is_staged(&self) -> bool {
        matches!(self, CacheEntry::Staged(_))
    }
}

/// Per-record cache of decoded field values
///
/// Entries live until cleared or the record is dropped; there is no eviction.
#[derive(Debug, Clone, Default)]
pub struct FieldCache {
    entries: HashMap<String, CacheEntry>,
}

impl FieldCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value for a field, staged or loaded
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.entries.get(field).map(CacheEntry::value)
    }

    /// The staged value for a field, if any
    pub fn staged(&self, field: &str) -> Option<&Value> {
        match self.entries.get(field) {
            Some(entry) if entry.is_staged() => Some(entry.value()),
            _ => None,
        }
    }

    /// Cache a value that is pending its storage write
    pub fn insert_staged(&mut self, field: &str, value: Value) {
        self.entries.insert(field.to_string(), CacheEntry::Staged(value));
    }

    /// Cache a value that storage already holds
    pub fn insert_loaded(&mut self, field: &str, value: Value) {
        self.entries.insert(field.to_string(), CacheEntry::Loaded(value));
    }

    /// Mark a staged value as written; no-op for other states
    pub fn promote(&mut self, field: &str) {
        if let Some(entry) = self.entries.get_mut(field) {
            if let CacheEntry::Staged(v) = entry {
                let value = std::mem::take(v);
                *entry = CacheEntry::Loaded(value);
            }
        }
    }

    /// Drop one field's cached value, forcing the next read to hit storage
    pub fn clear(&mut self, field: &str) {
        self.entries.remove(field);
    }

    /// Drop every cached value
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Boundary trait implemented by host records
///
/// `read_reference`/`write_reference` cover the nullable text column holding
/// the storage key; `mark_changed` feeds the host's change tracking so the
/// key update is picked up by the surrounding creation transaction.
pub trait HostRecord {
    /// Read the reference column for a field (the stored key, if any)
    fn read_reference(&self, field: &str) -> Option<String>;

    /// Write (or clear) the reference column for a field
    fn write_reference(&mut self, field: &str, key: Option<&str>);

    /// Mark the reference column dirty for the host's change tracking
    fn mark_changed(&mut self, field: &str);

    /// Record identity, absent before creation
    fn id(&self) -> Option<String>;

    /// Whether the row exists in the relational store
    fn is_persisted(&self) -> bool;

    /// The record's decoded-value cache
    fn cache(&self) -> &FieldCache;

    /// Mutable access to the decoded-value cache
    fn cache_mut(&mut self) -> &mut FieldCache;
}
