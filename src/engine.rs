//! # Field Engine
//!
//! Ties the pieces together for one record type: the configuration, the
//! field registry, and the injected object-store handle. The engine runs
//! synchronously on the caller's thread; the store handle is an explicit
//! `Arc`, shared rather than hidden in thread-local state.

use std::fmt;
use std::sync::Arc;

use crate::accessor::RetryPolicy;
use crate::config::EngineConfig;
use crate::error::FieldResult;
use crate::record::HostRecord;
use crate::registry::{FieldOptions, FieldRegistry};
use crate::store::ObjectStore;

/// Externalized-field engine for one record type
pub struct FieldEngine<R> {
    pub(crate) config: EngineConfig,
    pub(crate) registry: FieldRegistry<R>,
    pub(crate) store: Arc<dyn ObjectStore>,
    pub(crate) retry: RetryPolicy,
    pub(crate) upload_on_create: bool,
}

impl<R: HostRecord> FieldEngine<R> {
    /// Create an engine over a store handle with the given configuration
    pub fn new(store: Arc<dyn ObjectStore>, config: EngineConfig) -> Self {
        Self {
            config,
            registry: FieldRegistry::new(),
            store,
            retry: RetryPolicy::default(),
            upload_on_create: true,
        }
    }

    /// Override the read-retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Toggle upload-on-create for this record type
    pub fn with_upload_on_create(mut self, enabled: bool) -> Self {
        self.upload_on_create = enabled;
        self
    }

    /// Whether staged fields are written out during record creation
    pub fn uploads_on_create(&self) -> bool {
        self.upload_on_create
    }

    /// Register an externalized field
    ///
    /// See [`FieldRegistry::register`] for bucket resolution and
    /// re-registration semantics.
    pub fn register(&mut self, field: &str, options: FieldOptions<R>) -> FieldResult<()> {
        self.registry.register(&self.config, field, options)
    }

    /// Registered field names, in registration order
    pub fn list_fields(&self) -> Vec<&str> {
        self.registry.list_fields()
    }

    /// The engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The field registry
    pub fn registry(&self) -> &FieldRegistry<R> {
        &self.registry
    }

    /// The injected store handle
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }
}

impl<R> fmt::Debug for FieldEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEngine")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("store", &self.store)
            .field("retry", &self.retry)
            .field("upload_on_create", &self.upload_on_create)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldCache;
    use crate::store::MemoryStore;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct Row {
        cache: FieldCache,
    }

    impl HostRecord for Row {
        fn read_reference(&self, _field: &str) -> Option<String> {
            None
        }
        fn write_reference(&mut self, _field: &str, _key: Option<&str>) {}
        fn mark_changed(&mut self, _field: &str) {}
        fn id(&self) -> Option<String> {
            None
        }
        fn is_persisted(&self) -> bool {
            false
        }
        fn cache(&self) -> &FieldCache {
            &self.cache
        }
        fn cache_mut(&mut self) -> &mut FieldCache {
            &mut self.cache
        }
    }

    #[test]
    fn test_register_and_list() {
        let mut engine: FieldEngine<Row> = FieldEngine::new(
            Arc::new(MemoryStore::new()),
            EngineConfig::with_default_bucket("test"),
        );
        engine.register("extra_data", FieldOptions::new()).unwrap();
        engine.register("options", FieldOptions::new()).unwrap();

        assert_eq!(engine.list_fields(), vec!["extra_data", "options"]);
    }

    #[test]
    fn test_retry_policy_override() {
        let engine: FieldEngine<Row> = FieldEngine::new(
            Arc::new(MemoryStore::new()),
            EngineConfig::with_default_bucket("test"),
        )
        .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(5)));

        assert_eq!(engine.retry.attempts, 3);
    }
}
