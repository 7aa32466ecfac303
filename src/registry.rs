//! # Field Registry
//!
//! Per-record-type metadata: which fields are externalized, into which
//! bucket, under which key shape, in which format. Registration resolves
//! every option against the engine configuration up front, so a spec looked
//! up later is always complete.
//!
//! There is no code generation: the engine dispatches get/set by field name
//! through this table.

use std::fmt;

use crate::codec::Format;
use crate::config::EngineConfig;
use crate::error::{FieldError, FieldResult};
use crate::key::{default_deriver, KeyDeriver, StorageKey};
use crate::record::HostRecord;

/// Resolved metadata for one externalized field
pub struct FieldSpec<R> {
    name: String,
    bucket: String,
    deriver: KeyDeriver<R>,
    format: Format,
}

impl<R> FieldSpec<R> {
    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target bucket
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Key deriver
    pub fn deriver(&self) -> &KeyDeriver<R> {
        &self.deriver
    }

    /// Stored-blob format
    pub fn format(&self) -> Format {
        self.format
    }
}

impl<R> fmt::Debug for FieldSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("bucket", &self.bucket)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// Per-field registration options
///
/// Anything left unset falls back to the engine configuration: the default
/// bucket, the `{field}/{id}` key shape, the JSON format.
pub struct FieldOptions<R> {
    pub bucket: Option<String>,
    pub deriver: Option<KeyDeriver<R>>,
    pub format: Option<Format>,
}

impl<R> FieldOptions<R> {
    /// Options with every setting deferred to the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific bucket for this field
    pub fn bucket(mut self, name: impl Into<String>) -> Self {
        self.bucket = Some(name.into());
        self
    }

    /// Use a custom key deriver for this field
    pub fn key_deriver<F>(mut self, deriver: F) -> Self
    where
        F: Fn(&R) -> StorageKey + Send + Sync + 'static,
    {
        self.deriver = Some(std::sync::Arc::new(deriver));
        self
    }

    /// Use a specific blob format for this field
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }
}

impl<R> Default for FieldOptions<R> {
    fn default() -> Self {
        Self {
            bucket: None,
            deriver: None,
            format: None,
        }
    }
}

impl<R> fmt::Debug for FieldOptions<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldOptions")
            .field("bucket", &self.bucket)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// Registry of externalized fields for one record type
pub struct FieldRegistry<R> {
    fields: Vec<FieldSpec<R>>,
}

impl<R: HostRecord> FieldRegistry<R> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Register a field, resolving options against the configuration
    ///
    /// Fails with a configuration error when neither a per-field bucket nor
    /// a configured default bucket is available; the registry is left
    /// untouched in that case. Re-registering a field replaces its spec and
    /// keeps its original position.
    pub fn register(
        &mut self,
        config: &EngineConfig,
        name: &str,
        options: FieldOptions<R>,
    ) -> FieldResult<()> {
        let bucket = options
            .bucket
            .or_else(|| config.default_bucket.clone())
            .ok_or_else(|| {
                FieldError::configuration(format!(
                    "no default bucket configured for field '{}'",
                    name
                ))
            })?;

        let spec = FieldSpec {
            name: name.to_string(),
            bucket,
            deriver: options.deriver.unwrap_or_else(|| default_deriver(name)),
            format: options.format.unwrap_or_default(),
        };

        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        Ok(())
    }

    /// Look up the spec for a registered field
    pub fn lookup(&self, name: &str) -> FieldResult<&FieldSpec<R>> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| FieldError::not_registered(name))
    }

    /// Registered field names, in registration order
    pub fn list_fields(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// All registered specs, in registration order
    pub fn specs(&self) -> &[FieldSpec<R>] {
        &self.fields
    }
}

impl<R: HostRecord> Default for FieldRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for FieldRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("fields", &self.fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldCache;

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
    fn test_register_requires_a_bucket() {
        let mut registry = FieldRegistry::<Row>::new();
        let config = EngineConfig::default();

        let result = registry.register(&config, "extra_data", FieldOptions::new());
        assert!(matches!(result, Err(FieldError::Configuration(_))));
        assert!(registry.list_fields().is_empty());
    }

    #[test]
    fn test_explicit_bucket_without_default() {
        let mut registry = FieldRegistry::<Row>::new();
        let config = EngineConfig::default();

        registry
            .register(&config, "extra_data", FieldOptions::new().bucket("other"))
            .unwrap();
        assert_eq!(registry.lookup("extra_data").unwrap().bucket(), "other");
    }

    #[test]
    fn test_lookup_unregistered_fails() {
        let registry = FieldRegistry::<Row>::new();
        assert!(matches!(
            registry.lookup("nope"),
            Err(FieldError::NotRegistered(_))
        ));
    }

    #[test]
    fn test_list_fields_keeps_registration_order() {
        let mut registry = FieldRegistry::<Row>::new();
        let config = EngineConfig::with_default_bucket("test");

        registry.register(&config, "extra_data", FieldOptions::new()).unwrap();
        registry.register(&config, "options", FieldOptions::new()).unwrap();
        registry.register(&config, "metadata", FieldOptions::new()).unwrap();

        assert_eq!(registry.list_fields(), vec!["extra_data", "options", "metadata"]);
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let mut registry = FieldRegistry::<Row>::new();
        let config = EngineConfig::with_default_bucket("test");

        registry.register(&config, "extra_data", FieldOptions::new()).unwrap();
        registry.register(&config, "options", FieldOptions::new()).unwrap();
        registry
            .register(&config, "extra_data", FieldOptions::new().bucket("other"))
            .unwrap();

        assert_eq!(registry.list_fields(), vec!["extra_data", "options"]);
        assert_eq!(registry.lookup("extra_data").unwrap().bucket(), "other");
    }

    #[test]
    fn test_custom_deriver_is_used() {
        let mut registry = FieldRegistry::<Row>::new();
        let config = EngineConfig::with_default_bucket("test");

        registry
            .register(
                &config,
                "extra_data",
                FieldOptions::new().key_deriver(|_r: &Row| StorageKey::from("fixed/path")),
            )
            .unwrap();

        let spec = registry.lookup("extra_data").unwrap();
        assert_eq!((spec.deriver())(&Row::default()), StorageKey::from("fixed/path"));
    }
}
