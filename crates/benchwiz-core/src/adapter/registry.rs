//! Adapter registry for runtime provider lookup.
//!
//! Built once in the composition root and then shared read-only, so
//! concurrent requests look adapters up without locking.

use std::collections::HashMap;

use benchwiz_types::error::WizardError;

use super::box_adapter::BoxProviderAdapter;
use super::normalize_provider;

/// Registry of provider adapters, indexed by lower-cased provider key.
pub struct AdapterRegistry {
    adapters: HashMap<String, BoxProviderAdapter>,
}

impl AdapterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Register an adapter under the given provider key.
    ///
    /// If an adapter with this key already exists, it is replaced.
    pub fn register(&mut self, provider: &str, adapter: BoxProviderAdapter) {
        let key = normalize_provider(provider);
        tracing::debug!(provider = %key, "Registered wizard adapter");
        self.adapters.insert(key, adapter);
    }

    /// Look up the adapter for `provider` (case-insensitive).
    pub fn get(&self, provider: &str) -> Result<&BoxProviderAdapter, WizardError> {
        self.adapters
            .get(&normalize_provider(provider))
            .ok_or_else(|| WizardError::AdapterNotRegistered(provider.to_string()))
    }

    /// List all registered provider keys, sorted.
    pub fn providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.adapters.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticAdapter;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut registry = AdapterRegistry::new();
        registry.register("AWS", BoxProviderAdapter::new(StaticAdapter::new("aws")));

        assert_eq!(registry.get("aws").unwrap().provider(), "aws");
        assert_eq!(registry.get("Aws").unwrap().provider(), "aws");
        assert_eq!(registry.providers(), vec!["aws"]);
    }

    #[test]
    fn test_unregistered_provider_is_named_in_error() {
        let registry = AdapterRegistry::default();
        let err = registry.get("gcp").err().unwrap();
        assert!(matches!(err, WizardError::AdapterNotRegistered(ref p) if p == "gcp"));
        assert!(err.to_string().contains("gcp"));
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = AdapterRegistry::new();
        registry.register("aws", BoxProviderAdapter::new(StaticAdapter::new("aws")));
        registry.register(
            "aws",
            BoxProviderAdapter::new(StaticAdapter::new("aws").with_method("listRegions")),
        );

        assert!(registry.get("aws").unwrap().supports_method("listRegions"));
        assert_eq!(registry.providers().len(), 1);
    }
}
