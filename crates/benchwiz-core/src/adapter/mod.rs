//! Provider adapters for the wizard engine.
//!
//! - `ProviderAdapter`: RPITIT trait for provider-specific behaviour
//! - `BoxProviderAdapter`: object-safe wrapper for dynamic dispatch
//! - `AdapterRegistry`: provider key -> adapter lookup
//! - `aws`: the AWS adapter, backed by a `ConnectionStore`

pub mod aws;
pub mod box_adapter;
pub mod provider;
pub mod registry;

/// Normalize a provider key for lookups.
pub(crate) fn normalize_provider(provider: &str) -> String {
    provider.trim().to_lowercase()
}
