//! BoxProviderAdapter -- object-safe dynamic dispatch wrapper for ProviderAdapter.
//!
//! 1. Define an object-safe `ProviderAdapterDyn` trait with boxed futures
//! 2. Blanket-impl `ProviderAdapterDyn` for all `T: ProviderAdapter`
//! 3. `BoxProviderAdapter` wraps `Box<dyn ProviderAdapterDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use benchwiz_types::error::WizardError;
use benchwiz_types::wizard::{BenchmarkWizardOption, WizardConfig, WizardContext};

use super::provider::ProviderAdapter;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of [`ProviderAdapter`] with boxed futures.
///
/// A blanket implementation is provided for all types implementing
/// `ProviderAdapter`.
pub trait ProviderAdapterDyn: Send + Sync {
    fn provider(&self) -> &str;

    fn supports_method(&self, method: &str) -> bool;

    fn supports_conditions(&self) -> bool;

    fn check_condition(&self, condition: &str, config: &WizardConfig) -> Result<(), WizardError>;

    fn resolve_options_boxed<'a>(
        &'a self,
        method: &'a str,
        context: &'a WizardContext,
    ) -> BoxFuture<'a, Result<Vec<BenchmarkWizardOption>, WizardError>>;

    fn evaluate_boxed<'a>(
        &'a self,
        condition: &'a str,
        context: &'a WizardContext,
    ) -> BoxFuture<'a, Result<bool, WizardError>>;
}

impl<T: ProviderAdapter> ProviderAdapterDyn for T {
    fn provider(&self) -> &str {
        ProviderAdapter::provider(self)
    }

    fn supports_method(&self, method: &str) -> bool {
        ProviderAdapter::supports_method(self, method)
    }

    fn supports_conditions(&self) -> bool {
        ProviderAdapter::supports_conditions(self)
    }

    fn check_condition(&self, condition: &str, config: &WizardConfig) -> Result<(), WizardError> {
        ProviderAdapter::check_condition(self, condition, config)
    }

    fn resolve_options_boxed<'a>(
        &'a self,
        method: &'a str,
        context: &'a WizardContext,
    ) -> BoxFuture<'a, Result<Vec<BenchmarkWizardOption>, WizardError>> {
        Box::pin(self.resolve_options(method, context))
    }

    fn evaluate_boxed<'a>(
        &'a self,
        condition: &'a str,
        context: &'a WizardContext,
    ) -> BoxFuture<'a, Result<bool, WizardError>> {
        Box::pin(self.evaluate(condition, context))
    }
}

/// Type-erased provider adapter for the registry.
///
/// Since `ProviderAdapter` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxProviderAdapter` provides equivalent methods that delegate to
/// the inner `ProviderAdapterDyn` trait object.
pub struct BoxProviderAdapter {
    inner: Box<dyn ProviderAdapterDyn + Send + Sync>,
}

impl BoxProviderAdapter {
    /// Wrap a concrete `ProviderAdapter` in a type-erased box.
    pub fn new<T: ProviderAdapter + 'static>(adapter: T) -> Self {
        Self {
            inner: Box::new(adapter),
        }
    }

    pub fn provider(&self) -> &str {
        self.inner.provider()
    }

    pub fn supports_method(&self, method: &str) -> bool {
        self.inner.supports_method(method)
    }

    pub fn supports_conditions(&self) -> bool {
        self.inner.supports_conditions()
    }

    pub fn check_condition(
        &self,
        condition: &str,
        config: &WizardConfig,
    ) -> Result<(), WizardError> {
        self.inner.check_condition(condition, config)
    }

    pub async fn resolve_options(
        &self,
        method: &str,
        context: &WizardContext,
    ) -> Result<Vec<BenchmarkWizardOption>, WizardError> {
        self.inner.resolve_options_boxed(method, context).await
    }

    pub async fn evaluate(
        &self,
        condition: &str,
        context: &WizardContext,
    ) -> Result<bool, WizardError> {
        self.inner.evaluate_boxed(condition, context).await
    }
}
