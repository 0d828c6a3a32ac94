//! ProviderAdapter trait definition.
//!
//! Each provider (e.g. "aws") contributes one adapter that interprets the
//! dynamic option methods and condition expressions named in its step graph.
//! The engine never special-cases method or condition names itself.

use std::future::Future;

use benchwiz_types::error::WizardError;
use benchwiz_types::wizard::{BenchmarkWizardOption, WizardConfig, WizardContext};

/// Provider-specific option resolution and condition evaluation.
///
/// Uses native async fn in traits (RPITIT). Wrap implementations in
/// [`BoxProviderAdapter`](super::box_adapter::BoxProviderAdapter) to store
/// them in the [`AdapterRegistry`](super::registry::AdapterRegistry).
pub trait ProviderAdapter: Send + Sync {
    /// Provider key this adapter serves (lower case).
    fn provider(&self) -> &str;

    /// Whether `method` names a dynamic option method this adapter implements.
    ///
    /// Used to reject step graphs that reference unknown methods at startup.
    fn supports_method(&self, method: &str) -> bool;

    /// Resolve the options of a dynamic step.
    ///
    /// Unknown methods fail with [`WizardError::MethodNotImplemented`].
    fn resolve_options(
        &self,
        method: &str,
        context: &WizardContext,
    ) -> impl Future<Output = Result<Vec<BenchmarkWizardOption>, WizardError>> + Send;

    /// Whether [`evaluate`](Self::evaluate) is implemented.
    fn supports_conditions(&self) -> bool {
        false
    }

    /// Check at startup that `condition` is one this adapter evaluates for
    /// the graph `config`.
    ///
    /// Unknown conditions fail with [`WizardError::ConditionNotImplemented`].
    /// The default fails with [`WizardError::ConditionsNotSupported`].
    fn check_condition(&self, condition: &str, config: &WizardConfig) -> Result<(), WizardError> {
        let _ = (condition, config);
        Err(WizardError::ConditionsNotSupported(self.provider().to_string()))
    }

    /// Evaluate a step conditional's `when` expression.
    ///
    /// Adapters without condition support keep this default, which fails with
    /// [`WizardError::ConditionsNotSupported`].
    fn evaluate(
        &self,
        condition: &str,
        context: &WizardContext,
    ) -> impl Future<Output = Result<bool, WizardError>> + Send {
        let _ = (condition, context);
        let provider = self.provider().to_string();
        async move { Err(WizardError::ConditionsNotSupported(provider)) }
    }
}
