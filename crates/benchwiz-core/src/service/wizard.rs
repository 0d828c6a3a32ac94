//! Wizard orchestration service.
//!
//! Entry point of the engine: validates the provider, loads its step graph,
//! resolves the step to show, resolves that step's options, computes progress,
//! and assembles the response. Every call is stateless; the caller resends its
//! accumulated answers each time.

use std::sync::Arc;

use benchwiz_types::error::WizardError;
use benchwiz_types::wizard::{WizardContext, WizardStepRequest, WizardStepResponse};

use crate::adapter::normalize_provider;
use crate::adapter::registry::AdapterRegistry;
use crate::config_store::WizardConfigStore;
use crate::navigation::resolve_step;
use crate::options::{compute_progress, resolve_options};

/// Service answering wizard step requests.
///
/// Holds the config store and adapter registry built once at startup; both
/// are read-only, so one service instance serves concurrent requests.
pub struct WizardService {
    configs: Arc<WizardConfigStore>,
    registry: Arc<AdapterRegistry>,
}

impl WizardService {
    pub fn new(configs: Arc<WizardConfigStore>, registry: Arc<AdapterRegistry>) -> Self {
        Self { configs, registry }
    }

    /// Providers with a configured wizard.
    pub fn providers(&self) -> Vec<&str> {
        self.configs.providers()
    }

    /// Compute the step the caller should see next.
    ///
    /// Fails as a whole: there is no partial response when option resolution
    /// fails.
    #[tracing::instrument(
        name = "get_wizard_step",
        skip(self, request),
        fields(current_step = request.current_step.as_deref().unwrap_or(""))
    )]
    pub async fn get_wizard_step(
        &self,
        provider: &str,
        request: WizardStepRequest,
        project_id: &str,
    ) -> Result<WizardStepResponse, WizardError> {
        let config = self.configs.get(provider)?;
        let adapter = self.registry.get(provider)?;

        let project_id = project_id.trim();
        let context = WizardContext {
            provider: normalize_provider(provider),
            project_id: (!project_id.is_empty()).then(|| project_id.to_string()),
            benchmark_configuration: request.benchmark_configuration.unwrap_or_default(),
        };

        let resolved =
            resolve_step(config, request.current_step.as_deref(), adapter, &context).await?;
        let options = resolve_options(resolved.options_source, &self.registry, &context).await?;
        let progress = compute_progress(config, &resolved.step.id)?;

        tracing::info!(
            step = %resolved.step.id,
            options = options.len(),
            step_index = progress.step_index,
            total_steps = progress.total_steps,
            "Resolved wizard step"
        );

        let step = resolved.step;
        Ok(WizardStepResponse {
            current_step: step.id.clone(),
            title: step.title.clone(),
            description: step.description.clone(),
            next_step: step.next_step.clone(),
            selection_type: step.selection_type,
            options,
            total_steps: progress.total_steps,
            step_index: progress.step_index,
        })
    }
}
