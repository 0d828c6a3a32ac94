//! Option resolution and progress counting for a wizard step.

use benchwiz_types::error::WizardError;
use benchwiz_types::wizard::{
    BenchmarkWizardOption, WizardConfig, WizardContext, WizardStepOptionsSource,
};

use crate::adapter::registry::AdapterRegistry;

/// Resolve the options a step presents.
///
/// - no source: pass-through step, no options
/// - static: the declared values, verbatim
/// - dynamic: delegated to the adapter registered for `context.provider`
pub async fn resolve_options(
    source: Option<&WizardStepOptionsSource>,
    registry: &AdapterRegistry,
    context: &WizardContext,
) -> Result<Vec<BenchmarkWizardOption>, WizardError> {
    match source {
        None => Ok(Vec::new()),
        Some(WizardStepOptionsSource::Static { values }) => {
            Ok(values.iter().map(BenchmarkWizardOption::from).collect())
        }
        Some(WizardStepOptionsSource::Dynamic { method }) => {
            let adapter = registry.get(&context.provider)?;
            let options = adapter.resolve_options(method, context).await?;
            tracing::debug!(
                provider = %context.provider,
                method = %method,
                count = options.len(),
                "Resolved dynamic options"
            );
            Ok(options)
        }
    }
}

/// Position of a step among the steps that present options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepProgress {
    pub total_steps: usize,
    /// 1-based for option-bearing steps. A pass-through step reports the
    /// number of option-bearing steps before it.
    pub step_index: usize,
}

/// Compute progress for `step_id` within `config`.
///
/// Pass-through steps (no options source and no conditional override)
/// contribute nothing to `total_steps`.
pub fn compute_progress(config: &WizardConfig, step_id: &str) -> Result<StepProgress, WizardError> {
    let position = config
        .steps
        .iter()
        .position(|s| s.id == step_id)
        .ok_or_else(|| WizardError::UnknownStep(step_id.to_string()))?;

    let total_steps = config.steps.iter().filter(|s| s.declares_options()).count();
    let step_index = config.steps[..=position]
        .iter()
        .filter(|s| s.declares_options())
        .count();

    Ok(StepProgress {
        total_steps,
        step_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::box_adapter::BoxProviderAdapter;
    use crate::test_support::{option, StaticAdapter};
    use benchwiz_types::wizard::StaticOptionValue;
    use serde_json::json;

    fn ctx() -> WizardContext {
        WizardContext {
            provider: "aws".to_string(),
            ..WizardContext::default()
        }
    }

    fn graph() -> WizardConfig {
        serde_json::from_value(json!({
            "provider": "aws",
            "steps": [
                { "id": "intro", "title": "Intro", "selectionType": "single", "nextStep": "s1" },
                { "id": "s1", "title": "One", "selectionType": "single",
                  "optionsSource": { "type": "dynamic", "method": "listConnections" }, "nextStep": "pause" },
                { "id": "pause", "title": "Pause", "selectionType": "single", "nextStep": "s2" },
                { "id": "s2", "title": "Two", "selectionType": "single",
                  "optionsSource": { "type": "static", "values": [] } }
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_absent_source_yields_no_options() {
        let registry = AdapterRegistry::new();
        let options = resolve_options(None, &registry, &ctx()).await.unwrap();
        assert!(options.is_empty());
    }

    #[tokio::test]
    async fn test_static_values_are_copied_verbatim() {
        let source = WizardStepOptionsSource::Static {
            values: vec![
                StaticOptionValue {
                    id: "x86".to_string(),
                    display_name: "x86_64".to_string(),
                    image_logo_url: Some("https://cdn.example.com/x86.svg".to_string()),
                },
                StaticOptionValue {
                    id: "arm".to_string(),
                    display_name: "ARM64".to_string(),
                    image_logo_url: None,
                },
            ],
        };
        let options = resolve_options(Some(&source), &AdapterRegistry::new(), &ctx())
            .await
            .unwrap();

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].image_logo_url.as_deref(), Some("https://cdn.example.com/x86.svg"));
        assert!(options[1].image_logo_url.is_none());
        assert!(options.iter().all(|o| o.metadata.is_none()));
    }

    #[tokio::test]
    async fn test_dynamic_source_delegates_to_adapter() {
        let mut registry = AdapterRegistry::new();
        registry.register(
            "aws",
            BoxProviderAdapter::new(
                StaticAdapter::new("aws").with_options("listConnections", vec![option("conn-1")]),
            ),
        );
        let source = WizardStepOptionsSource::Dynamic {
            method: "listConnections".to_string(),
        };

        let options = resolve_options(Some(&source), &registry, &ctx()).await.unwrap();
        assert_eq!(options, vec![option("conn-1")]);
    }

    #[tokio::test]
    async fn test_dynamic_source_without_adapter_fails() {
        let source = WizardStepOptionsSource::Dynamic {
            method: "listConnections".to_string(),
        };
        let err = resolve_options(Some(&source), &AdapterRegistry::new(), &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, WizardError::AdapterNotRegistered(_)));
    }

    #[test]
    fn test_progress_skips_pass_through_steps() {
        let config = graph();
        assert_eq!(
            compute_progress(&config, "s1").unwrap(),
            StepProgress { total_steps: 2, step_index: 1 }
        );
        assert_eq!(
            compute_progress(&config, "s2").unwrap(),
            StepProgress { total_steps: 2, step_index: 2 }
        );
    }

    #[test]
    fn test_progress_of_pass_through_steps() {
        let config = graph();
        assert_eq!(compute_progress(&config, "intro").unwrap().step_index, 0);
        assert_eq!(compute_progress(&config, "pause").unwrap().step_index, 1);
    }

    #[test]
    fn test_progress_of_unknown_step_fails() {
        assert!(matches!(
            compute_progress(&graph(), "nope").unwrap_err(),
            WizardError::UnknownStep(_)
        ));
    }
}
