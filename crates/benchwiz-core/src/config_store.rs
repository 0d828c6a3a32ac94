//! Wizard step graph parsing, validation, and lookup.
//!
//! Step graphs are declarative JSON, one per provider. They are parsed and
//! validated once at startup into a [`WizardConfigStore`], which is read-only
//! afterwards and safe to share across concurrent requests.

use std::collections::{HashMap, HashSet};

use benchwiz_types::error::WizardError;
use benchwiz_types::wizard::{WizardConfig, WizardStepOptionsSource};

use crate::adapter::normalize_provider;
use crate::adapter::registry::AdapterRegistry;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a JSON string into a validated `WizardConfig`.
pub fn parse_wizard_config_json(json: &str) -> Result<WizardConfig, WizardError> {
    let config: WizardConfig =
        serde_json::from_str(json).map_err(|e| WizardError::InvalidConfig(e.to_string()))?;
    validate_wizard_config(&config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate structural constraints on a `WizardConfig`.
///
/// Checks:
/// - Provider is non-empty and at least one step exists
/// - All step ids are non-empty and unique
/// - Every `nextStep` and conditional `else.nextStep` names an existing step
/// - Every conditional has a non-empty `when` and at least one branch
pub fn validate_wizard_config(config: &WizardConfig) -> Result<(), WizardError> {
    if config.provider.trim().is_empty() {
        return Err(WizardError::InvalidConfig(
            "provider must not be empty".to_string(),
        ));
    }

    if config.steps.is_empty() {
        return Err(WizardError::InvalidConfig(format!(
            "wizard for provider '{}' must have at least one step",
            config.provider
        )));
    }

    let mut ids = HashSet::new();
    for step in &config.steps {
        if step.id.is_empty() {
            return Err(WizardError::InvalidConfig(format!(
                "wizard for provider '{}' has a step with an empty id",
                config.provider
            )));
        }
        if !ids.insert(step.id.as_str()) {
            return Err(WizardError::InvalidConfig(format!(
                "duplicate step id: '{}'",
                step.id
            )));
        }
    }

    for step in &config.steps {
        if let Some(next) = &step.next_step {
            if !ids.contains(next.as_str()) {
                return Err(WizardError::DanglingStep {
                    from: step.id.clone(),
                    target: next.clone(),
                });
            }
        }

        if let Some(conditional) = &step.conditional {
            if conditional.when.trim().is_empty() {
                return Err(WizardError::InvalidConfig(format!(
                    "step '{}' has a conditional with an empty 'when'",
                    step.id
                )));
            }
            if conditional.then.is_none() && conditional.otherwise.is_none() {
                return Err(WizardError::InvalidConfig(format!(
                    "step '{}' has a conditional with neither 'then' nor 'else'",
                    step.id
                )));
            }
            if let Some(otherwise) = &conditional.otherwise {
                if !ids.contains(otherwise.next_step.as_str()) {
                    return Err(WizardError::DanglingStep {
                        from: step.id.clone(),
                        target: otherwise.next_step.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Dynamic method names referenced by a graph, including conditional overrides.
fn dynamic_methods(config: &WizardConfig) -> impl Iterator<Item = (&str, &str)> {
    config.steps.iter().flat_map(|step| {
        let base = step.options_source.as_ref();
        let overridden = step
            .conditional
            .as_ref()
            .and_then(|c| c.then.as_ref())
            .map(|t| &t.options_source);
        base.into_iter()
            .chain(overridden)
            .filter_map(move |source| match source {
                WizardStepOptionsSource::Dynamic { method } => {
                    Some((step.id.as_str(), method.as_str()))
                }
                WizardStepOptionsSource::Static { .. } => None,
            })
    })
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Validated step graphs indexed by lower-cased provider key.
#[derive(Debug, Default)]
pub struct WizardConfigStore {
    configs: HashMap<String, WizardConfig>,
}

impl WizardConfigStore {
    /// Build a store from parsed graphs, validating each one.
    ///
    /// Two graphs for the same provider (case-insensitive) are rejected.
    pub fn new(configs: Vec<WizardConfig>) -> Result<Self, WizardError> {
        let mut map = HashMap::with_capacity(configs.len());
        for config in configs {
            validate_wizard_config(&config)?;
            let key = normalize_provider(&config.provider);
            if map.contains_key(&key) {
                return Err(WizardError::InvalidConfig(format!(
                    "duplicate wizard configuration for provider '{key}'"
                )));
            }
            map.insert(key, config);
        }
        Ok(Self { configs: map })
    }

    /// Look up the graph for `provider` (case-insensitive).
    pub fn get(&self, provider: &str) -> Result<&WizardConfig, WizardError> {
        self.configs
            .get(&normalize_provider(provider))
            .ok_or_else(|| WizardError::ProviderNotFound(provider.to_string()))
    }

    /// Configured provider keys, sorted.
    pub fn providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.configs.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Check every graph against the adapters that will serve it.
    ///
    /// Each provider needs a registered adapter, every dynamic method must be
    /// supported by that adapter, and every conditional `when` must be one the
    /// adapter evaluates.
    pub fn validate_against(&self, registry: &AdapterRegistry) -> Result<(), WizardError> {
        for (provider, config) in &self.configs {
            let adapter = registry.get(provider)?;

            for (step_id, method) in dynamic_methods(config) {
                if !adapter.supports_method(method) {
                    tracing::warn!(provider = %provider, step = step_id, method, "Unknown dynamic method");
                    return Err(WizardError::MethodNotImplemented {
                        provider: provider.clone(),
                        method: method.to_string(),
                    });
                }
            }

            let has_conditionals = config.steps.iter().any(|s| s.conditional.is_some());
            if has_conditionals && !adapter.supports_conditions() {
                return Err(WizardError::ConditionsNotSupported(provider.clone()));
            }

            for step in &config.steps {
                if let Some(conditional) = &step.conditional {
                    if let Err(e) = adapter.check_condition(&conditional.when, config) {
                        tracing::warn!(
                            provider = %provider,
                            step = %step.id,
                            condition = %conditional.when,
                            "Unknown step condition"
                        );
                        return Err(e);
                    }
                }
            }
        }
        Ok(())
    }
}
