//! Step navigation over a provider's wizard graph.
//!
//! Given the id of the step the caller just completed, decide which step to
//! show next. Transitions follow `nextStep` pointers; a destination step with a
//! `conditional` is checked through the provider adapter before it is shown:
//!
//! - condition holds: land on it, with `then.optionsSource` replacing its
//!   options when present
//! - condition fails with `else.nextStep`: redirect there (and check that
//!   step's conditional in turn)
//! - condition fails without `else`: land on it with its own options
//!
//! The initial step and a re-requested terminal step are never redirected;
//! only their option override is applied.

use std::collections::HashSet;

use benchwiz_types::error::WizardError;
use benchwiz_types::wizard::{
    WizardConfig, WizardConfigStep, WizardContext, WizardStepOptionsSource,
};

use crate::adapter::box_adapter::BoxProviderAdapter;

/// The step to show and the options source that applies to it.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedStep<'a> {
    pub step: &'a WizardConfigStep,
    pub options_source: Option<&'a WizardStepOptionsSource>,
}

impl<'a> ResolvedStep<'a> {
    fn plain(step: &'a WizardConfigStep) -> Self {
        Self {
            step,
            options_source: step.options_source.as_ref(),
        }
    }
}

/// Resolve the step to show after `current_step`.
///
/// - `None` -> `steps[0]`
/// - unknown id -> [`WizardError::UnknownStep`]
/// - terminal step -> the same step again
///
/// Reads the graph and context only; calling it twice with the same inputs
/// yields the same step.
pub async fn resolve_step<'a>(
    config: &'a WizardConfig,
    current_step: Option<&str>,
    adapter: &BoxProviderAdapter,
    context: &WizardContext,
) -> Result<ResolvedStep<'a>, WizardError> {
    let Some(current_id) = current_step else {
        let first = config.steps.first().ok_or_else(|| {
            WizardError::InvalidConfig(format!(
                "wizard for provider '{}' has no steps",
                config.provider
            ))
        })?;
        return land(first, adapter, context).await;
    };

    let current = config
        .step(current_id)
        .ok_or_else(|| WizardError::UnknownStep(current_id.to_string()))?;

    let Some(next_id) = current.next_step.as_deref() else {
        tracing::debug!(step = %current.id, "Terminal step re-requested");
        return land(current, adapter, context).await;
    };

    let mut target = lookup(config, &current.id, next_id)?;
    let mut visited = HashSet::new();

    loop {
        if !visited.insert(target.id.as_str()) {
            return Err(WizardError::ConditionalLoop(target.id.clone()));
        }

        let Some(conditional) = &target.conditional else {
            return Ok(ResolvedStep::plain(target));
        };

        let holds = adapter.evaluate(&conditional.when, context).await?;
        tracing::debug!(
            step = %target.id,
            condition = %conditional.when,
            holds,
            "Evaluated step conditional"
        );

        match (holds, &conditional.then, &conditional.otherwise) {
            (true, Some(then), _) => {
                return Ok(ResolvedStep {
                    step: target,
                    options_source: Some(&then.options_source),
                });
            }
            (true, None, _) | (false, _, None) => return Ok(ResolvedStep::plain(target)),
            (false, _, Some(otherwise)) => {
                let redirected = lookup(config, &target.id, &otherwise.next_step)?;
                target = redirected;
            }
        }
    }
}

fn lookup<'a>(
    config: &'a WizardConfig,
    from: &str,
    target: &str,
) -> Result<&'a WizardConfigStep, WizardError> {
    config.step(target).ok_or_else(|| WizardError::DanglingStep {
        from: from.to_string(),
        target: target.to_string(),
    })
}

/// Show `step` without redirecting, applying only its option override.
async fn land<'a>(
    step: &'a WizardConfigStep,
    adapter: &BoxProviderAdapter,
    context: &WizardContext,
) -> Result<ResolvedStep<'a>, WizardError> {
    let Some(conditional) = &step.conditional else {
        return Ok(ResolvedStep::plain(step));
    };
    let Some(then) = &conditional.then else {
        return Ok(ResolvedStep::plain(step));
    };

    if adapter.evaluate(&conditional.when, context).await? {
        Ok(ResolvedStep {
            step,
            options_source: Some(&then.options_source),
        })
    } else {
        Ok(ResolvedStep::plain(step))
    }
}
