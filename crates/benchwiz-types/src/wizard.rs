//! Wizard domain types.
//!
//! Step graphs (`WizardConfig`) are declarative data parsed once from JSON at
//! startup. Everything else in this module is request-scoped: the caller's
//! accumulated answers, the context handed to provider adapters, and the
//! response returned for a single wizard step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Step graph
// ---------------------------------------------------------------------------

/// A provider's wizard step graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardConfig {
    /// Provider key (e.g. "aws"). Matched case-insensitively.
    pub provider: String,
    /// Ordered steps. `steps[0]` is the initial step.
    pub steps: Vec<WizardConfigStep>,
}

impl WizardConfig {
    /// Look up a step by id.
    pub fn step(&self, id: &str) -> Option<&WizardConfigStep> {
        self.steps.iter().find(|s| s.id == id)
    }
}

/// A single node in a wizard step graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardConfigStep {
    /// Unique within the graph. Also the key of this step's answer in
    /// [`BenchmarkConfiguration`].
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub selection_type: SelectionType,
    /// Where this step's options come from. `None` marks a pass-through step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_source: Option<WizardStepOptionsSource>,
    /// Id of the step that follows. `None` marks a terminal step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
    /// Evaluated when navigation lands on this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<WizardStepConditional>,
}

impl WizardConfigStep {
    /// Whether this step presents options, either directly or through its
    /// conditional's success-path override.
    pub fn declares_options(&self) -> bool {
        self.options_source.is_some()
            || self
                .conditional
                .as_ref()
                .and_then(|c| c.then.as_ref())
                .is_some()
    }
}

/// How many options the user may pick at a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionType {
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "multi-select")]
    MultiSelect,
}

/// Source of a step's options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WizardStepOptionsSource {
    /// A fixed list declared in the step graph.
    Static { values: Vec<StaticOptionValue> },
    /// Options computed at request time by the provider adapter.
    Dynamic { method: String },
}

/// A fixed option declared in a step graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticOptionValue {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_logo_url: Option<String>,
}

/// Conditional attached to a destination step.
///
/// `when` is handed verbatim to the provider adapter's condition evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardStepConditional {
    pub when: String,
    /// Applied when `when` holds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<ConditionalThen>,
    /// Applied when `when` does not hold.
    #[serde(
        default,
        rename = "else",
        skip_serializing_if = "Option::is_none"
    )]
    pub otherwise: Option<ConditionalElse>,
}

/// Success path: replace the step's options source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalThen {
    pub options_source: WizardStepOptionsSource,
}

/// Failure path: show another step instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalElse {
    pub next_step: String,
}

// ---------------------------------------------------------------------------
// Request-scoped types
// ---------------------------------------------------------------------------

/// The caller's answers so far: step id -> selected option ids.
pub type BenchmarkConfiguration = BTreeMap<String, Vec<String>>;

/// Read-only bundle passed to every adapter call.
#[derive(Debug, Clone, Default)]
pub struct WizardContext {
    /// Lower-cased provider key.
    pub provider: String,
    pub project_id: Option<String>,
    pub benchmark_configuration: BenchmarkConfiguration,
}

impl WizardContext {
    /// First option selected at `step_id`, if any.
    pub fn first_answer(&self, step_id: &str) -> Option<&str> {
        self.benchmark_configuration
            .get(step_id)
            .and_then(|answers| answers.first())
            .map(String::as_str)
            .filter(|answer| !answer.is_empty())
    }
}

/// An option as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkWizardOption {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl From<&StaticOptionValue> for BenchmarkWizardOption {
    fn from(value: &StaticOptionValue) -> Self {
        Self {
            id: value.id.clone(),
            display_name: value.display_name.clone(),
            image_logo_url: value.image_logo_url.clone(),
            metadata: None,
        }
    }
}

/// Body of a wizard step request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardStepRequest {
    /// Id of the step the user just completed. `None` starts the wizard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark_configuration: Option<BenchmarkConfiguration>,
}

/// The step the caller should show next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardStepResponse {
    pub current_step: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Always serialized; `null` on the terminal step.
    pub next_step: Option<String>,
    pub selection_type: SelectionType,
    pub options: Vec<BenchmarkWizardOption>,
    pub total_steps: usize,
    pub step_index: usize,
}
