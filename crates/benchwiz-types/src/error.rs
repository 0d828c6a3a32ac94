use thiserror::Error;

/// Errors surfaced by the wizard engine.
///
/// Every variant except [`WizardError::ConnectionStore`] is a validation
/// error: the caller's request (or the step graph) is malformed. None of them
/// carry retry semantics.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Wizard configuration not found for provider: {0}")]
    ProviderNotFound(String),

    #[error("No wizard adapter registered for provider: {0}")]
    AdapterNotRegistered(String),

    #[error("Unknown step: {0}")]
    UnknownStep(String),

    #[error("Step {from} points to unknown step: {target}")]
    DanglingStep { from: String, target: String },

    #[error("Method {method} not implemented for provider {provider}")]
    MethodNotImplemented { provider: String, method: String },

    #[error("Condition {condition} not implemented for provider {provider}")]
    ConditionNotImplemented { provider: String, condition: String },

    #[error("Conditional steps are not supported for provider {0}")]
    ConditionsNotSupported(String),

    #[error("{0}")]
    MissingPrerequisite(String),

    #[error("invalid wizard configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid connection value: {0}")]
    InvalidConnectionValue(String),

    #[error("conditional steps loop back to step {0}")]
    ConditionalLoop(String),

    #[error("connection store error: {0}")]
    ConnectionStore(#[from] ConnectionStoreError),
}

impl WizardError {
    /// True for caller/configuration mistakes, false for collaborator failures.
    pub fn is_validation(&self) -> bool {
        !matches!(self, WizardError::ConnectionStore(_))
    }
}

/// Errors from the external connection store.
#[derive(Debug, Error)]
pub enum ConnectionStoreError {
    #[error("connection not found: {0}")]
    NotFound(String),

    #[error("connection store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to decode connection store response: {0}")]
    Decode(String),
}
