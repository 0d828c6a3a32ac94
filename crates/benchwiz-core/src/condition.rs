//! Dotted-path conditions over the caller's benchmark configuration.
//!
//! A condition such as `connection` or `!accounts.0` is a path into the
//! answers map rendered as JSON: the first segment is a step id, further
//! segments index into the answer list. The condition holds when the value
//! found is truthy; a leading `!` negates it.
//!
//! Adapters use this as their fallback for conditions they do not handle
//! themselves.

use serde_json::Value;

use benchwiz_types::error::WizardError;
use benchwiz_types::wizard::BenchmarkConfiguration;

/// A parsed `[!]segment(.segment)*` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationPath {
    negated: bool,
    segments: Vec<String>,
}

impl ConfigurationPath {
    /// Parse a condition expression.
    pub fn parse(expression: &str) -> Result<Self, WizardError> {
        let trimmed = expression.trim();
        let (negated, path) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        let segments: Vec<String> = path.split('.').map(|s| s.trim().to_string()).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(WizardError::InvalidConfig(format!(
                "invalid condition path: '{expression}'"
            )));
        }

        Ok(Self { negated, segments })
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Evaluate against the caller's answers. Never fails: a missing path is
    /// simply falsy.
    pub fn evaluate(&self, configuration: &BenchmarkConfiguration) -> bool {
        let root = Value::Object(
            configuration
                .iter()
                .map(|(step, answers)| (step.clone(), Value::from(answers.clone())))
                .collect(),
        );

        let holds = lookup(&root, &self.segments).is_some_and(is_truthy);
        holds != self.negated
    }
}

fn lookup<'a>(root: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments.iter().try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Truthiness of an answer value. Unlike JavaScript, empty lists and objects
/// are falsy: an unanswered step is stored as `[]`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().unwrap_or(0.0) != 0.0,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
