//! Test doubles shared by the core crate's unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use benchwiz_types::connection::{Connection, ConnectionPage, ConnectionQuery};
use benchwiz_types::error::{ConnectionStoreError, WizardError};
use benchwiz_types::wizard::{BenchmarkWizardOption, WizardConfig, WizardContext};

use crate::adapter::provider::ProviderAdapter;
use crate::repository::connection::ConnectionStore;

// --- Connection store ---

/// In-memory connection store that counts calls. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryConnectionStore {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    connections: Mutex<Vec<(String, Connection)>>,
    failing: std::sync::atomic::AtomicBool,
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
}

impl InMemoryConnectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connection(self, project_id: &str, connection: Connection) -> Self {
        self.inner
            .connections
            .lock()
            .unwrap()
            .push((project_id.to_string(), connection));
        self
    }

    /// Every call fails with `ConnectionStoreError::Unavailable`.
    pub fn failing(self) -> Self {
        self.inner.failing.store(true, Ordering::SeqCst);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.inner.list_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.inner.get_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), ConnectionStoreError> {
        if self.inner.failing.load(Ordering::SeqCst) {
            Err(ConnectionStoreError::Unavailable("store is down".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ConnectionStore for InMemoryConnectionStore {
    async fn list_active_connections(
        &self,
        query: &ConnectionQuery,
    ) -> Result<ConnectionPage, ConnectionStoreError> {
        self.inner.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let items: Vec<_> = self
            .inner
            .connections
            .lock()
            .unwrap()
            .iter()
            .filter(|(project, c)| *project == query.project_id && c.provider == query.provider)
            .take(query.limit as usize)
            .map(|(_, c)| c.summary())
            .collect();

        Ok(ConnectionPage {
            total: Some(items.len() as u64),
            items,
        })
    }

    async fn get_connection(
        &self,
        id: &str,
        project_id: &str,
    ) -> Result<Connection, ConnectionStoreError> {
        self.inner.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        self.inner
            .connections
            .lock()
            .unwrap()
            .iter()
            .find(|(project, c)| project == project_id && c.id == id)
            .map(|(_, c)| c.clone())
            .ok_or_else(|| ConnectionStoreError::NotFound(id.to_string()))
    }
}

pub fn aws_connection(id: &str, name: &str, value: Option<serde_json::Value>) -> Connection {
    Connection {
        id: id.to_string(),
        name: name.to_string(),
        provider: "aws".to_string(),
        auth_provider_key: "aws-assume-role".to_string(),
        value,
    }
}

pub fn context_with(project_id: Option<&str>, answers: &[(&str, &[&str])]) -> WizardContext {
    WizardContext {
        provider: "aws".to_string(),
        project_id: project_id.map(str::to_string),
        benchmark_configuration: answers
            .iter()
            .map(|(step, values)| {
                (
                    step.to_string(),
                    values.iter().map(|v| v.to_string()).collect(),
                )
            })
            .collect(),
    }
}

// --- Provider adapter ---

/// Scripted adapter: fixed options per method, fixed results per condition.
#[derive(Clone)]
pub struct StaticAdapter {
    provider: String,
    methods: HashMap<String, Vec<BenchmarkWizardOption>>,
    conditions: Option<HashMap<String, bool>>,
    evaluations: Arc<AtomicUsize>,
}

impl StaticAdapter {
    pub fn new(provider: &str) -> Self {
        Self {
            provider: provider.to_string(),
            methods: HashMap::new(),
            conditions: None,
            evaluations: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_method(self, method: &str) -> Self {
        let option = option(&format!("{method}-option"));
        self.with_options(method, vec![option])
    }

    pub fn with_options(mut self, method: &str, options: Vec<BenchmarkWizardOption>) -> Self {
        self.methods.insert(method.to_string(), options);
        self
    }

    pub fn with_condition(mut self, condition: &str, holds: bool) -> Self {
        self.conditions
            .get_or_insert_with(HashMap::new)
            .insert(condition.to_string(), holds);
        self
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

impl ProviderAdapter for StaticAdapter {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn supports_method(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    async fn resolve_options(
        &self,
        method: &str,
        _context: &WizardContext,
    ) -> Result<Vec<BenchmarkWizardOption>, WizardError> {
        self.methods
            .get(method)
            .cloned()
            .ok_or_else(|| WizardError::MethodNotImplemented {
                provider: self.provider.clone(),
                method: method.to_string(),
            })
    }

    fn supports_conditions(&self) -> bool {
        self.conditions.is_some()
    }

    fn check_condition(&self, condition: &str, _config: &WizardConfig) -> Result<(), WizardError> {
        let Some(conditions) = &self.conditions else {
            return Err(WizardError::ConditionsNotSupported(self.provider.clone()));
        };
        if conditions.contains_key(condition) {
            Ok(())
        } else {
            Err(WizardError::ConditionNotImplemented {
                provider: self.provider.clone(),
                condition: condition.to_string(),
            })
        }
    }

    async fn evaluate(&self, condition: &str, _context: &WizardContext) -> Result<bool, WizardError> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        let Some(conditions) = &self.conditions else {
            return Err(WizardError::ConditionsNotSupported(self.provider.clone()));
        };
        conditions
            .get(condition)
            .copied()
            .ok_or_else(|| WizardError::ConditionNotImplemented {
                provider: self.provider.clone(),
                condition: condition.to_string(),
            })
    }
}

pub fn option(id: &str) -> BenchmarkWizardOption {
    BenchmarkWizardOption {
        id: id.to_string(),
        display_name: id.to_string(),
        image_logo_url: None,
        metadata: None,
    }
}
