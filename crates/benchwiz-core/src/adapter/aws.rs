//! AWS wizard adapter.
//!
//! Resolves the AWS step graph's dynamic option methods and conditions against
//! the connection store:
//! - `listConnections`: active AWS connections of the project
//! - `getConnectionAccounts`: accounts reachable through the selected
//!   connection's assumable roles
//! - condition `supportsMultipleAccounts`: the selected connection declares
//!   at least one assumable role
//!
//! Any other condition falls back to a [`ConfigurationPath`] lookup.

use serde_json::{Map, Value};

use benchwiz_types::connection::{AwsAssumableRole, AwsConnectionValue, ConnectionQuery};
use benchwiz_types::error::WizardError;
use benchwiz_types::wizard::{BenchmarkWizardOption, WizardConfig, WizardContext};

use crate::condition::ConfigurationPath;
use crate::repository::connection::ConnectionStore;

use super::provider::ProviderAdapter;

/// Provider key served by this adapter.
pub const AWS_PROVIDER: &str = "aws";

/// Step whose first answer is the selected connection id.
pub const CONNECTION_STEP_ID: &str = "connection";

// ---------------------------------------------------------------------------
// Supported operations
// ---------------------------------------------------------------------------

/// Dynamic option methods implemented by the AWS adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwsOptionMethod {
    ListConnections,
    GetConnectionAccounts,
}

impl AwsOptionMethod {
    pub const ALL: [AwsOptionMethod; 2] = [
        AwsOptionMethod::ListConnections,
        AwsOptionMethod::GetConnectionAccounts,
    ];

    /// Method name as written in step graphs.
    pub fn as_str(&self) -> &'static str {
        match self {
            AwsOptionMethod::ListConnections => "listConnections",
            AwsOptionMethod::GetConnectionAccounts => "getConnectionAccounts",
        }
    }

    pub fn parse(method: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == method)
    }
}

/// Conditions understood by the AWS adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwsCondition {
    /// `[!]supportsMultipleAccounts`
    SupportsMultipleAccounts { negated: bool },
    /// Anything else: a dotted path into the benchmark configuration.
    Path(ConfigurationPath),
}

impl AwsCondition {
    const SUPPORTS_MULTIPLE_ACCOUNTS: &'static str = "supportsMultipleAccounts";

    pub fn parse(condition: &str) -> Result<Self, WizardError> {
        let trimmed = condition.trim();
        let (negated, name) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        if name == Self::SUPPORTS_MULTIPLE_ACCOUNTS {
            Ok(AwsCondition::SupportsMultipleAccounts { negated })
        } else {
            ConfigurationPath::parse(condition).map(AwsCondition::Path)
        }
    }
}

// ---------------------------------------------------------------------------
// ARN parsing
// ---------------------------------------------------------------------------

/// Extract the 12-digit account id from `arn:<partition>:iam::<account>:role/<name>`.
pub fn account_id_from_role_arn(arn: &str) -> Result<&str, WizardError> {
    let invalid = || WizardError::InvalidConnectionValue(format!("invalid assume role ARN: '{arn}'"));

    let parts: Vec<&str> = arn.splitn(6, ':').collect();
    let [prefix, partition, service, region, account_id, resource] = parts.as_slice() else {
        return Err(invalid());
    };

    let well_formed = *prefix == "arn"
        && !partition.is_empty()
        && *service == "iam"
        && region.is_empty()
        && account_id.len() == 12
        && account_id.bytes().all(|b| b.is_ascii_digit())
        && resource.starts_with("role/");

    if well_formed {
        Ok(*account_id)
    } else {
        Err(invalid())
    }
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// AWS implementation of [`ProviderAdapter`].
pub struct AwsProviderAdapter<S: ConnectionStore> {
    store: S,
}

impl<S: ConnectionStore> AwsProviderAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn list_connections(
        &self,
        context: &WizardContext,
    ) -> Result<Vec<BenchmarkWizardOption>, WizardError> {
        let project_id = context.project_id.as_deref().ok_or_else(|| {
            WizardError::MissingPrerequisite(
                "Project id is required to list connections".to_string(),
            )
        })?;

        let query = ConnectionQuery::active(project_id, AWS_PROVIDER);
        let page = self.store.list_active_connections(&query).await?;

        tracing::debug!(
            project_id,
            connections = page.items.len(),
            "Listed AWS connections"
        );

        Ok(page
            .items
            .into_iter()
            .map(|connection| {
                let mut metadata = Map::new();
                metadata.insert(
                    "authProviderKey".to_string(),
                    Value::String(connection.auth_provider_key),
                );
                BenchmarkWizardOption {
                    id: connection.id,
                    display_name: connection.name,
                    image_logo_url: None,
                    metadata: Some(metadata),
                }
            })
            .collect())
    }

    async fn get_connection_accounts(
        &self,
        context: &WizardContext,
    ) -> Result<Vec<BenchmarkWizardOption>, WizardError> {
        let connection_id = context.first_answer(CONNECTION_STEP_ID).ok_or_else(|| {
            WizardError::MissingPrerequisite(
                "Connection must be selected to list accounts".to_string(),
            )
        })?;

        let roles = self.connection_roles(connection_id, context).await?;

        roles
            .iter()
            .map(|role| {
                Ok(BenchmarkWizardOption {
                    id: account_id_from_role_arn(&role.assume_role_arn)?.to_string(),
                    display_name: role.account_name.clone(),
                    image_logo_url: None,
                    metadata: None,
                })
            })
            .collect()
    }

    async fn supports_multiple_accounts(
        &self,
        context: &WizardContext,
    ) -> Result<bool, WizardError> {
        let Some(connection_id) = context.first_answer(CONNECTION_STEP_ID) else {
            return Ok(false);
        };
        let roles = self.connection_roles(connection_id, context).await?;
        Ok(!roles.is_empty())
    }

    /// Assumable roles declared by the connection's stored value.
    async fn connection_roles(
        &self,
        connection_id: &str,
        context: &WizardContext,
    ) -> Result<Vec<AwsAssumableRole>, WizardError> {
        let project_id = context.project_id.as_deref().ok_or_else(|| {
            WizardError::MissingPrerequisite(
                "Project id is required to fetch a connection".to_string(),
            )
        })?;

        let connection = self.store.get_connection(connection_id, project_id).await?;

        let roles = match connection.value {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => {
                let parsed: AwsConnectionValue = serde_json::from_value(value).map_err(|e| {
                    WizardError::InvalidConnectionValue(format!(
                        "connection {connection_id}: {e}"
                    ))
                })?;
                parsed.roles().to_vec()
            }
        };

        tracing::debug!(connection_id, roles = roles.len(), "Fetched AWS connection roles");
        Ok(roles)
    }
}

impl<S: ConnectionStore> ProviderAdapter for AwsProviderAdapter<S> {
    fn provider(&self) -> &str {
        AWS_PROVIDER
    }

    fn supports_method(&self, method: &str) -> bool {
        AwsOptionMethod::parse(method).is_some()
    }

    async fn resolve_options(
        &self,
        method: &str,
        context: &WizardContext,
    ) -> Result<Vec<BenchmarkWizardOption>, WizardError> {
        match AwsOptionMethod::parse(method) {
            Some(AwsOptionMethod::ListConnections) => self.list_connections(context).await,
            Some(AwsOptionMethod::GetConnectionAccounts) => {
                self.get_connection_accounts(context).await
            }
            None => Err(WizardError::MethodNotImplemented {
                provider: AWS_PROVIDER.to_string(),
                method: method.to_string(),
            }),
        }
    }

    fn supports_conditions(&self) -> bool {
        true
    }

    /// `supportsMultipleAccounts` always passes; a path condition must start
    /// with a step id of `config`.
    fn check_condition(&self, condition: &str, config: &WizardConfig) -> Result<(), WizardError> {
        match AwsCondition::parse(condition)? {
            AwsCondition::SupportsMultipleAccounts { .. } => Ok(()),
            AwsCondition::Path(path) => {
                let names_step = path
                    .segments()
                    .first()
                    .is_some_and(|step| config.step(step).is_some());
                if names_step {
                    Ok(())
                } else {
                    Err(WizardError::ConditionNotImplemented {
                        provider: AWS_PROVIDER.to_string(),
                        condition: condition.to_string(),
                    })
                }
            }
        }
    }

    async fn evaluate(&self, condition: &str, context: &WizardContext) -> Result<bool, WizardError> {
        match AwsCondition::parse(condition)? {
            AwsCondition::SupportsMultipleAccounts { negated } => {
                Ok(self.supports_multiple_accounts(context).await? != negated)
            }
            AwsCondition::Path(path) => Ok(path.evaluate(&context.benchmark_configuration)),
        }
    }
}
