//! Connection types owned by the external connection store.
//!
//! The engine only reads connections. `Connection::value` carries the
//! decrypted credential payload whose shape is provider-specific.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Page size used when listing connections for a wizard step.
pub const DEFAULT_CONNECTION_PAGE_LIMIT: u32 = 100;

/// Lifecycle status of a stored connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Active,
    Inactive,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Active => write!(f, "active"),
            ConnectionStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// Filter for listing connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionQuery {
    pub project_id: String,
    pub provider: String,
    pub status: ConnectionStatus,
    pub limit: u32,
}

impl ConnectionQuery {
    /// Active connections of `provider` in `project_id`, first page.
    pub fn active(project_id: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            provider: provider.into(),
            status: ConnectionStatus::Active,
            limit: DEFAULT_CONNECTION_PAGE_LIMIT,
        }
    }
}

/// Listing entry; carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSummary {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub auth_provider_key: String,
}

/// One page of a connection listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPage {
    pub items: Vec<ConnectionSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// A connection with its decrypted credential value.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub auth_provider_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl Connection {
    pub fn summary(&self) -> ConnectionSummary {
        ConnectionSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            provider: self.provider.clone(),
            auth_provider_key: self.auth_provider_key.clone(),
        }
    }
}

// The decrypted value never appears in Debug output.
impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("auth_provider_key", &self.auth_provider_key)
            .field("value", &self.value.as_ref().map(|_| "***"))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// AWS credential payload
// ---------------------------------------------------------------------------

/// Decrypted value of an AWS connection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsConnectionValue {
    #[serde(default)]
    pub props: Option<AwsConnectionProps>,
}

impl AwsConnectionValue {
    /// Roles the connection may assume; empty when none are declared.
    pub fn roles(&self) -> &[AwsAssumableRole] {
        self.props
            .as_ref()
            .and_then(|p| p.roles.as_deref())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsConnectionProps {
    #[serde(default)]
    pub roles: Option<Vec<AwsAssumableRole>>,
}

/// An IAM role reachable through a connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsAssumableRole {
    pub assume_role_arn: String,
    pub account_name: String,
}
