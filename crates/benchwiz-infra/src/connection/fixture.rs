//! FixtureConnectionStore -- [`ConnectionStore`] over a JSON file.
//!
//! Used by the CLI's offline `step` command and for local development
//! without a running connection service. File shape:
//!
//! ```json
//! { "connections": [
//!     { "projectId": "proj-1", "id": "conn-1", "name": "Prod",
//!       "provider": "aws", "authProviderKey": "aws-assume-role",
//!       "status": "active", "value": { "props": { "roles": [] } } }
//! ] }
//! ```

use std::path::Path;

use serde::Deserialize;

use benchwiz_core::repository::connection::ConnectionStore;
use benchwiz_types::connection::{Connection, ConnectionPage, ConnectionQuery, ConnectionStatus};
use benchwiz_types::error::ConnectionStoreError;

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    connections: Vec<FixtureConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureConnection {
    project_id: String,
    #[serde(default = "default_status")]
    status: ConnectionStatus,
    #[serde(flatten)]
    connection: Connection,
}

fn default_status() -> ConnectionStatus {
    ConnectionStatus::Active
}

/// Read-only connection store loaded from a fixture file.
#[derive(Debug, Default)]
pub struct FixtureConnectionStore {
    connections: Vec<FixtureConnection>,
}

impl FixtureConnectionStore {
    pub fn from_json(json: &str) -> Result<Self, ConnectionStoreError> {
        let file: FixtureFile =
            serde_json::from_str(json).map_err(|e| ConnectionStoreError::Decode(e.to_string()))?;
        Ok(Self {
            connections: file.connections,
        })
    }

    pub async fn load(path: &Path) -> Result<Self, ConnectionStoreError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            ConnectionStoreError::Unavailable(format!(
                "failed to read connections file {}: {e}",
                path.display()
            ))
        })?;
        let store = Self::from_json(&content)?;
        tracing::debug!(
            count = store.connections.len(),
            path = %path.display(),
            "Loaded fixture connections"
        );
        Ok(store)
    }
}

impl ConnectionStore for FixtureConnectionStore {
    async fn list_active_connections(
        &self,
        query: &ConnectionQuery,
    ) -> Result<ConnectionPage, ConnectionStoreError> {
        let matching: Vec<_> = self
            .connections
            .iter()
            .filter(|c| {
                c.project_id == query.project_id
                    && c.status == query.status
                    && c.connection.provider.eq_ignore_ascii_case(&query.provider)
            })
            .collect();

        Ok(ConnectionPage {
            total: Some(matching.len() as u64),
            items: matching
                .into_iter()
                .take(query.limit as usize)
                .map(|c| c.connection.summary())
                .collect(),
        })
    }

    async fn get_connection(
        &self,
        id: &str,
        project_id: &str,
    ) -> Result<Connection, ConnectionStoreError> {
        self.connections
            .iter()
            .find(|c| c.project_id == project_id && c.connection.id == id)
            .map(|c| c.connection.clone())
            .ok_or_else(|| ConnectionStoreError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "connections": [
            { "projectId": "proj-1", "id": "conn-1", "name": "Prod", "provider": "aws",
              "authProviderKey": "aws-assume-role",
              "value": { "props": { "roles": [
                  { "assumeRoleArn": "arn:aws:iam::111111111111:role/RO", "accountName": "Acct A" }
              ] } } },
            { "projectId": "proj-1", "id": "conn-2", "name": "Old", "provider": "aws",
              "authProviderKey": "aws-assume-role", "status": "inactive" },
            { "projectId": "proj-2", "id": "conn-3", "name": "Other project", "provider": "aws",
              "authProviderKey": "aws-assume-role" },
            { "projectId": "proj-1", "id": "conn-4", "name": "GCP", "provider": "gcp",
              "authProviderKey": "gcp-service-account" }
        ]
    }"#;

    #[tokio::test]
    async fn lists_only_active_connections_of_project_and_provider() {
        let store = FixtureConnectionStore::from_json(FIXTURE).unwrap();
        let page = store
            .list_active_connections(&ConnectionQuery::active("proj-1", "aws"))
            .await
            .unwrap();

        let ids: Vec<&str> = page.items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["conn-1"]);
        assert_eq!(page.total, Some(1));
    }

    #[tokio::test]
    async fn listing_respects_limit() {
        let store = FixtureConnectionStore::from_json(FIXTURE).unwrap();
        let query = ConnectionQuery {
            limit: 0,
            ..ConnectionQuery::active("proj-1", "aws")
        };
        let page = store.list_active_connections(&query).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, Some(1));
    }

    #[tokio::test]
    async fn get_connection_is_scoped_to_project() {
        let store = FixtureConnectionStore::from_json(FIXTURE).unwrap();

        let connection = store.get_connection("conn-1", "proj-1").await.unwrap();
        assert!(connection.value.is_some());

        let err = store.get_connection("conn-1", "proj-2").await.unwrap_err();
        assert!(matches!(err, ConnectionStoreError::NotFound(_)));
    }

    #[test]
    fn malformed_fixture_is_decode_error() {
        let err = FixtureConnectionStore::from_json(r#"{ "connections": [ { "id": 1 } ] }"#)
            .unwrap_err();
        assert!(matches!(err, ConnectionStoreError::Decode(_)));
    }

    #[tokio::test]
    async fn load_missing_file_is_unavailable() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = FixtureConnectionStore::load(&tmp.path().join("none.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionStoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn demo_fixture_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/connections.json");
        let store = FixtureConnectionStore::load(&path).await.unwrap();
        let page = store
            .list_active_connections(&ConnectionQuery::active("demo", "aws"))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
    }
}
