//! Connection store trait definition.

use benchwiz_types::connection::{Connection, ConnectionPage, ConnectionQuery};
use benchwiz_types::error::ConnectionStoreError;

/// Read access to the external connection store.
///
/// The store owns connection records and their encrypted credentials; the
/// wizard engine only lists and fetches them. Implementations live in
/// benchwiz-infra (HTTP client, in-memory fixture store).
///
/// No timeout or retry is applied at this layer. Whatever policy the
/// implementation's client carries is what the engine inherits. Nothing is
/// cached either: a request that evaluates a connection-backed condition
/// and then loads that step's options calls `get_connection` twice, so its
/// latency and failure exposure to the store double.
pub trait ConnectionStore: Send + Sync {
    /// List connections matching `query` (one page, at most `query.limit`).
    fn list_active_connections(
        &self,
        query: &ConnectionQuery,
    ) -> impl std::future::Future<Output = Result<ConnectionPage, ConnectionStoreError>> + Send;

    /// Fetch a connection with its decrypted value.
    /// Fails with `ConnectionStoreError::NotFound` when it does not exist in
    /// the project.
    fn get_connection(
        &self,
        id: &str,
        project_id: &str,
    ) -> impl std::future::Future<Output = Result<Connection, ConnectionStoreError>> + Send;
}

impl<T: ConnectionStore> ConnectionStore for std::sync::Arc<T> {
    async fn list_active_connections(
        &self,
        query: &ConnectionQuery,
    ) -> Result<ConnectionPage, ConnectionStoreError> {
        (**self).list_active_connections(query).await
    }

    async fn get_connection(
        &self,
        id: &str,
        project_id: &str,
    ) -> Result<Connection, ConnectionStoreError> {
        (**self).get_connection(id, project_id).await
    }
}
