//! HttpConnectionStore -- [`ConnectionStore`] backed by the connection
//! service's REST API.
//!
//! Endpoints (relative to the configured base URL):
//! - `GET /projects/{project_id}/connections?provider=&status=&limit=`
//! - `GET /projects/{project_id}/connections/{id}` (decrypted value included)
//!
//! The bearer token is wrapped in [`secrecy::SecretString`] and only exposed
//! when building request headers.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use benchwiz_core::repository::connection::ConnectionStore;
use benchwiz_types::config::ConnectionStoreConfig;
use benchwiz_types::connection::{Connection, ConnectionPage, ConnectionQuery};
use benchwiz_types::error::ConnectionStoreError;

/// REST client for the external connection store.
///
/// Requests carry the client timeout from [`ConnectionStoreConfig`]; no retry
/// is attempted.
pub struct HttpConnectionStore {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

// HttpConnectionStore does NOT derive Debug so the token can never be printed.

impl HttpConnectionStore {
    /// Create a client for `config`, authenticating with `token` when given.
    pub fn new(
        config: &ConnectionStoreConfig,
        token: Option<SecretString>,
    ) -> Result<Self, ConnectionStoreError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ConnectionStoreError::Unavailable(format!(
                "invalid connection store URL '{}': {e}",
                config.base_url
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConnectionStoreError::Unavailable(format!(
                "connection store URL '{}' cannot be a base URL",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("benchwiz/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ConnectionStoreError::Unavailable(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Create a client reading the bearer token from `config.token_env`.
    pub fn from_env(config: &ConnectionStoreConfig) -> Result<Self, ConnectionStoreError> {
        let token = std::env::var(&config.token_env)
            .ok()
            .filter(|t| !t.is_empty())
            .map(SecretString::from);
        if token.is_none() {
            tracing::warn!(
                env = %config.token_env,
                "No connection store token set, requests will be unauthenticated"
            );
        }
        Self::new(config, token)
    }

    /// `{base}/projects/{project_id}/connections[/{id}]` with each segment
    /// percent-encoded.
    fn connections_url(&self, project_id: &str, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so path segments are available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["projects", project_id, "connections"]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    /// Send `request` and decode its JSON body.
    ///
    /// A 404 means the record `not_found_id` is missing. Without one, a 404
    /// means the endpoint itself is absent and the store is unusable.
    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        not_found_id: Option<&str>,
    ) -> Result<T, ConnectionStoreError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            ConnectionStoreError::Unavailable(format!("HTTP request failed: {e}"))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(match not_found_id {
                Some(id) => ConnectionStoreError::NotFound(id.to_string()),
                None => ConnectionStoreError::Unavailable(format!(
                    "HTTP {status}: endpoint {} not found",
                    response.url().path()
                )),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectionStoreError::Unavailable(format!(
                "HTTP {status}: {body}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ConnectionStoreError::Decode(e.to_string()))
    }
}

impl ConnectionStore for HttpConnectionStore {
    async fn list_active_connections(
        &self,
        query: &ConnectionQuery,
    ) -> Result<ConnectionPage, ConnectionStoreError> {
        let url = self.connections_url(&query.project_id, None);
        tracing::debug!(%url, provider = %query.provider, "Listing connections");

        let request = self.client.get(url).query(&[
            ("provider", query.provider.clone()),
            ("status", query.status.to_string()),
            ("limit", query.limit.to_string()),
        ]);

        self.get_json(request, None).await
    }

    async fn get_connection(
        &self,
        id: &str,
        project_id: &str,
    ) -> Result<Connection, ConnectionStoreError> {
        let url = self.connections_url(project_id, Some(id));
        tracing::debug!(%url, "Fetching connection");

        self.get_json(self.client.get(url), Some(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use axum::extract::{Path, Query};
    use axum::http::HeaderMap;
    use axum::routing::get;
    use axum::{Json, Router};
    use benchwiz_types::connection::ConnectionStatus;
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api/v1")
    }

    fn config(base_url: String) -> ConnectionStoreConfig {
        ConnectionStoreConfig {
            base_url,
            timeout_secs: 5,
            ..ConnectionStoreConfig::default()
        }
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "Bearer test-token")
    }

    async fn list_handler(
        Path(project_id): Path<String>,
        Query(params): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "unauthorized" })));
        }
        assert_eq!(params.get("provider").map(String::as_str), Some("aws"));
        assert_eq!(params.get("status").map(String::as_str), Some("active"));
        assert_eq!(params.get("limit").map(String::as_str), Some("100"));

        (
            StatusCode::OK,
            Json(json!({
                "items": [{
                    "id": "conn-1",
                    "name": format!("Prod ({project_id})"),
                    "provider": "aws",
                    "authProviderKey": "aws-assume-role"
                }],
                "total": 1
            })),
        )
    }

    async fn get_handler(
        Path((_project_id, id)): Path<(String, String)>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "unauthorized" })));
        }
        match id.as_str() {
            "conn-1" => (
                StatusCode::OK,
                Json(json!({
                    "id": "conn-1",
                    "name": "Prod",
                    "provider": "aws",
                    "authProviderKey": "aws-assume-role",
                    "value": { "props": { "roles": [
                        { "assumeRoleArn": "arn:aws:iam::111111111111:role/RO", "accountName": "Acct A" }
                    ] } }
                })),
            ),
            "garbled" => (StatusCode::OK, Json(json!({ "unexpected": true }))),
            "broken" => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" }))),
            _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))),
        }
    }

    async fn test_server() -> String {
        serve(
            Router::new()
                .route("/api/v1/projects/{project_id}/connections", get(list_handler))
                .route("/api/v1/projects/{project_id}/connections/{id}", get(get_handler)),
        )
        .await
    }

    fn store(base_url: String) -> HttpConnectionStore {
        HttpConnectionStore::new(
            &config(base_url),
            Some(SecretString::from("test-token".to_string())),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_active_connections() {
        let store = store(test_server().await);
        let page = store
            .list_active_connections(&ConnectionQuery::active("proj-1", "aws"))
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Prod (proj-1)");
        assert_eq!(page.items[0].auth_provider_key, "aws-assume-role");
        assert_eq!(page.total, Some(1));
    }

    #[tokio::test]
    async fn test_get_connection_includes_value() {
        let store = store(test_server().await);
        let connection = store.get_connection("conn-1", "proj-1").await.unwrap();
        assert_eq!(connection.id, "conn-1");
        assert!(connection.value.unwrap()["props"]["roles"].is_array());
    }

    #[tokio::test]
    async fn test_get_connection_not_found() {
        let store = store(test_server().await);
        let err = store.get_connection("missing", "proj-1").await.unwrap_err();
        assert!(matches!(err, ConnectionStoreError::NotFound(ref id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_list_on_missing_endpoint_is_unavailable() {
        let base_url = test_server().await.replace("/api/v1", "/api/v0");
        let err = store(base_url)
            .list_active_connections(&ConnectionQuery::active("proj-1", "aws"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConnectionStoreError::Unavailable(ref msg)
                if msg.contains("404") && msg.contains("/api/v0/projects/proj-1/connections")
        ));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let store = store(test_server().await);
        let err = store.get_connection("broken", "proj-1").await.unwrap_err();
        assert!(matches!(err, ConnectionStoreError::Unavailable(ref msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_unexpected_body_is_decode_error() {
        let store = store(test_server().await);
        let err = store.get_connection("garbled", "proj-1").await.unwrap_err();
        assert!(matches!(err, ConnectionStoreError::Decode(_)));
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected_by_server() {
        let store = HttpConnectionStore::new(&config(test_server().await), None).unwrap();
        let err = store
            .list_active_connections(&ConnectionQuery {
                status: ConnectionStatus::Active,
                ..ConnectionQuery::active("proj-1", "aws")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionStoreError::Unavailable(ref msg) if msg.contains("401")));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_unavailable() {
        // Port 9 (discard) is not served locally.
        let store = store("http://127.0.0.1:9/api/v1".to_string());
        let err = store.get_connection("conn-1", "proj-1").await.unwrap_err();
        assert!(matches!(err, ConnectionStoreError::Unavailable(_)));
    }

    #[test]
    fn test_connections_url_encodes_segments() {
        let store = store("http://localhost:7400/api/v1/".to_string());
        let url = store.connections_url("proj 1", Some("conn/1"));
        assert_eq!(
            url.as_str(),
            "http://localhost:7400/api/v1/projects/proj%201/connections/conn%2F1"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = HttpConnectionStore::new(&config("not a url".to_string()), None);
        assert!(matches!(result, Err(ConnectionStoreError::Unavailable(_))));
    }
}
