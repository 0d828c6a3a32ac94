//! Service configuration types for benchwiz.
//!
//! `ServiceConfig` represents `config.toml`: where the step graphs live, how
//! to reach the connection store, and where the HTTP server binds. All fields
//! have sensible defaults.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Directory holding one `<provider>.json` step graph per provider.
    #[serde(default = "default_wizard_dir")]
    pub wizard_dir: String,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub connection_store: ConnectionStoreConfig,
}

fn default_wizard_dir() -> String {
    "config/wizards".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            wizard_dir: default_wizard_dir(),
            http: HttpConfig::default(),
            connection_store: ConnectionStoreConfig::default(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:7480".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Connection store client settings.
///
/// The timeout belongs to the HTTP client. The wizard engine itself enforces
/// no timeout on connection store calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionStoreConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:7400/api/v1".to_string()
}

fn default_token_env() -> String {
    "BENCHWIZ_CONNECTION_STORE_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ConnectionStoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
