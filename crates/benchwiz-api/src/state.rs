//! Application state wiring the wizard engine together.
//!
//! AppState holds the service instances used by both CLI and REST API. The
//! engine is generic over its connection store; AppState pins the AWS adapter
//! to either the HTTP client or a local fixture file and erases the choice
//! behind [`BoxProviderAdapter`].

use std::path::Path;
use std::sync::Arc;

use benchwiz_core::adapter::aws::{AwsProviderAdapter, AWS_PROVIDER};
use benchwiz_core::adapter::box_adapter::BoxProviderAdapter;
use benchwiz_core::adapter::registry::AdapterRegistry;
use benchwiz_core::config_store::WizardConfigStore;
use benchwiz_core::repository::connection::ConnectionStore;
use benchwiz_core::service::wizard::WizardService;
use benchwiz_infra::config::{load_service_config, resolve_config_path};
use benchwiz_infra::connection::fixture::FixtureConnectionStore;
use benchwiz_infra::connection::http::HttpConnectionStore;
use benchwiz_infra::wizard::load_wizard_configs;
use benchwiz_types::config::ServiceConfig;
use benchwiz_types::wizard::WizardConfig;

/// Shared application state.
///
/// Used by both CLI commands and REST API handlers. Everything inside is
/// read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub wizard_service: Arc<WizardService>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// Load `config.toml` and wire services.
    ///
    /// Connections come from `connections_file` when given, else from the
    /// connection store configured in `[connection_store]`.
    pub async fn init(connections_file: Option<&Path>) -> anyhow::Result<Self> {
        let config = load_service_config(&resolve_config_path()).await;
        Self::from_config(config, connections_file).await
    }

    pub async fn from_config(
        config: ServiceConfig,
        connections_file: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let configs = load_wizard_configs(Path::new(&config.wizard_dir)).await?;

        let wizard_service = match connections_file {
            Some(path) => {
                let store = FixtureConnectionStore::load(path).await?;
                tracing::info!(path = %path.display(), "Using fixture connection store");
                build_wizard_service(configs, store)?
            }
            None => {
                let store = HttpConnectionStore::from_env(&config.connection_store)?;
                tracing::info!(
                    base_url = %config.connection_store.base_url,
                    "Using HTTP connection store"
                );
                build_wizard_service(configs, store)?
            }
        };

        tracing::info!(
            providers = ?wizard_service.providers(),
            "Wizard service ready"
        );

        Ok(Self {
            wizard_service: Arc::new(wizard_service),
            config: Arc::new(config),
        })
    }
}

/// Register the provider adapters over `store` and validate `configs`
/// against them.
///
/// Fails when a graph names a provider, method, or condition no adapter
/// serves, so a misconfigured service never starts.
pub fn build_wizard_service<S>(
    configs: Vec<WizardConfig>,
    store: S,
) -> anyhow::Result<WizardService>
where
    S: ConnectionStore + 'static,
{
    let mut registry = AdapterRegistry::new();
    registry.register(
        AWS_PROVIDER,
        BoxProviderAdapter::new(AwsProviderAdapter::new(store)),
    );

    let configs = WizardConfigStore::new(configs)?;
    configs.validate_against(&registry)?;

    Ok(WizardService::new(Arc::new(configs), Arc::new(registry)))
}
