use crate::{
    algebra::{
        config_store::ConnectionConfigStore,
        pool::PgPoolManager,
        validator::{ConnectionValidator, PostgresValidator},
    },
    config::BackendConfig,
    router,
    service::configurator::ConnectionConfigurator,
};
use anyhow::Result as AnyhowResult;
use axum::Router;
use dbsecrets_domain::{DbSecretsError, Storage};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub config: BackendConfig,
    pub storage: Arc<dyn Storage>,
    pub store: ConnectionConfigStore,
    pub pools: Arc<PgPoolManager>,
    pub configurator: Arc<ConnectionConfigurator>,
}

#[derive(Clone)]
pub struct Server {
    pub state: Arc<AppState>,
}

impl Server {
    pub async fn init(config: BackendConfig) -> Result<Self, DbSecretsError> {
        let storage = config
            .storage_config
            .storage_type
            .init(&config.storage_config)
            .await?;

        let validator = Arc::new(PostgresValidator::new(config.validation_timeout()));

        Ok(Self::new(config, storage, validator))
    }

    pub fn new(
        config: BackendConfig,
        storage: Arc<dyn Storage>,
        validator: Arc<dyn ConnectionValidator>,
    ) -> Self {
        let store = ConnectionConfigStore::new(storage.clone());
        let pools = Arc::new(PgPoolManager::new(
            store.clone(),
            config.pool_acquire_timeout(),
        ));
        let configurator = Arc::new(ConnectionConfigurator::new(
            validator,
            store.clone(),
            pools.clone(),
        ));

        Self {
            state: Arc::new(AppState {
                config,
                storage,
                store,
                pools,
                configurator,
            }),
        }
    }

    pub async fn run(&self) -> AnyhowResult<()> {
        let app = router::get_router().await;

        let app: Router<()> = app.with_state(self.state.clone());

        // Probing the storage to ensure it is up and running before starting the server
        self.state.storage.probe().await.inspect_err(|e| {
            tracing::error!("Could not reach configuration storage: {e}");
        })?;

        tracing::info!("Backend server listening on {}", self.state.config.address);

        let tcp_listener = TcpListener::bind(&self.state.config.address).await?;

        axum::serve(tcp_listener, app.into_make_service())
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))
    }
}
