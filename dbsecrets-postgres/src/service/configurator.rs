use crate::{
    algebra::{
        config_store::ConnectionConfigStore, pool::PoolInvalidator, validator::ConnectionValidator,
    },
    domain::{
        connection::{ConnectionConfig, ConnectionConfigRequest},
        validation::ValidationError,
    },
};
use dbsecrets_domain::{DbSecretsError, Unit};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Result of an update that did not fail hard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied(ConnectionConfig),
    /// The candidate was not reachable. Nothing was persisted or invalidated.
    Rejected(ValidationError),
}

/// Applies connection configuration changes.
///
/// Every update is defaulted, validated, persisted and finally announced to
/// the pool owner, in that order. Validation runs outside the commit lock;
/// persist and invalidate run inside it so concurrent updates reach the pool
/// owner in the same order they reached storage.
pub struct ConnectionConfigurator {
    validator: Arc<dyn ConnectionValidator>,
    store: ConnectionConfigStore,
    invalidator: Arc<dyn PoolInvalidator>,
    commit: Mutex<Unit>,
}

impl ConnectionConfigurator {
    pub fn new(
        validator: Arc<dyn ConnectionValidator>,
        store: ConnectionConfigStore,
        invalidator: Arc<dyn PoolInvalidator>,
    ) -> Self {
        Self {
            validator,
            store,
            invalidator,
            commit: Mutex::new(()),
        }
    }

    #[tracing::instrument(name = "update_connection_config", skip_all)]
    pub async fn update(
        &self,
        request: ConnectionConfigRequest,
    ) -> Result<UpdateOutcome, DbSecretsError> {
        let config = ConnectionConfig::from_request(request);

        let Some(url) = config.effective_url() else {
            warn!("Rejected connection configuration without a connection string");
            return Ok(UpdateOutcome::Rejected(ValidationError::new(
                "connection_url must be provided",
            )));
        };

        if let Err(e) = self.validator.validate(url).await {
            warn!("Rejected connection configuration: {}", e.reason());
            return Ok(UpdateOutcome::Rejected(e));
        }

        let _commit = self.commit.lock().await;

        self.store.put(&config).await.inspect_err(|e| {
            error!("Failed to persist connection configuration: {e}");
        })?;

        self.invalidator.invalidate().await;

        info!(
            "Applied connection configuration with max_open_connections: {}, max_idle_connections: {}",
            config.max_open_connections, config.max_idle_connections
        );

        Ok(UpdateOutcome::Applied(config))
    }
}
