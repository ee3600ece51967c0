use crate::domain::{dsn, validation::ValidationError};
use async_trait::async_trait;
use dbsecrets_domain::{TimedExt, Unit};
use sqlx::{
    postgres::{PgConnectOptions, PgConnection},
    Connection,
};
use std::time::Duration;
use tracing::debug;

/// Proves a candidate connection string is reachable. Implementations must
/// not read or write any persisted state.
#[async_trait]
pub trait ConnectionValidator: Send + Sync {
    async fn validate(&self, connection_url: &str) -> Result<Unit, ValidationError>;
}

/// Opens a single throwaway connection, pings through it and closes it.
#[derive(Debug, Clone)]
pub struct PostgresValidator {
    timeout: Duration,
}

impl PostgresValidator {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ConnectionValidator for PostgresValidator {
    #[tracing::instrument(name = "validate_connection", skip_all)]
    async fn validate(&self, connection_url: &str) -> Result<Unit, ValidationError> {
        let target = dsn::parse(connection_url)?;

        // A connect_timeout in the string can only shorten the wait.
        let timeout = target
            .connect_timeout
            .map_or(self.timeout, |connect_timeout| connect_timeout.min(self.timeout));

        tokio::time::timeout(timeout, check(&target.options))
            .timed(|result, elapsed| {
                debug!(
                    "Connection check finished in {:?}, success: {}",
                    elapsed,
                    matches!(result, Ok(Ok(_)))
                )
            })
            .await
            .map_err(|_| {
                ValidationError::new(format!("timed out after {timeout:?} connecting to the server"))
            })?
            .map_err(ValidationError::new)
    }
}

async fn check(options: &PgConnectOptions) -> Result<Unit, sqlx::Error> {
    let mut connection = PgConnection::connect_with(options).await?;

    let pinged = connection.ping().await;
    let closed = connection.close().await;

    pinged.and(closed)
}
