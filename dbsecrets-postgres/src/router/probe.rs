use crate::{algebra::pool::ping, server::AppState};
use axum::{extract::State, Json};
use dbsecrets_domain::{DbSecretsError, InternalError, TimedExt};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Acquires a connection from the managed pool and pings the server.
pub async fn probe(state: State<Arc<AppState>>) -> Result<Json<Value>, DbSecretsError> {
    let pool = state.pools.pool().await?;

    ping(&pool)
        .timed(|_, elapsed| debug!("Pool probe took {:?}", elapsed))
        .await
        .map_err(from_sqlx)?;

    Ok(Json(json!({ "success": true })))
}

fn from_sqlx(error: sqlx::Error) -> DbSecretsError {
    match error {
        sqlx::Error::PoolTimedOut => {
            InternalError::timeout("Timed out acquiring a pooled connection", None)
        }
        e => InternalError::connection_error(&e.to_string(), Some("postgres")),
    }
}
