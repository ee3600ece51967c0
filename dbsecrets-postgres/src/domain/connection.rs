use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result as FmtResult};

/// Open connection limit used when the caller leaves `max_open_connections`
/// at zero.
pub const DEFAULT_MAX_OPEN_CONNECTIONS: i32 = 2;

const REDACTED: &str = "****";

/// Body of a write to `config/connection`. Every field is optional and an
/// absent field behaves exactly like its zero value.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct ConnectionConfigRequest {
    pub connection_url: Option<String>,
    /// Deprecated alias of `connection_url`.
    pub value: Option<String>,
    pub max_open_connections: Option<i32>,
    pub max_idle_connections: Option<i32>,
}

/// Effective pool limits after defaulting.
///
/// A negative `max_open` means unlimited and a negative `max_idle` means idle
/// connections are never kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSizes {
    pub max_open: i32,
    pub max_idle: i32,
}

impl PoolSizes {
    /// Turns raw user input into usable pool limits.
    ///
    /// * `0` open connections becomes [`DEFAULT_MAX_OPEN_CONNECTIONS`].
    /// * `0` idle connections follows the open limit, so an unlimited open
    ///   limit (`-1`) yields `-1` idle, which disables idle pooling.
    /// * idle is clamped to open, but only while open is bounded.
    pub fn compute(raw_max_open: i32, raw_max_idle: i32) -> Self {
        let max_open = match raw_max_open {
            0 => DEFAULT_MAX_OPEN_CONNECTIONS,
            n => n,
        };

        let max_idle = match raw_max_idle {
            0 => max_open,
            n => n,
        };

        let max_idle = if max_open >= 0 {
            max_idle.min(max_open)
        } else {
            max_idle
        };

        Self { max_open, max_idle }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenLimit {
    Unlimited,
    Bounded(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleLimit {
    /// Every connection is closed when it is released.
    Disabled,
    Bounded(u32),
}

/// Typed view of [`PoolSizes`] with the sign conventions resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_open: OpenLimit,
    pub max_idle: IdleLimit,
}

impl From<PoolSizes> for PoolSettings {
    fn from(sizes: PoolSizes) -> Self {
        Self {
            max_open: u32::try_from(sizes.max_open).map_or(OpenLimit::Unlimited, OpenLimit::Bounded),
            max_idle: u32::try_from(sizes.max_idle).map_or(IdleLimit::Disabled, IdleLimit::Bounded),
        }
    }
}

/// The persisted connection configuration of a backend mount. Stored as one
/// flat record and always written whole.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default)]
    pub connection_url: String,
    // Deprecated in favour of `connection_url`, kept for records written by
    // older clients.
    #[serde(default, rename = "value")]
    pub connection_string: String,
    #[serde(default)]
    pub max_open_connections: i32,
    #[serde(default)]
    pub max_idle_connections: i32,
}

impl ConnectionConfig {
    /// Builds the record to persist from a raw request, applying the pool
    /// defaults. This is the only place defaulting happens.
    pub fn from_request(request: ConnectionConfigRequest) -> Self {
        let sizes = PoolSizes::compute(
            request.max_open_connections.unwrap_or_default(),
            request.max_idle_connections.unwrap_or_default(),
        );

        Self {
            connection_url: request.connection_url.unwrap_or_default(),
            connection_string: request.value.unwrap_or_default(),
            max_open_connections: sizes.max_open,
            max_idle_connections: sizes.max_idle,
        }
    }

    /// The connection string consumers must use: `connection_url` when set,
    /// otherwise the deprecated `value`.
    pub fn effective_url(&self) -> Option<&str> {
        [&self.connection_url, &self.connection_string]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }

    /// Limits to build a pool with. Records written by older clients may
    /// hold raw zeros, so the defaults are applied again here; for a record
    /// built by [`Self::from_request`] this is a no-op.
    pub fn pool_sizes(&self) -> PoolSizes {
        PoolSizes::compute(self.max_open_connections, self.max_idle_connections)
    }

    pub fn pool_settings(&self) -> PoolSettings {
        self.pool_sizes().into()
    }

    /// Copy safe to hand back to callers; connection strings carry
    /// credentials.
    pub fn redacted(&self) -> Self {
        let redact = |s: &str| {
            if s.is_empty() {
                String::new()
            } else {
                REDACTED.to_string()
            }
        };

        Self {
            connection_url: redact(&self.connection_url),
            connection_string: redact(&self.connection_string),
            ..self.clone()
        }
    }
}

impl Debug for ConnectionConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let redacted = self.redacted();

        f.debug_struct("ConnectionConfig")
            .field("connection_url", &redacted.connection_url)
            .field("value", &redacted.connection_string)
            .field("max_open_connections", &self.max_open_connections)
            .field("max_idle_connections", &self.max_idle_connections)
            .finish()
    }
}
