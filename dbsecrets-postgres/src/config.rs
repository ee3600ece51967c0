use dbsecrets_domain::{environment::Environment, storage_config::StorageConfig};
use envconfig::Envconfig;
use std::{
    fmt::{Display, Formatter, Result},
    net::SocketAddr,
    time::Duration,
};

#[derive(Envconfig, Clone)]
pub struct BackendConfig {
    #[envconfig(from = "WORKER_THREADS")]
    pub worker_threads: Option<usize>,
    #[envconfig(from = "INTERNAL_SERVER_ADDRESS", default = "0.0.0.0:3005")]
    pub address: SocketAddr,
    #[envconfig(from = "ENVIRONMENT", default = "development")]
    pub environment: Environment,
    #[envconfig(from = "VALIDATION_TIMEOUT_IN_MILLIS", default = "30000")]
    pub validation_timeout_in_millis: u64,
    #[envconfig(from = "POOL_ACQUIRE_TIMEOUT_IN_MILLIS", default = "30000")]
    pub pool_acquire_timeout_in_millis: u64,
    #[envconfig(nested = true)]
    pub storage_config: StorageConfig,
}

impl BackendConfig {
    pub fn validation_timeout(&self) -> Duration {
        Duration::from_millis(self.validation_timeout_in_millis)
    }

    pub fn pool_acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.pool_acquire_timeout_in_millis)
    }
}

impl Display for BackendConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "WORKER_THREADS: {:?}", self.worker_threads)?;
        writeln!(f, "INTERNAL_SERVER_ADDRESS: {}", self.address)?;
        writeln!(f, "ENVIRONMENT: {}", self.environment)?;
        writeln!(
            f,
            "VALIDATION_TIMEOUT_IN_MILLIS: {}",
            self.validation_timeout_in_millis
        )?;
        writeln!(
            f,
            "POOL_ACQUIRE_TIMEOUT_IN_MILLIS: {}",
            self.pool_acquire_timeout_in_millis
        )?;
        write!(f, "{}", self.storage_config)
    }
}
