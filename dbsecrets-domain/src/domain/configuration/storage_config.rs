use crate::{DbSecretsError, InMemoryStorage, MongoStorage, Storage};
use envconfig::Envconfig;
use mongodb::Client;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::Arc,
};
use strum::{AsRefStr, EnumString};
use tracing::info;

#[derive(Envconfig, Clone)] // Intentionally no Debug so secret is not printed
pub struct StorageConfig {
    #[envconfig(from = "STORAGE_TYPE", default = "memory")]
    pub storage_type: StorageConfigType,
    #[envconfig(from = "STORAGE_DATABASE_URL", default = "mongodb://localhost:27017")]
    pub database_url: String,
    #[envconfig(from = "STORAGE_DATABASE_NAME", default = "database")]
    pub database_name: String,
    #[envconfig(from = "STORAGE_COLLECTION_NAME", default = "backend-storage")]
    pub collection_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageConfigType::Memory,
            database_url: "mongodb://localhost:27017".to_owned(),
            database_name: "database".to_owned(),
            collection_name: "backend-storage".to_owned(),
        }
    }
}

impl Display for StorageConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "STORAGE_TYPE: {}", self.storage_type.as_ref())?;
        writeln!(f, "STORAGE_DATABASE_URL: ****")?;
        writeln!(f, "STORAGE_DATABASE_NAME: {}", self.database_name)?;
        writeln!(f, "STORAGE_COLLECTION_NAME: {}", self.collection_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum StorageConfigType {
    Memory,
    Mongo,
}

impl StorageConfigType {
    pub async fn init(&self, config: &StorageConfig) -> Result<Arc<dyn Storage>, DbSecretsError> {
        match self {
            StorageConfigType::Memory => {
                info!("Using in-memory storage, configuration will not survive a restart");
                Ok(Arc::new(InMemoryStorage::new()))
            }
            StorageConfigType::Mongo => {
                let client = Client::with_uri_str(&config.database_url).await?;
                let database = client.database(&config.database_name);

                Ok(Arc::new(MongoStorage::new(
                    &database,
                    &config.collection_name,
                )))
            }
        }
    }
}
