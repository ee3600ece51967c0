use crate::domain::connection::ConnectionConfig;
use dbsecrets_domain::{DbSecretsError, Storage, StorageEntry, Unit};
use std::sync::Arc;

/// Fixed storage path of the one connection record of a mount.
pub const CONFIG_CONNECTION_KEY: &str = "config/connection";

/// Reads and replaces the persisted [`ConnectionConfig`]. Errors from the
/// underlying storage are returned as is and never retried.
#[derive(Clone)]
pub struct ConnectionConfigStore {
    storage: Arc<dyn Storage>,
}

impl ConnectionConfigStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn get(&self) -> Result<Option<ConnectionConfig>, DbSecretsError> {
        self.storage
            .get(CONFIG_CONNECTION_KEY)
            .await?
            .map(|entry| entry.decode_json())
            .transpose()
    }

    pub async fn put(&self, config: &ConnectionConfig) -> Result<Unit, DbSecretsError> {
        let entry = StorageEntry::json(CONFIG_CONNECTION_KEY, config)?;

        self.storage.put(&entry).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbsecrets_domain::InMemoryStorage;
    use fake::{Fake, Faker};

    #[tokio::test]
    async fn test_get_without_record() {
        let store = ConnectionConfigStore::new(Arc::new(InMemoryStorage::new()));

        assert_eq!(store.get().await.expect("get failed"), None);
    }

    #[tokio::test]
    async fn test_put_then_get_is_field_for_field_equal() {
        let storage = InMemoryStorage::new();
        let store = ConnectionConfigStore::new(Arc::new(storage.clone()));

        let config = ConnectionConfig {
            connection_url: Faker.fake(),
            connection_string: Faker.fake(),
            max_open_connections: Faker.fake(),
            max_idle_connections: Faker.fake(),
        };

        store.put(&config).await.expect("put failed");

        assert_eq!(store.get().await.expect("get failed"), Some(config));

        let raw = storage
            .get(CONFIG_CONNECTION_KEY)
            .await
            .expect("get failed")
            .expect("record missing");
        let json: serde_json::Value = raw.decode_json().expect("record is not json");
        assert!(json.get("connection_url").is_some());
        assert!(json.get("value").is_some());
    }

    #[tokio::test]
    async fn test_put_replaces_whole_record() {
        let store = ConnectionConfigStore::new(Arc::new(InMemoryStorage::new()));

        let first = ConnectionConfig {
            connection_url: "postgres://first/app".to_string(),
            connection_string: "host=legacy".to_string(),
            max_open_connections: 8,
            max_idle_connections: 4,
        };
        let second = ConnectionConfig {
            connection_url: "postgres://second/app".to_string(),
            ..Default::default()
        };

        store.put(&first).await.expect("put failed");
        store.put(&second).await.expect("put failed");

        assert_eq!(store.get().await.expect("get failed"), Some(second));
    }

    #[tokio::test]
    async fn test_corrupt_record_surfaces_error() {
        let storage = InMemoryStorage::new();
        storage
            .put(&StorageEntry::new(CONFIG_CONNECTION_KEY, b"not json".to_vec()))
            .await
            .expect("put failed");

        let store = ConnectionConfigStore::new(Arc::new(storage));

        assert!(store.get().await.is_err());
    }
}
