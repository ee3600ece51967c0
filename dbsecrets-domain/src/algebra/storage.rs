use crate::{DbSecretsError, StorageEntry, Unit};
use async_trait::async_trait;
use mongodb::{
    bson::{doc, spec::BinarySubtype, Binary},
    options::ReplaceOptions,
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;

/// Durable key/value storage used by the backend. Writes replace the whole
/// record stored under a key; there is no versioning and no partial update.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<StorageEntry>, DbSecretsError>;

    async fn put(&self, entry: &StorageEntry) -> Result<Unit, DbSecretsError>;

    /// Round-trips to the backing store without touching any record.
    async fn probe(&self) -> Result<Unit, DbSecretsError>;
}

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<StorageEntry>, DbSecretsError> {
        let entries = self.entries.read().await;

        Ok(entries
            .get(key)
            .map(|value| StorageEntry::new(key, value.clone())))
    }

    async fn put(&self, entry: &StorageEntry) -> Result<Unit, DbSecretsError> {
        self.entries
            .write()
            .await
            .insert(entry.key.clone(), entry.value.clone());

        Ok(())
    }

    async fn probe(&self) -> Result<Unit, DbSecretsError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MongoEntry {
    #[serde(rename = "_id")]
    key: String,
    value: Binary,
}

/// Stores every key as its own document, keyed by `_id`.
#[derive(Debug, Clone)]
pub struct MongoStorage {
    database: Database,
    collection: Collection<MongoEntry>,
}

impl MongoStorage {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection::<MongoEntry>(collection),
        }
    }
}

#[async_trait]
impl Storage for MongoStorage {
    async fn get(&self, key: &str) -> Result<Option<StorageEntry>, DbSecretsError> {
        let entry = self.collection.find_one(doc! { "_id": key }, None).await?;

        Ok(entry.map(|entry| StorageEntry::new(entry.key, entry.value.bytes)))
    }

    async fn put(&self, entry: &StorageEntry) -> Result<Unit, DbSecretsError> {
        let document = MongoEntry {
            key: entry.key.clone(),
            value: Binary {
                subtype: BinarySubtype::Generic,
                bytes: entry.value.clone(),
            },
        };
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "_id": &entry.key }, document, options)
            .await?;

        Ok(())
    }

    async fn probe(&self) -> Result<Unit, DbSecretsError> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;

        Ok(())
    }
}
