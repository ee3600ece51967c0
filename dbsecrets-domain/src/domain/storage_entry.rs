use crate::{DbSecretsError, InternalError};
use serde::{de::DeserializeOwned, Serialize};

/// A single record in the backend's key/value storage. The value is opaque
/// to the storage layer; records written through [`StorageEntry::json`]
/// hold a JSON document.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageEntry {
    pub key: String,
    pub value: Vec<u8>,
}

impl StorageEntry {
    pub fn new(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn json<T: Serialize>(key: impl Into<String>, value: &T) -> Result<Self, DbSecretsError> {
        let key = key.into();
        let value = serde_json::to_vec(value).map_err(|e| {
            InternalError::serialize_error(
                &format!("Failed to encode storage entry {key}: {e}"),
                None,
            )
        })?;

        Ok(Self { key, value })
    }

    pub fn decode_json<T: DeserializeOwned>(&self) -> Result<T, DbSecretsError> {
        serde_json::from_slice(&self.value).map_err(|e| {
            InternalError::deserialize_error(
                &format!("Failed to decode storage entry {}: {e}", self.key),
                None,
            )
        })
    }
}

// Values routinely contain credentials, only the key is printed.
impl std::fmt::Debug for StorageEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageEntry")
            .field("key", &self.key)
            .field("value", &format_args!("<{} bytes>", self.value.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        url: String,
        size: i32,
    }

    #[test]
    fn test_json_entry_decodes_to_same_value() {
        let record = Record {
            url: "postgres://localhost/db".to_string(),
            size: 4,
        };

        let entry = StorageEntry::json("config/record", &record).expect("encode failed");

        assert_eq!(entry.key, "config/record");
        assert_eq!(entry.decode_json::<Record>().expect("decode failed"), record);
    }

    #[test]
    fn test_decode_of_foreign_bytes_is_deserialize_error() {
        let entry = StorageEntry::new("config/record", b"not json".to_vec());

        let error = entry
            .decode_json::<Record>()
            .expect_err("decode should fail");

        assert!(matches!(
            error,
            DbSecretsError::Internal(InternalError::DeserializeError { .. })
        ));
    }

    #[test]
    fn test_debug_does_not_print_value() {
        let entry = StorageEntry::new("config/connection", b"secret".to_vec());

        let debug = format!("{entry:?}");

        assert!(debug.contains("config/connection"));
        assert!(!debug.contains("secret"));
    }
}
