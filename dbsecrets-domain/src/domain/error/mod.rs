#[cfg(feature = "axum-error")]
pub mod axum_error;

use crate::prelude::StringExt;
use http::StatusCode;
use serde::Serialize;
use std::{
    convert::AsRef,
    error::Error as StdError,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
};
use strum::AsRefStr;
use thiserror::Error as ThisError;

pub trait ErrorMeta {
    fn code(&self) -> ErrorCode;
    fn key(&self) -> ErrorKey;
    fn message(&self) -> ErrorMessage;
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct ErrorKey(String);

impl ErrorKey {
    pub fn internal(key: &str, subtype: Option<&str>) -> Self {
        match subtype {
            Some(subtype) => ErrorKey(format!("err::internal::{key}::{subtype}")),
            None => ErrorKey(format!("err::internal::{key}")),
        }
    }

    pub fn application(key: &str, subtype: Option<&str>) -> Self {
        match subtype {
            Some(subtype) => ErrorKey(format!("err::application::{key}::{subtype}")),
            None => ErrorKey(format!("err::application::{key}")),
        }
    }
}

impl Display for ErrorKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct ErrorMessage(String);

impl AsRef<str> for ErrorMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Failures raised by infrastructure such as the storage backend or the
/// process configuration.
#[derive(ThisError, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "PascalCase")]
pub enum InternalError {
    #[error("An unknown error occurred: {}", .message)]
    UnknownError {
        message: String,
        subtype: Option<String>,
    },
    #[error("A timeout occurred: {}", .message)]
    Timeout {
        message: String,
        subtype: Option<String>,
    },
    #[error("A connection error occurred: {}", .message)]
    ConnectionError {
        message: String,
        subtype: Option<String>,
    },
    #[error("Entity not found: {}", .message)]
    KeyNotFound {
        message: String,
        subtype: Option<String>,
    },
    #[error("Argument provided is invalid: {}", .message)]
    InvalidArgument {
        message: String,
        subtype: Option<String>,
    },
    #[error("An error while performing an IO operation: {}", .message)]
    IOErr {
        message: String,
        subtype: Option<String>,
    },
    #[error("Configuration error: {}", .message)]
    ConfigurationError {
        message: String,
        subtype: Option<String>,
    },
    #[error("Serialization error: {}", .message)]
    SerializeError {
        message: String,
        subtype: Option<String>,
    },
    #[error("Deserialization error: {}", .message)]
    DeserializeError {
        message: String,
        subtype: Option<String>,
    },
}

impl InternalError {
    pub fn unknown(message: &str, subtype: Option<&str>) -> DbSecretsError {
        DbSecretsError::internal(InternalError::UnknownError {
            message: message.to_string(),
            subtype: subtype.map(|s| s.snake_case()),
        })
    }

    pub fn timeout(message: &str, subtype: Option<&str>) -> DbSecretsError {
        DbSecretsError::internal(InternalError::Timeout {
            message: message.to_string(),
            subtype: subtype.map(|s| s.snake_case()),
        })
    }

    pub fn connection_error(message: &str, subtype: Option<&str>) -> DbSecretsError {
        DbSecretsError::internal(InternalError::ConnectionError {
            message: message.to_string(),
            subtype: subtype.map(|s| s.snake_case()),
        })
    }

    pub fn key_not_found(message: &str, subtype: Option<&str>) -> DbSecretsError {
        DbSecretsError::internal(InternalError::KeyNotFound {
            message: message.to_string(),
            subtype: subtype.map(|s| s.snake_case()),
        })
    }

    pub fn invalid_argument(message: &str, subtype: Option<&str>) -> DbSecretsError {
        DbSecretsError::internal(InternalError::InvalidArgument {
            message: message.to_string(),
            subtype: subtype.map(|s| s.snake_case()),
        })
    }

    pub fn io_err(message: &str, subtype: Option<&str>) -> DbSecretsError {
        DbSecretsError::internal(InternalError::IOErr {
            message: message.to_string(),
            subtype: subtype.map(|s| s.snake_case()),
        })
    }

    pub fn configuration_error(message: &str, subtype: Option<&str>) -> DbSecretsError {
        DbSecretsError::internal(InternalError::ConfigurationError {
            message: message.to_string(),
            subtype: subtype.map(|s| s.snake_case()),
        })
    }

    pub fn serialize_error(message: &str, subtype: Option<&str>) -> DbSecretsError {
        DbSecretsError::internal(InternalError::SerializeError {
            message: message.to_string(),
            subtype: subtype.map(|s| s.snake_case()),
        })
    }

    pub fn deserialize_error(message: &str, subtype: Option<&str>) -> DbSecretsError {
        DbSecretsError::internal(InternalError::DeserializeError {
            message: message.to_string(),
            subtype: subtype.map(|s| s.snake_case()),
        })
    }
}

impl ErrorMeta for InternalError {
    fn code(&self) -> ErrorCode {
        match self {
            InternalError::UnknownError { .. } => ErrorCode(1000),
            InternalError::Timeout { .. } => ErrorCode(1002),
            InternalError::ConnectionError { .. } => ErrorCode(1003),
            InternalError::KeyNotFound { .. } => ErrorCode(1004),
            InternalError::InvalidArgument { .. } => ErrorCode(1005),
            InternalError::IOErr { .. } => ErrorCode(1006),
            InternalError::ConfigurationError { .. } => ErrorCode(1009),
            InternalError::SerializeError { .. } => ErrorCode(1011),
            InternalError::DeserializeError { .. } => ErrorCode(1012),
        }
    }

    fn key(&self) -> ErrorKey {
        match self {
            InternalError::UnknownError { subtype, .. } => {
                ErrorKey::internal("unknown", subtype.as_deref())
            }
            InternalError::Timeout { subtype, .. } => {
                ErrorKey::internal("timeout", subtype.as_deref())
            }
            InternalError::ConnectionError { subtype, .. } => {
                ErrorKey::internal("connection_error", subtype.as_deref())
            }
            InternalError::KeyNotFound { subtype, .. } => {
                ErrorKey::internal("key_not_found", subtype.as_deref())
            }
            InternalError::InvalidArgument { subtype, .. } => {
                ErrorKey::internal("invalid_argument", subtype.as_deref())
            }
            InternalError::IOErr { subtype, .. } => {
                ErrorKey::internal("io_err", subtype.as_deref())
            }
            InternalError::ConfigurationError { subtype, .. } => {
                ErrorKey::internal("configuration_error", subtype.as_deref())
            }
            InternalError::SerializeError { subtype, .. } => {
                ErrorKey::internal("serialize_error", subtype.as_deref())
            }
            InternalError::DeserializeError { subtype, .. } => {
                ErrorKey::internal("deserialize_error", subtype.as_deref())
            }
        }
    }

    fn message(&self) -> ErrorMessage {
        match self {
            InternalError::UnknownError { message, .. }
            | InternalError::Timeout { message, .. }
            | InternalError::ConnectionError { message, .. }
            | InternalError::KeyNotFound { message, .. }
            | InternalError::InvalidArgument { message, .. }
            | InternalError::IOErr { message, .. }
            | InternalError::ConfigurationError { message, .. }
            | InternalError::SerializeError { message, .. }
            | InternalError::DeserializeError { message, .. } => ErrorMessage(message.to_string()),
        }
    }
}

impl Debug for InternalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}\n", &self)?;
        let mut current = self.source();

        while let Some(cause) = current {
            writeln!(f, "Caused by:\n\t{}", cause)?;
            current = cause.source();
        }

        Ok(())
    }
}

/// Failures reported back to the caller of the HTTP surface.
#[derive(ThisError, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "PascalCase")]
pub enum ApplicationError {
    #[error("Bad Request: {}", .message)]
    BadRequest {
        message: String,
        subtype: Option<String>,
    },
    #[error("Internal Server Error: {}", .message)]
    InternalServerError {
        message: String,
        subtype: Option<String>,
    },
    #[error("Not Found: {}", .message)]
    NotFound {
        message: String,
        subtype: Option<String>,
    },
    #[error("Service Unavailable: {}", .message)]
    ServiceUnavailable {
        message: String,
        subtype: Option<String>,
    },
}

impl ApplicationError {
    pub fn not_found(message: &str, subtype: Option<&str>) -> DbSecretsError {
        DbSecretsError::application(ApplicationError::NotFound {
            message: message.to_string(),
            subtype: subtype.map(|s| s.snake_case()),
        })
    }
}

impl ErrorMeta for ApplicationError {
    fn code(&self) -> ErrorCode {
        match self {
            ApplicationError::BadRequest { .. } => ErrorCode(2000),
            ApplicationError::InternalServerError { .. } => ErrorCode(2003),
            ApplicationError::NotFound { .. } => ErrorCode(2005),
            ApplicationError::ServiceUnavailable { .. } => ErrorCode(2008),
        }
    }

    fn key(&self) -> ErrorKey {
        match self {
            ApplicationError::BadRequest { subtype, .. } => {
                ErrorKey::application("bad_request", subtype.as_deref())
            }
            ApplicationError::InternalServerError { subtype, .. } => {
                ErrorKey::application("internal_server_error", subtype.as_deref())
            }
            ApplicationError::NotFound { subtype, .. } => {
                ErrorKey::application("not_found", subtype.as_deref())
            }
            ApplicationError::ServiceUnavailable { subtype, .. } => {
                ErrorKey::application("service_unavailable", subtype.as_deref())
            }
        }
    }

    fn message(&self) -> ErrorMessage {
        match self {
            ApplicationError::BadRequest { message, .. }
            | ApplicationError::InternalServerError { message, .. }
            | ApplicationError::NotFound { message, .. }
            | ApplicationError::ServiceUnavailable { message, .. } => {
                ErrorMessage(message.to_string())
            }
        }
    }
}

impl Debug for ApplicationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}\n", &self)?;
        let mut current = self.source();

        while let Some(cause) = current {
            writeln!(f, "Caused by:\n\t{}", cause)?;
            current = cause.source();
        }

        Ok(())
    }
}

impl From<InternalError> for ApplicationError {
    fn from(error: InternalError) -> Self {
        match error {
            InternalError::Timeout { .. }
            | InternalError::IOErr { .. }
            | InternalError::ConfigurationError { .. }
            | InternalError::SerializeError { .. }
            | InternalError::UnknownError { .. } => ApplicationError::InternalServerError {
                message: "An unknown error occurred".into(),
                subtype: None,
            },
            InternalError::ConnectionError { message, subtype } => {
                ApplicationError::ServiceUnavailable { message, subtype }
            }
            InternalError::KeyNotFound { message, subtype } => {
                ApplicationError::NotFound { message, subtype }
            }
            InternalError::InvalidArgument { message, subtype }
            | InternalError::DeserializeError { message, subtype } => {
                ApplicationError::BadRequest { message, subtype }
            }
        }
    }
}

#[derive(ThisError, Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(untagged)]
pub enum DbSecretsError {
    Internal(InternalError),
    Application(ApplicationError),
}

impl AsRef<str> for DbSecretsError {
    fn as_ref(&self) -> &str {
        match self {
            DbSecretsError::Internal(e) => e.as_ref(),
            DbSecretsError::Application(e) => e.as_ref(),
        }
    }
}

impl From<mongodb::error::Error> for DbSecretsError {
    fn from(err: mongodb::error::Error) -> Self {
        let description = err.to_string();
        match *err.kind {
            mongodb::error::ErrorKind::InvalidArgument { message, .. } => {
                InternalError::invalid_argument(&message, None)
            }
            mongodb::error::ErrorKind::Authentication { message, .. } => {
                InternalError::connection_error(&message, Some("Authentication failed"))
            }
            mongodb::error::ErrorKind::BsonDeserialization(error) => {
                InternalError::deserialize_error(&error.to_string(), Some("bson"))
            }
            mongodb::error::ErrorKind::BsonSerialization(error) => {
                InternalError::serialize_error(&error.to_string(), Some("bson"))
            }
            mongodb::error::ErrorKind::Command(error) => {
                InternalError::unknown(&error.message, Some("Command error"))
            }
            mongodb::error::ErrorKind::DnsResolve { message, .. } => {
                InternalError::connection_error(&message, Some("DNS resolution failed"))
            }
            mongodb::error::ErrorKind::Io(error) => InternalError::io_err(&error.to_string(), None),
            mongodb::error::ErrorKind::ConnectionPoolCleared { message, .. } => {
                InternalError::connection_error(&message, Some("Connection pool cleared"))
            }
            mongodb::error::ErrorKind::ServerSelection { message, .. } => {
                InternalError::connection_error(&message, Some("Server selection failed"))
            }
            mongodb::error::ErrorKind::Write(_) => {
                InternalError::io_err("Write error", Some("An error occurred while writing"))
            }
            mongodb::error::ErrorKind::Shutdown => {
                InternalError::unknown("Shutdown error", Some("The MongoDB driver has shut down"))
            }
            _ => InternalError::unknown(&description, Some("mongodb")),
        }
    }
}

impl<'a> From<&'a DbSecretsError> for StatusCode {
    fn from(value: &'a DbSecretsError) -> Self {
        match value {
            DbSecretsError::Internal(e) => match e {
                InternalError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                InternalError::ConnectionError { .. } => StatusCode::BAD_GATEWAY,
                InternalError::KeyNotFound { .. } => StatusCode::NOT_FOUND,
                InternalError::InvalidArgument { .. } | InternalError::DeserializeError { .. } => {
                    StatusCode::BAD_REQUEST
                }
                InternalError::UnknownError { .. }
                | InternalError::IOErr { .. }
                | InternalError::ConfigurationError { .. }
                | InternalError::SerializeError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            DbSecretsError::Application(e) => match e {
                ApplicationError::BadRequest { .. } => StatusCode::BAD_REQUEST,
                ApplicationError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                ApplicationError::NotFound { .. } => StatusCode::NOT_FOUND,
                ApplicationError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }
}

impl From<DbSecretsError> for StatusCode {
    fn from(value: DbSecretsError) -> Self {
        (&value).into()
    }
}

impl DbSecretsError {
    fn internal(internal: InternalError) -> Self {
        DbSecretsError::Internal(internal)
    }

    fn application(application: ApplicationError) -> Self {
        DbSecretsError::Application(application)
    }

    pub fn as_application(&self) -> DbSecretsError {
        match self {
            DbSecretsError::Application(e) => DbSecretsError::Application(e.clone()),
            DbSecretsError::Internal(e) => DbSecretsError::Application(e.clone().into()),
        }
    }

    pub fn as_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "type": self.as_ref(),
                "code": self.code().as_u16(),
                "status": StatusCode::from(self).as_u16(),
                "key": self.key().to_string(),
                "message": self.message().to_string()
            }
        })
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, DbSecretsError::Internal(_))
    }
}

impl ErrorMeta for DbSecretsError {
    fn code(&self) -> ErrorCode {
        match self {
            DbSecretsError::Internal(e) => e.code(),
            DbSecretsError::Application(e) => e.code(),
        }
    }

    fn key(&self) -> ErrorKey {
        match self {
            DbSecretsError::Internal(e) => e.key(),
            DbSecretsError::Application(e) => e.key(),
        }
    }

    fn message(&self) -> ErrorMessage {
        match self {
            DbSecretsError::Internal(e) => e.message(),
            DbSecretsError::Application(e) => e.message(),
        }
    }
}

impl Display for DbSecretsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DbSecretsError::Internal(e) => write!(f, "{}", e),
            DbSecretsError::Application(e) => write!(f, "{}", e),
        }
    }
}
