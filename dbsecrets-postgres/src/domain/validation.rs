use std::fmt::Display;
use thiserror::Error;

/// A candidate connection string that could not be proven usable. Returned to
/// the caller as data and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error validating connection info: {reason}")]
pub struct ValidationError {
    reason: String,
}

impl ValidationError {
    pub fn new(reason: impl Display) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
