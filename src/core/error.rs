use thiserror::Error;

use super::entity::EntityKey;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to convert property '{property}' to {target} (stored as {actual})")]
    Conversion {
        property: String,
        target: &'static str,
        actual: &'static str,
    },

    #[error("Invalid offset point '{value}': {reason}")]
    InvalidOffset { value: String, reason: String },

    #[error("Diagnostics source '{0}' not found")]
    NotFound(EntityKey),

    #[error("Diagnostics source '{0}' was modified since it was loaded")]
    Conflict(EntityKey),

    #[error("Diagnostics source '{0}' already exists")]
    AlreadyExists(EntityKey),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Lock error: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, SourceError>;

impl<T> From<std::sync::PoisonError<T>> for SourceError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::Lock(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}
