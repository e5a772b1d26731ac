//! Domain-level error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Domain errors - input that breaks a business rule.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Document store failures. Always recoverable except `Init` at startup.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to initialise store at {path}: {source}")]
    Init { path: PathBuf, source: io::Error },

    #[error("I/O error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to decode document: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("No ids left in the {collection} sequence")]
    IdsExhausted { collection: &'static str },

    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Forbidden")]
    Forbidden,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl RepoError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
