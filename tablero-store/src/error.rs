//! Error types for the record store.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A single-row fetch matched zero rows.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The query was rejected, or matched ambiguously where one row was
    /// expected.
    #[error("query error: {0}")]
    Query(String),

    /// The storage service could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data handed to the store.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl StoreError {
    /// True for the store-level "not found" condition, as opposed to a
    /// backend failure. Resolvers use this to distinguish a legitimately
    /// absent row from a broken backend.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
