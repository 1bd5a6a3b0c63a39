//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A lock guarding the collection data was poisoned
    #[error("store lock poisoned")]
    LockPoisoned,

    /// An id did not parse as a document id
    #[error("invalid document id: {0}")]
    InvalidId(String),

    /// A write violated a unique index
    #[error("duplicate value for unique field {field}: {value}")]
    DuplicateKey { field: String, value: String },

    /// A document (or update body) was not a JSON object
    #[error("document is not an object")]
    InvalidDocument,
}
