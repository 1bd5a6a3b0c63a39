//! # Document Filters
//!
//! Typed filter values for collection queries.

use serde_json::Value;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::ID_FIELD;

/// A filter over documents in a collection
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Match every document
    All,

    /// Exact equality on a field (case-sensitive, type-sensitive)
    Eq { field: String, value: Value },

    /// Case-insensitive substring match on a string field
    ContainsCi { field: String, needle: String },
}

impl Filter {
    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::Eq {
            field: field.into(),
            value,
        }
    }

    /// Create an id-equality filter, validating the id format first
    ///
    /// A malformed id is a store error, not an empty result.
    pub fn id_eq(id: &str) -> StoreResult<Self> {
        Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))?;
        Ok(Self::eq(ID_FIELD, Value::String(id.to_string())))
    }

    /// Create a case-insensitive substring filter
    pub fn contains_ci(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::ContainsCi {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Check whether a document matches this filter
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => doc.get(field) == Some(value),
            Filter::ContainsCi { field, needle } => match doc.get(field).and_then(Value::as_str) {
                Some(s) => s.to_lowercase().contains(&needle.to_lowercase()),
                None => false,
            },
        }
    }
}
