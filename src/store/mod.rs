//! # Record Store Adapter
//!
//! Thin interface over a named document collection: find (filtered,
//! optionally sorted), insert-one, update-one ($set merge), delete-one.
//! Documents are schema-less JSON objects persisted verbatim; ids are
//! store-assigned UUID strings under the `_id` key.

pub mod errors;
pub mod filter;
pub mod memory;
pub mod sort;

use serde_json::Value;

pub use errors::{StoreError, StoreResult};
pub use filter::Filter;
pub use memory::MemoryStore;
pub use sort::{SortDirection, SortSpec};

/// Document id key
pub const ID_FIELD: &str = "_id";

/// Outcome of an insert-one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Id of the inserted document
    pub inserted_id: String,
}

/// Outcome of an update-one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Number of documents matched by the id (0 or 1)
    pub matched_count: u64,
    /// Number of documents actually changed (0 or 1)
    pub modified_count: u64,
}

/// Outcome of a delete-one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Number of documents removed (0 or 1)
    pub deleted_count: u64,
}

/// Store interface for collection operations
///
/// Lookups that match nothing are successes with empty results; only
/// infrastructure failures (poisoned lock, malformed id, unique-index
/// conflict) surface as `StoreError`.
pub trait DocumentStore: Send + Sync {
    /// Find documents matching a filter, optionally sorted
    fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort: Option<&SortSpec>,
    ) -> StoreResult<Vec<Value>>;

    /// Insert a document, assigning an id when absent
    fn insert_one(&self, collection: &str, document: Value) -> StoreResult<InsertOutcome>;

    /// Merge the given fields into the document with the given id
    fn update_one(&self, collection: &str, id: &str, set: &Value) -> StoreResult<UpdateOutcome>;

    /// Delete the document with the given id
    fn delete_one(&self, collection: &str, id: &str) -> StoreResult<DeleteOutcome>;
}
