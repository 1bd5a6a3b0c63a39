//! # Response Formatting
//!
//! Envelopes for write operations and the liveness payload. Read endpoints
//! return bare arrays of documents. Zero-count updates and deletes carry an
//! explicit no-match indicator instead of relying on the caller to inspect
//! the counts.

use serde::Serialize;

use crate::store::{DeleteOutcome, InsertOutcome, UpdateOutcome};

/// Insert result envelope
#[derive(Debug, Clone, Serialize)]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl From<InsertOutcome> for InsertResult {
    fn from(outcome: InsertOutcome) -> Self {
        Self {
            acknowledged: true,
            inserted_id: outcome.inserted_id,
        }
    }
}

/// Update result envelope; `matched: false` means the id matched nothing
#[derive(Debug, Clone, Serialize)]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateOutcome> for UpdateResult {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            acknowledged: true,
            matched: outcome.matched_count > 0,
            matched_count: outcome.matched_count,
            modified_count: outcome.modified_count,
        }
    }
}

/// Delete result envelope; `deleted: false` means the id matched nothing
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted: bool,
    pub deleted_count: u64,
}

impl From<DeleteOutcome> for DeleteResult {
    fn from(outcome: DeleteOutcome) -> Self {
        Self {
            acknowledged: true,
            deleted: outcome.deleted_count > 0,
            deleted_count: outcome.deleted_count,
        }
    }
}

/// Liveness/version payload for the API root
#[derive(Debug, Clone, Serialize)]
pub struct ApiInfo {
    pub message: String,
    pub version: String,
}

impl ApiInfo {
    pub fn current() -> Self {
        Self {
            message: "prestadores API operational".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
