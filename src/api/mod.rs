//! # Prestadores REST API
//!
//! HTTP endpoints for the prestador collection: validation-gated writes,
//! sorted reads, and the error envelope contract.

pub mod errors;
pub mod handlers;
pub mod response;
pub mod server;

pub use errors::{ApiError, ApiResult, ErrorEnvelope};
pub use handlers::{prestador_routes, ApiState};
pub use response::{ApiInfo, DeleteResult, InsertResult, UpdateResult};
pub use server::ApiServer;
