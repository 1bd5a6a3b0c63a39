//! Observability for prestadores-api
//!
//! Structured JSON-lines logging. One log line = one event, synchronous,
//! deterministic key ordering.

pub mod logger;

pub use logger::{Logger, Severity};
