//! CLI-specific error types
//!
//! Every CLI error is fatal; main prints it and exits non-zero.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store initialization error
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Runtime or socket error
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
