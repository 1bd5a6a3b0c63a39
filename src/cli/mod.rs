//! CLI module for prestadores-api
//!
//! Owns the boot sequence: parse arguments, load configuration, build the
//! store and its indexes, assemble the server, and enter the serve loop.

mod args;
mod commands;
mod errors;

pub use args::Cli;
pub use commands::{effective_config, run};
pub use errors::{CliError, CliResult};
