//! prestadores-api entry point
//!
//! This is a minimal entrypoint that:
//! 1. Parses CLI arguments (via cli::run)
//! 2. Boots the server (via cli::run)
//! 3. Prints errors to stderr
//! 4. Exits with non-zero on failure
//!
//! main.rs must NOT:
//! - Load configuration
//! - Initialize subsystems
//! - Open sockets or spawn runtimes
//!
//! All logic is delegated to the CLI module.

use prestadores_api::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
