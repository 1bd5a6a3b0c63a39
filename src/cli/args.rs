//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// prestadores-api - REST API for service-provider records
#[derive(Parser, Debug)]
#[command(name = "prestadores-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./prestadores.json")]
    pub config: PathBuf,

    /// Override the configured port
    #[arg(long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
