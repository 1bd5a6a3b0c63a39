//! CLI command implementation
//!
//! Boot sequence: configuration, store + indexes, server, serve loop. The
//! store handle is built once here and passed down explicitly; nothing
//! relies on ambient globals.

use std::sync::Arc;

use crate::api::ApiServer;
use crate::config::AppConfig;
use crate::prestador::model::{fields, COLLECTION};
use crate::store::MemoryStore;

use super::args::Cli;
use super::errors::CliResult;

/// Parse arguments and boot the server
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    serve(&cli)
}

/// Resolve the effective configuration from file and flags
pub fn effective_config(cli: &Cli) -> CliResult<AppConfig> {
    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    config.validate()?;
    Ok(config)
}

/// Boot and serve until shutdown
fn serve(cli: &Cli) -> CliResult<()> {
    let config = effective_config(cli)?;

    let store = Arc::new(MemoryStore::new());
    store.ensure_unique_index(COLLECTION, fields::CNPJ)?;

    let server = ApiServer::new(config, store);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server.serve())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_effective_config_defaults_when_file_absent() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = Cli {
            config: dir.path().join("absent.json"),
            port: None,
        };

        let config = effective_config(&cli).unwrap();
        assert_eq!(config.port, 3900);
    }

    #[test]
    fn test_effective_config_port_flag_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"port": 4100}}"#).unwrap();

        let cli = Cli {
            config: PathBuf::from(file.path()),
            port: Some(5200),
        };

        let config = effective_config(&cli).unwrap();
        assert_eq!(config.port, 5200);
    }

    #[test]
    fn test_effective_config_rejects_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let cli = Cli {
            config: PathBuf::from(file.path()),
            port: None,
        };

        assert!(effective_config(&cli).is_err());
    }
}
