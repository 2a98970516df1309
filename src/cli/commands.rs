//! CLI command implementations
//!
//! Boot order for `serve`: load config, open store (schema bootstrap), bind,
//! serve until signal, drain, close store. Any failure before serving is
//! fatal.

use std::path::Path;
use std::sync::Arc;

use crate::http_server::{shutdown_signal, HttpServer};
use crate::observability::{log_event_with_fields, Event};
use crate::storage::SqliteStorage;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config } => serve(&config),
        Command::Init { config } => init(&config),
    }
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("env", config.env.as_str()),
            ("path", config_path.display().to_string().as_str()),
        ],
    );
    Ok(config)
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

async fn open_storage(config: &Config) -> CliResult<SqliteStorage> {
    let storage = SqliteStorage::open(&config.storage_path, config.max_connections).await?;
    log_event_with_fields(
        Event::StorageInitialized,
        &[
            ("env", config.env.as_str()),
            ("path", config.storage_path.display().to_string().as_str()),
            ("version", env!("CARGO_PKG_VERSION")),
        ],
    );
    Ok(storage)
}

/// Create the database and schema, then exit
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    runtime()?.block_on(async {
        let storage = open_storage(&config).await?;
        storage.close().await;
        Ok::<(), CliError>(())
    })
}

/// Serve the HTTP API until Ctrl-C or SIGTERM
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    runtime()?.block_on(async {
        let storage = open_storage(&config).await?;

        let server = HttpServer::new(config.http_server.clone(), Arc::new(storage.clone()));
        let listener = match server.bind().await {
            Ok(listener) => listener,
            Err(e) => {
                storage.close().await;
                return Err(CliError::boot_failed(format!(
                    "Failed to bind {}: {}",
                    config.http_server.socket_addr(),
                    e
                )));
            }
        };

        let outcome = server
            .serve(listener, shutdown_signal(), config.shutdown_grace())
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)));

        storage.close().await;
        let outcome = outcome?;

        log_event_with_fields(
            Event::ShutdownComplete,
            &[("outcome", format!("{:?}", outcome).as_str())],
        );
        Ok::<(), CliError>(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_database() {
        let tmp = TempDir::new().unwrap();
        let db_path = tmp.path().join("data").join("students.db");
        let config_path = tmp.path().join("config.json");
        fs::write(
            &config_path,
            serde_json::json!({ "env": "test", "storage_path": &db_path }).to_string(),
        )
        .unwrap();

        init(&config_path).unwrap();
        assert!(db_path.exists());

        // Bootstrap is idempotent
        init(&config_path).unwrap();
    }

    #[test]
    fn test_unbindable_address_is_boot_failure() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.json");
        fs::write(
            &config_path,
            serde_json::json!({
                "env": "test",
                "storage_path": tmp.path().join("students.db"),
                "http_server": { "host": "not an address", "port": 8082 }
            })
            .to_string(),
        )
        .unwrap();

        let err = serve(&config_path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::BootFailed);
        assert!(err.message().contains("not an address"));
    }

    #[test]
    fn test_serve_without_config_fails_before_binding() {
        let tmp = TempDir::new().unwrap();
        let err = serve(&tmp.path().join("missing.json")).unwrap_err();
        assert_eq!(err.code_str(), "STUDENTS_CONFIG_ERROR");
    }
}
