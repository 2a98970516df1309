//! Service configuration file
//!
//! ```json
//! {
//!   "env": "dev",
//!   "storage_path": "storage/storage.db",
//!   "http_server": { "host": "127.0.0.1", "port": 8082 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;

use super::errors::{CliError, CliResult};

/// Configuration loaded once at process start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Deployment environment name (default "production")
    #[serde(default = "default_env")]
    pub env: String,

    /// SQLite database file (required)
    pub storage_path: PathBuf,

    /// Pool size (default 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default)]
    pub http_server: HttpServerConfig,

    /// Drain period after a termination signal (default 5s)
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

fn default_env() -> String {
    "production".to_string()
}
fn default_max_connections() -> u32 {
    5
}
fn default_shutdown_grace_secs() -> u64 {
    5
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.env.trim().is_empty() {
            return Err(CliError::config_error("env must not be empty"));
        }

        if self.storage_path.as_os_str().is_empty() {
            return Err(CliError::config_error("storage_path must not be empty"));
        }

        if self.max_connections == 0 {
            return Err(CliError::config_error("max_connections must be > 0"));
        }

        Ok(())
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}
