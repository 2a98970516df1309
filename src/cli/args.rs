//! CLI argument definitions using clap
//!
//! Commands:
//! - students-api serve --config <path>
//! - students-api init --config <path>
//!
//! `--config` falls back to the `CONFIG_PATH` environment variable.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// students-api - HTTP CRUD service for student records
#[derive(Parser, Debug)]
#[command(name = "students-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the store and serve the HTTP API until a termination signal
    Serve {
        /// Path to configuration file
        #[arg(long, env = "CONFIG_PATH", default_value = "./config/local.json")]
        config: PathBuf,
    },

    /// Create the database file and students table, then exit
    Init {
        /// Path to configuration file
        #[arg(long, env = "CONFIG_PATH", default_value = "./config/local.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_config() {
        let cli = Cli::try_parse_from(["students-api", "serve", "--config", "/etc/students.json"])
            .unwrap();
        match cli.command {
            Command::Serve { config } => assert_eq!(config, PathBuf::from("/etc/students.json")),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["students-api"]).is_err());
    }
}
