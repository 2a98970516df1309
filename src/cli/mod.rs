//! CLI module for students-api
//!
//! Provides command-line interface for:
//! - serve: Boot the store and serve HTTP until a termination signal
//! - init: Bootstrap the database file and exit

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
