//! students-api entry point
//!
//! Parses arguments and delegates to the CLI module. Any error is fatal:
//! it is logged and the process exits non-zero.

use students_api::cli;
use students_api::observability::{log_event_with_fields, Event};

fn main() {
    if let Err(e) = cli::run() {
        log_event_with_fields(
            Event::BootFailed,
            &[("code", e.code_str()), ("error", e.message())],
        );
        std::process::exit(1);
    }
}
