//! Observability for the students service
//!
//! One-line JSON logs with deterministic key ordering, and a closed set of
//! typed events covering boot, serving, shutdown and request failures.
//!
//! ```ignore
//! use students_api::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::ServerStarted, &[("address", "127.0.0.1:8082")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event at the severity the event implies
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let name = event.as_str();
    match event.severity() {
        Severity::Info => Logger::info(name, fields),
        Severity::Warn => Logger::warn(name, fields),
        Severity::Error => Logger::error(name, fields),
        Severity::Fatal => Logger::fatal(name, fields),
    }
}
