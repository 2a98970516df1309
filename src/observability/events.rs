//! Observable events

use std::fmt;

use super::logger::Severity;

/// Events emitted by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    /// Configuration file parsed and validated
    ConfigLoaded,
    /// Database opened and schema bootstrapped
    StorageInitialized,
    /// Listener bound, serving requests
    ServerStarted,
    /// Termination signal received, draining
    ShutdownStart,
    /// All in-flight requests finished and the store is closed
    ShutdownComplete,
    /// Grace period expired with requests still in flight
    ShutdownTimeout,
    /// Startup could not complete (FATAL)
    BootFailed,

    // Requests
    /// A handler is resolving a student by path id
    StudentLookup,
    /// A request was answered with a server error
    RequestFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StorageInitialized => "STORAGE_INITIALIZED",
            Event::ServerStarted => "SERVER_STARTED",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::ShutdownTimeout => "SHUTDOWN_TIMEOUT",
            Event::BootFailed => "BOOT_FAILED",
            Event::StudentLookup => "STUDENT_LOOKUP",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::BootFailed => Severity::Fatal,
            Event::RequestFailed => Severity::Error,
            Event::ShutdownTimeout => Severity::Warn,
            _ => Severity::Info,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
