//! # HTTP Server Module
//!
//! Axum server exposing the student resource.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/students` - List and create
//! - `/api/students/{id}` - Read, update and delete one student

pub mod config;
pub mod errors;
pub mod server;
pub mod student_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorDetail, ErrorResponse};
pub use server::{health_routes, shutdown_signal, HttpServer, ShutdownOutcome};
pub use student_routes::student_routes;
