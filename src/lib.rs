//! students-api - HTTP CRUD service for student records backed by SQLite

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod storage;
pub mod student;
