//! Student storage subsystem
//!
//! The `Storage` trait is the seam between HTTP handlers and persistence.
//! Handlers are generic over it; the process wires in `SqliteStorage`, tests
//! may use `InMemoryStorage`.
//!
//! Every operation is self-contained: there is no transaction shared across
//! calls and no application-level lock around the handle. Concurrency
//! control is left to the store.

mod errors;
mod memory;
mod sqlite;

use std::future::Future;

use crate::student::Student;

pub use errors::{StorageError, StorageResult};
pub use memory::InMemoryStorage;
pub use sqlite::SqliteStorage;

/// Confirmation returned by a successful delete
pub const DELETE_CONFIRMATION: &str = "Student deleted Successfully.";

/// CRUD contract over student records
pub trait Storage: Send + Sync + 'static {
    /// Insert a student and return the id assigned by the store
    fn create_student(
        &self,
        name: &str,
        email: &str,
        age: i64,
    ) -> impl Future<Output = StorageResult<i64>> + Send;

    /// Fetch one student, `StorageError::NotFound` if absent
    fn get_student_by_id(&self, id: i64) -> impl Future<Output = StorageResult<Student>> + Send;

    /// Fetch every student in store order. Empty store yields an empty vec.
    fn get_all_students(&self) -> impl Future<Output = StorageResult<Vec<Student>>> + Send;

    /// Overwrite name/email/age of an existing student and return the
    /// record as read back from the store
    fn update_student_by_id(
        &self,
        id: i64,
        name: &str,
        email: &str,
        age: i64,
    ) -> impl Future<Output = StorageResult<Student>> + Send;

    /// Remove a student and return a confirmation message
    fn delete_student_by_id(&self, id: i64) -> impl Future<Output = StorageResult<String>> + Send;
}
