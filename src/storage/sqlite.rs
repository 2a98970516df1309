//! SQLite persistence provider
//!
//! Owns the connection pool and the `students` table. All statements use
//! bound parameters.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use crate::student::Student;

use super::errors::{StorageError, StorageResult};
use super::{Storage, DELETE_CONFIRMATION};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS students(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    email TEXT,
    age INTEGER
)";

const INSERT_STUDENT: &str = "INSERT INTO students (name, email, age) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT id, name, email, age FROM students WHERE id = ? LIMIT 1";
const SELECT_ALL: &str = "SELECT id, name, email, age FROM students";
const UPDATE_BY_ID: &str = "UPDATE students SET name = ?, email = ?, age = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM students WHERE id = ?";

/// SQLite-backed student storage
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (creating if missing) the database file at `path` and bootstrap
    /// the schema.
    pub async fn open(path: &Path, max_connections: u32) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(StorageError::query("error opening database"))?;

        Self::bootstrap(pool).await
    }

    /// Private in-memory database.
    ///
    /// Pinned to a single connection that never expires, since each SQLite
    /// memory connection is its own database.
    pub async fn open_in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(StorageError::query("error parsing in-memory url"))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(StorageError::query("error opening database"))?;

        Self::bootstrap(pool).await
    }

    async fn bootstrap(pool: SqlitePool) -> StorageResult<Self> {
        sqlx::query(CREATE_TABLE)
            .execute(&pool)
            .await
            .map_err(StorageError::query("error creating students table"))?;
        Ok(Self { pool })
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn fetch_student(&self, id: i64) -> StorageResult<Option<Student>> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::query("Query Error"))?;

        row.as_ref()
            .map(student_from_row)
            .transpose()
            .map_err(StorageError::query("error scanning row"))
    }
}

fn student_from_row(row: &SqliteRow) -> Result<Student, sqlx::Error> {
    Ok(Student {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        age: row.try_get("age")?,
    })
}

impl Storage for SqliteStorage {
    async fn create_student(&self, name: &str, email: &str, age: i64) -> StorageResult<i64> {
        let result = sqlx::query(INSERT_STUDENT)
            .bind(name)
            .bind(email)
            .bind(age)
            .execute(&self.pool)
            .await
            .map_err(StorageError::query("error executing insert"))?;

        Ok(result.last_insert_rowid())
    }

    async fn get_student_by_id(&self, id: i64) -> StorageResult<Student> {
        self.fetch_student(id)
            .await?
            .ok_or(StorageError::NotFound(id))
    }

    async fn get_all_students(&self) -> StorageResult<Vec<Student>> {
        let rows = sqlx::query(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::query("error executing query"))?;

        rows.iter()
            .map(student_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StorageError::query("error scanning row"))
    }

    async fn update_student_by_id(
        &self,
        id: i64,
        name: &str,
        email: &str,
        age: i64,
    ) -> StorageResult<Student> {
        let result = sqlx::query(UPDATE_BY_ID)
            .bind(name)
            .bind(email)
            .bind(age)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::query("error executing update"))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id));
        }

        // Deleted between the update and the read-back
        self.fetch_student(id)
            .await?
            .ok_or(StorageError::NotFound(id))
    }

    async fn delete_student_by_id(&self, id: i64) -> StorageResult<String> {
        if self.fetch_student(id).await?.is_none() {
            return Err(StorageError::NotFound(id));
        }

        let result = sqlx::query(DELETE_BY_ID)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::query("error executing delete"))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id));
        }

        Ok(DELETE_CONFIRMATION.to_string())
    }
}
