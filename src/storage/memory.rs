//! In-memory student storage
//!
//! Test double for handler tests that do not need SQL. Ids are assigned
//! monotonically and never reused, matching the SQLite provider.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::student::Student;

use super::errors::{StorageError, StorageResult};
use super::{Storage, DELETE_CONFIRMATION};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Student>,
}

/// Map-backed storage
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    table: RwLock<Table>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored students
    pub fn len(&self) -> usize {
        self.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Table> {
        self.table.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for InMemoryStorage {
    async fn create_student(&self, name: &str, email: &str, age: i64) -> StorageResult<i64> {
        let mut table = self.write();
        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(
            id,
            Student {
                id,
                name: name.to_string(),
                email: email.to_string(),
                age,
            },
        );
        Ok(id)
    }

    async fn get_student_by_id(&self, id: i64) -> StorageResult<Student> {
        self.read()
            .rows
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }

    async fn get_all_students(&self) -> StorageResult<Vec<Student>> {
        Ok(self.read().rows.values().cloned().collect())
    }

    async fn update_student_by_id(
        &self,
        id: i64,
        name: &str,
        email: &str,
        age: i64,
    ) -> StorageResult<Student> {
        let mut table = self.write();
        let student = table.rows.get_mut(&id).ok_or(StorageError::NotFound(id))?;
        student.name = name.to_string();
        student.email = email.to_string();
        student.age = age;
        Ok(student.clone())
    }

    async fn delete_student_by_id(&self, id: i64) -> StorageResult<String> {
        self.write()
            .rows
            .remove(&id)
            .map(|_| DELETE_CONFIRMATION.to_string())
            .ok_or(StorageError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_crud_cycle() {
        let storage = InMemoryStorage::new();
        assert!(storage.is_empty());

        let id = storage.create_student("Ann", "ann@x.com", 20).await.unwrap();
        assert_eq!(storage.get_student_by_id(id).await.unwrap().name, "Ann");

        let updated = storage
            .update_student_by_id(id, "Ann B", "ann@x.com", 21)
            .await
            .unwrap();
        assert_eq!(updated.age, 21);

        storage.delete_student_by_id(id).await.unwrap();
        assert!(storage.get_student_by_id(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let storage = InMemoryStorage::new();
        let a = storage.create_student("A", "a@x.com", 1).await.unwrap();
        storage.delete_student_by_id(a).await.unwrap();
        let b = storage.create_student("B", "b@x.com", 1).await.unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(storage.len(), 1);
    }
}
