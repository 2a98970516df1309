//! Student record types

use serde::{Deserialize, Serialize};

/// A persisted student row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Request body for create and update.
///
/// Every field is optional at decode time so that a missing field surfaces
/// as a validation error rather than a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
}

/// A payload that passed validation and is ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: i64,
}
