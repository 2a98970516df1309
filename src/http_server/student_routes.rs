//! Student HTTP Routes
//!
//! CRUD endpoints for the student resource. Handlers are generic over the
//! `Storage` implementation injected as router state.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::observability::{log_event_with_fields, Event};
use crate::storage::Storage;
use crate::student::{NewStudent, Student, StudentPayload};

use super::errors::{ApiError, ApiResult};

// ==================
// Response Types
// ==================

/// Body of a successful create
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    #[serde(rename = "Success")]
    pub success: &'static str,
    #[serde(rename = "Data")]
    pub data: i64,
}

/// Body of a successful delete
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
    pub status: u16,
}

// ==================
// Student Routes
// ==================

/// Create student routes, to be nested under `/api`
pub fn student_routes<S: Storage>(storage: Arc<S>) -> Router {
    Router::new()
        .route(
            "/students",
            get(list_students_handler::<S>).post(create_student_handler::<S>),
        )
        .route(
            "/students/:id",
            get(get_student_handler::<S>)
                .put(update_student_handler::<S>)
                .delete(delete_student_handler::<S>),
        )
        .with_state(storage)
}

// ==================
// Helper Functions
// ==================

fn parse_id(raw: &str) -> ApiResult<i64> {
    log_event_with_fields(Event::StudentLookup, &[("id", raw)]);
    raw.parse::<i64>().map_err(|e| ApiError::InvalidId {
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode and validate a create/update body
fn decode_student(body: &[u8]) -> ApiResult<NewStudent> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::EmptyBody);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))?;

    // A derived struct deserializer also accepts sequences; only objects are students
    if !value.is_object() {
        return Err(ApiError::MalformedBody(format!(
            "expected a JSON object, found {}",
            json_type_name(&value)
        )));
    }

    let payload: StudentPayload =
        serde_json::from_value(value).map_err(|e| ApiError::MalformedBody(e.to_string()))?;

    payload.validate().map_err(ApiError::Validation)
}

// ==================
// Handlers
// ==================

async fn list_students_handler<S: Storage>(
    State(storage): State<Arc<S>>,
) -> ApiResult<Json<Vec<Student>>> {
    let students = storage.get_all_students().await?;
    Ok(Json(students))
}

async fn create_student_handler<S: Storage>(
    State(storage): State<Arc<S>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let student = decode_student(&body)?;

    let id = storage
        .create_student(&student.name, &student.email, student.age)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: "OK",
            data: id,
        }),
    ))
}

async fn get_student_handler<S: Storage>(
    State(storage): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Student>> {
    let id = parse_id(&raw_id)?;
    let student = storage.get_student_by_id(id).await?;
    Ok(Json(student))
}

async fn update_student_handler<S: Storage>(
    State(storage): State<Arc<S>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Student>> {
    let id = parse_id(&raw_id)?;
    let student = decode_student(&body)?;

    // Existence pre-check; the store re-checks affected rows on update
    storage.get_student_by_id(id).await?;

    let updated = storage
        .update_student_by_id(id, &student.name, &student.email, student.age)
        .await?;
    Ok(Json(updated))
}

async fn delete_student_handler<S: Storage>(
    State(storage): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    let id = parse_id(&raw_id)?;

    storage.get_student_by_id(id).await?;

    let message = storage.delete_student_by_id(id).await?;
    Ok(Json(DeletedResponse {
        message,
        status: StatusCode::OK.as_u16(),
    }))
}
