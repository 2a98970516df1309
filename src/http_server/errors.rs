//! # HTTP Errors
//!
//! Every handler failure maps to a status code and the standard envelope
//! `{"status": "Error", "error": ...}`. The `error` member is a string for
//! general errors and a list of field errors for validation failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::storage::StorageError;
use crate::student::FieldError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Handler errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body was empty or whitespace
    #[error("empty Body")]
    EmptyBody,

    /// Request body is not a JSON student object
    #[error("{0}")]
    MalformedBody(String),

    /// Path id is not an integer
    #[error("invalid student id {raw:?}: {reason}")]
    InvalidId { raw: String, reason: String },

    /// One or more fields violated a rule
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Storage call failed, including not-found
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Get HTTP status code for this error.
    ///
    /// Not-found is reported as 500 like every other storage failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyBody
            | ApiError::MalformedBody(_)
            | ApiError::InvalidId { .. }
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Payload of the `error` member
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

/// Standard error envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub error: ErrorDetail,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let error = match err {
            ApiError::Validation(fields) => ErrorDetail::Fields(fields),
            other => ErrorDetail::Message(other.to_string()),
        };
        Self {
            status: "Error",
            error,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log_event_with_fields(
                Event::RequestFailed,
                &[("error", self.to_string().as_str()), ("status", status.as_str())],
            );
        }
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::StudentPayload;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::EmptyBody.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MalformedBody("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Storage(StorageError::NotFound(1)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_general_envelope() {
        let body = serde_json::to_value(ErrorResponse::from(ApiError::EmptyBody)).unwrap();
        assert_eq!(body["status"], "Error");
        assert_eq!(body["error"], "empty Body");
    }

    #[test]
    fn test_validation_envelope_lists_fields() {
        let errors = StudentPayload::default().validate().unwrap_err();
        let body = serde_json::to_value(ErrorResponse::from(ApiError::Validation(errors))).unwrap();

        assert_eq!(body["status"], "Error");
        let fields: Vec<_> = body["error"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(fields, vec!["name", "email", "age"]);
    }

    #[test]
    fn test_invalid_id_message() {
        let err = ApiError::InvalidId {
            raw: "abc".into(),
            reason: "invalid digit found in string".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid student id \"abc\": invalid digit found in string"
        );
    }
}
