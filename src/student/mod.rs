//! # Student Entity
//!
//! The single resource managed by the service: the persisted record, the
//! incoming payload shape, and the validation rules applied to payloads
//! before any storage call.

mod model;
mod validation;

pub use model::{NewStudent, Student, StudentPayload};
pub use validation::{FieldError, Rule, MIN_AGE};
