//! Field validation for student payloads
//!
//! Every rule runs against every field; all violations are collected so the
//! client sees the full list in one response.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::model::{NewStudent, StudentPayload};

/// Smallest accepted age
pub const MIN_AGE: i64 = 1;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Validation rule that a field violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    /// Field is missing or blank
    Required,
    /// Field is not a well-formed email address
    Email,
    /// Field is below its minimum value
    Min,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Email => "email",
            Rule::Min => "min",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub rule: Rule,
    pub message: String,
}

impl FieldError {
    fn required(field: &'static str) -> Self {
        Self {
            field,
            rule: Rule::Required,
            message: format!("field {} is required", field),
        }
    }

    fn email(field: &'static str) -> Self {
        Self {
            field,
            rule: Rule::Email,
            message: format!("field {} must be a valid email address", field),
        }
    }

    fn min(field: &'static str, min: i64) -> Self {
        Self {
            field,
            rule: Rule::Min,
            message: format!("field {} must be at least {}", field, min),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StudentPayload {
    /// Validate the payload, returning every violated rule on failure.
    ///
    /// At most one error is reported per field: a missing field is not
    /// additionally checked for format or range.
    pub fn validate(self) -> Result<NewStudent, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = match self.name {
            Some(name) if !name.trim().is_empty() => Some(name),
            _ => {
                errors.push(FieldError::required("name"));
                None
            }
        };

        let email = match self.email {
            Some(email) if email.trim().is_empty() => {
                errors.push(FieldError::required("email"));
                None
            }
            Some(email) if !email_pattern().is_match(&email) => {
                errors.push(FieldError::email("email"));
                None
            }
            Some(email) => Some(email),
            None => {
                errors.push(FieldError::required("email"));
                None
            }
        };

        let age = match self.age {
            Some(age) if age < MIN_AGE => {
                errors.push(FieldError::min("age", MIN_AGE));
                None
            }
            Some(age) => Some(age),
            None => {
                errors.push(FieldError::required("age"));
                None
            }
        };

        match (name, email, age) {
            (Some(name), Some(email), Some(age)) if errors.is_empty() => {
                Ok(NewStudent { name, email, age })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, email: Option<&str>, age: Option<i64>) -> StudentPayload {
        StudentPayload {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            age,
        }
    }

    #[test]
    fn test_valid_payload() {
        let student = payload(Some("Ann"), Some("ann@x.com"), Some(20))
            .validate()
            .unwrap();
        assert_eq!(student.name, "Ann");
        assert_eq!(student.email, "ann@x.com");
        assert_eq!(student.age, 20);
    }

    #[test]
    fn test_missing_email() {
        let errors = payload(Some("Ann"), None, Some(20)).validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].rule, Rule::Required);
    }

    #[test]
    fn test_blank_name_is_required_violation() {
        let errors = payload(Some("   "), Some("ann@x.com"), Some(20))
            .validate()
            .unwrap_err();
        assert_eq!(errors, vec![FieldError::required("name")]);
    }

    #[test]
    fn test_bad_email_format() {
        for bad in ["ann", "ann@", "@x.com", "ann@x", "a nn@x.com"] {
            let errors = payload(Some("Ann"), Some(bad), Some(20))
                .validate()
                .unwrap_err();
            assert_eq!(errors.len(), 1, "expected one error for {:?}", bad);
            assert_eq!(errors[0].rule, Rule::Email);
        }
    }

    #[test]
    fn test_age_below_minimum() {
        let errors = payload(Some("Ann"), Some("ann@x.com"), Some(0))
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "age");
        assert_eq!(errors[0].rule, Rule::Min);
    }

    #[test]
    fn test_age_at_minimum_is_valid() {
        assert!(payload(Some("Ann"), Some("ann@x.com"), Some(MIN_AGE))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_all_errors_collected() {
        let errors = StudentPayload::default().validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "email", "age"]);
        assert!(errors.iter().all(|e| e.rule == Rule::Required));
    }

    #[test]
    fn test_field_error_serialization() {
        let value = serde_json::to_value(FieldError::min("age", 1)).unwrap();
        assert_eq!(value["field"], "age");
        assert_eq!(value["rule"], "min");
        assert_eq!(value["message"], "field age must be at least 1");
    }
}
