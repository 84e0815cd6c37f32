//! Payload validation primitives.
//!
//! Each request schema reads its declared fields out of a raw JSON object in
//! declaration order and stops at the first violation. Undeclared keys are
//! ignored.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// What went wrong with a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    Null,
    InvalidType,
    TooShort,
    TooLong,
    NotAnObject,
    InvalidJson,
}

/// The first offending field of a rejected payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            kind,
            message: message.into(),
        }
    }

    /// The request body could not be parsed as JSON at all.
    pub fn invalid_json(detail: impl std::fmt::Display) -> Self {
        Self::new("body", ViolationKind::InvalidJson, format!("invalid JSON body: {detail}"))
    }
}

/// A typed view over a validated request payload.
pub trait Schema: Sized {
    fn validate(payload: &Value) -> Result<Self, ValidationError>;
}

/// Length bounds for a string field, counted in characters.
#[derive(Debug, Clone, Copy)]
pub struct Length {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Length {
    pub const fn max(max: usize) -> Self {
        Self { min: None, max: Some(max) }
    }

    pub const fn min(min: usize) -> Self {
        Self { min: Some(min), max: None }
    }

    fn check(&self, field: &str, value: &str) -> Result<(), ValidationError> {
        let len = value.chars().count();
        if let Some(min) = self.min {
            if len < min {
                return Err(ValidationError::new(
                    field,
                    ViolationKind::TooShort,
                    format!("{field} is too short"),
                ));
            }
        }
        if let Some(max) = self.max {
            if len > max {
                return Err(ValidationError::new(
                    field,
                    ViolationKind::TooLong,
                    format!("{field} must be at most {max} characters"),
                ));
            }
        }
        Ok(())
    }
}

/// Field accessor over a JSON object payload.
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn of(payload: &'a Value) -> Result<Self, ValidationError> {
        payload.as_object().map(|map| Self { map }).ok_or_else(|| {
            ValidationError::new("body", ViolationKind::NotAnObject, "payload must be a JSON object")
        })
    }

    /// A non-null string. `None` when the key is absent.
    pub fn string(&self, field: &str, length: Length) -> Result<Option<String>, ValidationError> {
        match self.map.get(field) {
            None => Ok(None),
            Some(Value::Null) => Err(null(field)),
            Some(value) => string_value(field, value, length).map(Some),
        }
    }

    /// A string that may be explicitly `null`.
    ///
    /// Absent → `None`, `null` → `Some(None)`, string → `Some(Some(_))`.
    pub fn nullable_string(
        &self,
        field: &str,
        length: Length,
    ) -> Result<Option<Option<String>>, ValidationError> {
        match self.map.get(field) {
            None => Ok(None),
            Some(Value::Null) => Ok(Some(None)),
            Some(value) => string_value(field, value, length).map(|s| Some(Some(s))),
        }
    }

    /// A non-null integer. Strings holding a base-10 integer are coerced.
    pub fn integer(&self, field: &str) -> Result<Option<i64>, ValidationError> {
        match self.map.get(field) {
            None => Ok(None),
            Some(Value::Null) => Err(null(field)),
            Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| not_integer(field)),
            Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| not_integer(field)),
            Some(_) => Err(not_integer(field)),
        }
    }
}

/// Turns an absent optional into a `missing` violation.
pub fn required<T>(field: &str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or_else(|| {
        ValidationError::new(field, ViolationKind::Missing, format!("{field} is required"))
    })
}

fn string_value(field: &str, value: &Value, length: Length) -> Result<String, ValidationError> {
    let s = value.as_str().ok_or_else(|| {
        ValidationError::new(
            field,
            ViolationKind::InvalidType,
            format!("{field} must be a string"),
        )
    })?;
    length.check(field, s)?;
    Ok(s.to_string())
}

fn null(field: &str) -> ValidationError {
    ValidationError::new(field, ViolationKind::Null, format!("{field} must not be null"))
}

fn not_integer(field: &str) -> ValidationError {
    ValidationError::new(
        field,
        ViolationKind::InvalidType,
        format!("{field} must be an integer"),
    )
}
