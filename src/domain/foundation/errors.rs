//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be {expected} characters long, got {actual}")]
    InvalidLength {
        field: String,
        expected: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a length mismatch validation error.
    pub fn invalid_length(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        ValidationError::InvalidLength {
            field: field.into(),
            expected,
            actual,
        }
    }
}

/// Error categories shared by every domain error.
///
/// Adapters map these to transport-level codes; the domain never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input caught before any store access.
    Validation,
    /// A session, user, work package or estimate does not exist.
    NotFound,
    /// The key being created already exists.
    Conflict,
    /// The storage handle or another infrastructure dependency failed.
    Store,
    /// An aggregation had no matching records to work on.
    InsufficientData,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Validation => "VALIDATION_FAILED",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Store => "STORE_ERROR",
            ErrorKind::InsufficientData => "INSUFFICIENT_DATA",
        };
        write!(f, "{}", s)
    }
}

/// Rejects empty names and identifiers.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(())
}
