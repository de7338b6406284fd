//! Custom error types for MyBudget
//!
//! One error hierarchy is shared by the storage, service and CLI layers. The
//! HTTP layer translates it into status codes in `api::error`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single failed constraint on a submitted command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path of the offending field, e.g. `initAmount` or `expenses[0].amount`
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The main error type for MyBudget operations
#[derive(Error, Debug)]
pub enum MyBudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A command failed one or more field constraints
    #[error("Validation failed: {}", describe_fields(.0))]
    Validation(Vec<FieldError>),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Authenticated, but not allowed to touch the resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// No valid principal on the request
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Rendering a response in an alternate format failed
    #[error("Export error: {0}")]
    Export(String),
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl MyBudgetError {
    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.to_string(),
        }
    }

    /// Create a validation error for a single field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for MyBudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MyBudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for MyBudget operations
pub type MyBudgetResult<T> = Result<T, MyBudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = MyBudgetError::budget_not_found(42);
        assert_eq!(err.to_string(), "Budget not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_lists_every_field() {
        let err = MyBudgetError::Validation(vec![
            FieldError::new("balance", "must not be negative"),
            FieldError::new("initAmount", "must not be negative"),
        ]);
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation failed: balance: must not be negative; initAmount: must not be negative"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MyBudgetError = io_err.into();
        assert!(matches!(err, MyBudgetError::Io(_)));
    }
}
