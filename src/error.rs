//! Custom error types for fintrack
//!
//! This module defines the error hierarchy for the ledger using thiserror.
//! Each variant maps onto one failure kind of the outer request surface
//! (see [`LedgerError::status_code`]).

use thiserror::Error;

use crate::models::{ClassificationError, ValidationError};

/// The main error type for fintrack operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Field-level validation failures
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The record would end up in a state the ledger does not allow
    #[error("Invalid state: {0}")]
    InvalidState(#[from] ClassificationError),

    /// A unique constraint was violated
    #[error("{entity_type} already exists: {identifier}")]
    Conflict {
        entity_type: &'static str,
        identifier: String,
    },

    /// Credentials did not match an active account
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No valid session token was supplied
    #[error("Authentication credentials were not provided or are invalid")]
    Unauthenticated,

    /// The identity lacks a privilege (staff-only operations)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Entity not found, or not owned by the requesting identity
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Delete rejected because other records still reference the entity
    #[error("Cannot delete {entity_type} {identifier}: referenced by {dependents} record(s)")]
    Protected {
        entity_type: &'static str,
        identifier: String,
        dependents: usize,
    },

    /// Password hashing or token generation errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "not found" error for annual budgets
    pub fn annual_budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Annual budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for month budgets
    pub fn month_budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Month budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses tags
    pub fn expenses_tag_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expenses tag",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for incomes
    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income",
            identifier: identifier.into(),
        }
    }

    /// The message returned for any failed credential check
    pub fn bad_credentials() -> Self {
        Self::Authentication("Unable to authenticate with provided credentials.".into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a unique-constraint conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// The offending field, for validation failures
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation(e) => e.field(),
            Self::InvalidState(_) => Some("classification"),
            _ => None,
        }
    }

    /// HTTP-style status code for this failure kind
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InvalidState(_) | Self::Authentication(_) => 400,
            Self::Unauthenticated => 401,
            Self::PermissionDenied(_) => 403,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } | Self::Protected { .. } => 409,
            Self::Config(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Storage(_)
            | Self::Crypto(_)
            | Self::Export(_) => 500,
        }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for fintrack operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::expense_not_found("exp-1234abcd");
        assert_eq!(err.to_string(), "Expense not found: exp-1234abcd");
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_validation_carries_field_and_value() {
        let err: LedgerError = ValidationError::NonPositiveAmount {
            field: "amount",
            value: Money::from_cents(-500),
        }
        .into();
        assert!(err.is_validation());
        assert_eq!(err.field(), Some("amount"));
        assert!(err.to_string().contains("-$5.00"));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_conflict_is_distinct_from_validation() {
        let err = LedgerError::Conflict {
            entity_type: "Annual budget",
            identifier: "2020".into(),
        };
        assert!(err.is_conflict());
        assert!(!err.is_validation());
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_classification_maps_to_invalid_state() {
        let err: LedgerError = ClassificationError::Both.into();
        assert!(matches!(err, LedgerError::InvalidState(_)));
        assert_eq!(err.field(), Some("classification"));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_auth_status_codes() {
        assert_eq!(LedgerError::bad_credentials().status_code(), 400);
        assert_eq!(LedgerError::Unauthenticated.status_code(), 401);
        assert_eq!(LedgerError::PermissionDenied("staff".into()).status_code(), 403);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LedgerError = io_err.into();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}
