//! Custom error types for pocketbudget
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::collections::BTreeMap;

use thiserror::Error;

/// The main error type for pocketbudget operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and forms
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport-level failures (connection refused, timeout, DNS)
    #[error("Network error: {0}")]
    Http(String),

    /// The service rejected the request with a non-2xx status.
    ///
    /// `field_errors` carries the per-field error map a 400 response may
    /// include; it is `None` for bare rejections.
    #[error("Service rejected the request (status {status})")]
    Rejected {
        status: u16,
        field_errors: Option<BTreeMap<String, String>>,
    },

    /// The stored session is missing or no longer accepted by the service
    #[error("Not authenticated")]
    Unauthorized,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Session storage errors
    #[error("Session error: {0}")]
    Session(String),
}

impl BudgetError {
    /// Create a "not found" error for budget items
    pub fn item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget item",
            identifier: identifier.into(),
        }
    }

    /// Create a bare rejection for a status code
    pub fn rejected(status: u16) -> Self {
        Self::Rejected {
            status,
            field_errors: None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error means the session is no longer valid
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for BudgetError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Result type alias for pocketbudget operations
pub type BudgetResult<T> = Result<T, BudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BudgetError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BudgetError::item_not_found("itm-12345678");
        assert_eq!(err.to_string(), "Budget item not found: itm-12345678");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_rejected_display() {
        let err = BudgetError::rejected(400);
        assert_eq!(err.to_string(), "Service rejected the request (status 400)");
    }

    #[test]
    fn test_unauthorized() {
        let err = BudgetError::Unauthorized;
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Not authenticated");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let budget_err: BudgetError = io_err.into();
        assert!(matches!(budget_err, BudgetError::Io(_)));
    }
}
