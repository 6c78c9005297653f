//! Error types for the todo domain.
//!
//! # Design
//! Two classes of failure travel up from the use-cases. `CustomError` is an
//! expected outcome (bad input, missing todo) and already carries the HTTP
//! status and the message the client should see. `StorageError` is anything
//! the persistence layer could not do; its detail is for logs only.
//! `TodoError` tags which of the two happened so the boundary can match on
//! it instead of inspecting messages.

use thiserror::Error;

/// An expected, client-visible failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CustomError {
    pub status_code: u16,
    pub message: String,
}

impl CustomError {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }
}

/// Failures raised by a datasource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing store rejected or failed the operation.
    #[error("database error: {0}")]
    Database(String),

    /// A stored record could not be turned back into a `TodoEntity`.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Errors returned by the use-cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error(transparent)]
    Custom(#[from] CustomError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_status_codes() {
        assert_eq!(CustomError::bad_request("x").status_code, 400);
        assert_eq!(CustomError::not_found("x").status_code, 404);
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = CustomError::not_found("Todo with id: 3 not found");
        assert_eq!(err.to_string(), "Todo with id: 3 not found");
        assert_eq!(
            TodoError::from(err).to_string(),
            "Todo with id: 3 not found"
        );
    }

    #[test]
    fn storage_errors_keep_their_own_variant() {
        let err = TodoError::from(StorageError::Database("disk full".to_string()));
        assert!(matches!(err, TodoError::Storage(StorageError::Database(_))));
        assert_eq!(err.to_string(), "database error: disk full");
    }
}
