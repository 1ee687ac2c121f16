use thiserror::Error;

use super::EntityKind;

/// Errors that can occur when parsing a typed identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("Malformed identifier: {0}")]
    Malformed(String),
    #[error("Unknown entity kind: {0}")]
    UnknownKind(String),
    #[error("Invalid identifier value: {0}")]
    InvalidValue(String),
}

/// Errors that can occur when validating an assignment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("Assignment id must be tagged Assignment, got {0}")]
    InvalidId(EntityKind),
    #[error("Assignment user must be tagged User, got {0}")]
    InvalidUser(EntityKind),
}
