use thiserror::Error;

use crate::assignment::Id;
use crate::cache::CacheError;

/// Errors that can occur during repository operations.
///
/// Store implementations produce the first group of variants. The cache
/// decorator adds the `Cache*`, `UnexpectedCachedResource` and `Configuration`
/// variants and passes everything else through untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Cache read failed: {0}")]
    CacheRead(CacheError),
    #[error("Cache write failed: {0}")]
    CacheWrite(CacheError),
    #[error("Cache delete failed: {0}")]
    CacheDelete(CacheError),
    #[error("Unexpected cached resource: {resource}")]
    UnexpectedCachedResource { resource: Id },
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
