use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// `Clone` so that a single failed initialization can be reported to every
/// caller that waited on it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Row not found in {table}: {id}")]
    NotFound { table: String, id: String },
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
