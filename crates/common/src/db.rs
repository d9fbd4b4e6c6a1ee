//! Shared repository error type
//!
//! Store adapters (Postgres and in-memory) report failures through this
//! type so domain code never depends on a concrete persistence engine.

use crate::error::Error;
use thiserror::Error;

/// Repository-level error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Record already exists")]
    AlreadyExists,

    /// A compare-and-swap write found the record changed since it was read
    #[error("Record was modified concurrently")]
    Conflict,

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Error::NotFound("Record not found".to_string()),
            RepositoryError::AlreadyExists => Error::Conflict("Record already exists".to_string()),
            RepositoryError::Conflict => {
                Error::Conflict("Record was modified concurrently".to_string())
            }
            RepositoryError::Connection(e) => Error::Database(e),
            RepositoryError::InvalidData(msg) => Error::Internal(msg),
        }
    }
}
