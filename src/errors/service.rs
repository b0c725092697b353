use thiserror::Error;

use super::RepositoryError;

/// Error type for service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested alias is already taken
    #[error("Alias '{0}' is already in use")]
    Conflict(String),

    /// No mapping exists for the alias
    #[error("No URL found for alias '{0}'")]
    NotFound(String),

    /// Unrecoverable internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Wrapped repository error
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
