use sqlx::Error as SqlxError;
use thiserror::Error;

/// Error type for repository operations.
///
/// `Conflict` and `NotFound` are the two kinds callers branch on; everything
/// else the backing engine can produce is wrapped in `Database`, tagged with
/// the operation that produced it.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Unique constraint violation on the alias column
    #[error("alias already exists")]
    Conflict,

    /// No record for the requested alias
    #[error("url not found")]
    NotFound,

    /// Database connection or query errors
    #[error("{operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: SqlxError,
    },

    /// The database URL names an engine this build has no adapter for
    #[error("unsupported database scheme: {0}")]
    UnsupportedBackend(String),
}

impl RepositoryError {
    /// Translates a driver error into the repository taxonomy.
    ///
    /// Uniqueness-violation detection goes through sqlx's engine-agnostic
    /// `DatabaseError::is_unique_violation`, so no adapter needs to know
    /// its engine's error-code format.
    pub(crate) fn from_sqlx(operation: &'static str, err: SqlxError) -> Self {
        if err
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            return Self::Conflict;
        }

        match err {
            SqlxError::RowNotFound => Self::NotFound,
            err => Self::Database {
                operation,
                source: err,
            },
        }
    }

    pub(crate) fn database(operation: &'static str, source: SqlxError) -> Self {
        Self::Database { operation, source }
    }
}
