// src/repositories/mod.rs - Data access
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::DatabaseConfig;
use crate::errors::RepositoryError;

mod postgres;
mod sqlite;

pub use postgres::PostgresUrlRepository;
pub use sqlite::SqliteUrlRepository;

type Result<T> = std::result::Result<T, RepositoryError>;

/// Storage contract for alias to URL mappings.
///
/// Each operation is a single statement, atomic in isolation; uniqueness
/// under concurrent inserts is enforced by the backing engine's constraint,
/// not by application-level locking. No retries happen at this layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepositoryTrait: Send + Sync {
    /// Inserts a new record and returns its assigned identifier.
    ///
    /// ### Errors
    /// * `RepositoryError::Conflict` - If the alias is already taken
    /// * `RepositoryError::Database` - If a database error occurs
    async fn save(&self, url: &str, alias: &str) -> Result<i64>;

    /// Looks up the URL for an exact, case-sensitive alias match.
    ///
    /// ### Errors
    /// * `RepositoryError::NotFound` - If no record matches the alias
    /// * `RepositoryError::Database` - If a database error occurs
    async fn get(&self, alias: &str) -> Result<String>;

    /// Deletes the record matching the alias.
    ///
    /// ### Errors
    /// * `RepositoryError::NotFound` - If no record matched the alias
    /// * `RepositoryError::Database` - If a database error occurs
    async fn delete(&self, alias: &str) -> Result<()>;
}

/// Connects to the backing engine named by the database URL.
///
/// The engine is a configuration-time decision: the DSN scheme picks the
/// adapter, everything behind the returned trait object is identical.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn UrlRepositoryTrait>> {
    if config.url.starts_with("postgres://") || config.url.starts_with("postgresql://") {
        Ok(Arc::new(PostgresUrlRepository::connect(config).await?))
    } else if config.url.starts_with("sqlite:") {
        Ok(Arc::new(SqliteUrlRepository::connect(config).await?))
    } else {
        let scheme = config.url.split(':').next().unwrap_or("").to_string();
        Err(RepositoryError::UnsupportedBackend(scheme))
    }
}
