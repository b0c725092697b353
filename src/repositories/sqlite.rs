use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use crate::config::DatabaseConfig;
use crate::errors::RepositoryError;

use super::{Result, UrlRepositoryTrait};

/// SQLite-backed repository.
///
/// AUTOINCREMENT keeps ids monotonic and never reused, matching the
/// PostgreSQL adapter's BIGSERIAL behavior.
pub struct SqliteUrlRepository {
    pool: SqlitePool,
}

impl SqliteUrlRepository {
    /// Opens a connection pool, verifies the database responds and
    /// prepares the schema. A missing database file is created.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| RepositoryError::database("connect", e))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::database("connect", e))?;

        let repository = Self { pool };
        repository.ping().await?;
        repository.init_schema().await?;

        info!("Connected to SQLite storage");
        Ok(repository)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| RepositoryError::database("ping", e))
    }

    /// Creates the url table and the alias index. Safe to run on every
    /// startup against an already-initialized database.
    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS url (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                alias TEXT NOT NULL UNIQUE,
                url TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::database("init_schema", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_url_alias ON url (alias)")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::database("init_schema", e))?;

        Ok(())
    }
}

#[async_trait]
impl UrlRepositoryTrait for SqliteUrlRepository {
    async fn save(&self, url: &str, alias: &str) -> Result<i64> {
        let row = sqlx::query("INSERT INTO url (alias, url) VALUES (?, ?) RETURNING id")
            .bind(alias)
            .bind(url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx("save", e))?;

        row.try_get("id")
            .map_err(|e| RepositoryError::database("save", e))
    }

    async fn get(&self, alias: &str) -> Result<String> {
        let row = sqlx::query("SELECT url FROM url WHERE alias = ?")
            .bind(alias)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx("get", e))?;

        match row {
            Some(row) => row
                .try_get("url")
                .map_err(|e| RepositoryError::database("get", e)),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, alias: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM url WHERE alias = ?")
            .bind(alias)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repository() -> SqliteUrlRepository {
        // A single connection keeps the in-memory database alive and shared
        // for the whole test.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite should open");

        let repository = SqliteUrlRepository { pool };
        repository.init_schema().await.expect("schema init");
        repository
    }

    #[tokio::test]
    async fn test_save_and_get_round_trip() {
        let repository = repository().await;

        repository
            .save("https://example.com/some/long/path", "abc123")
            .await
            .expect("save should succeed");

        let url = repository.get("abc123").await.expect("get should succeed");
        assert_eq!(url, "https://example.com/some/long/path");
    }

    #[tokio::test]
    async fn test_duplicate_alias_is_rejected() {
        let repository = repository().await;

        let id = repository
            .save("https://example.com", "ex1")
            .await
            .expect("first save should succeed");
        assert_eq!(id, 1);

        let err = repository
            .save("https://example.org", "ex1")
            .await
            .expect_err("second save must fail");
        assert!(matches!(err, RepositoryError::Conflict));

        // The failed insert must not have touched the first record
        let url = repository.get("ex1").await.expect("get should succeed");
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_get_unknown_alias_is_not_found() {
        let repository = repository().await;

        let err = repository.get("missing").await.expect_err("must fail");
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_unknown_alias_is_not_found() {
        let repository = repository().await;

        let err = repository.delete("missing").await.expect_err("must fail");
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let repository = repository().await;

        repository
            .save("https://example.com", "ex1")
            .await
            .expect("save should succeed");
        repository.delete("ex1").await.expect("delete should succeed");

        let err = repository.get("ex1").await.expect_err("must fail");
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_ids_are_monotonic_and_never_reused() {
        let repository = repository().await;

        let first = repository.save("https://a.example", "a").await.unwrap();
        let second = repository.save("https://b.example", "b").await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);

        repository.delete("b").await.unwrap();
        let third = repository.save("https://c.example", "c").await.unwrap();
        assert_eq!(third, 3);
    }

    #[tokio::test]
    async fn test_alias_is_case_sensitive() {
        let repository = repository().await;

        repository.save("https://lower.example", "ex1").await.unwrap();
        repository.save("https://upper.example", "Ex1").await.unwrap();

        assert_eq!(repository.get("ex1").await.unwrap(), "https://lower.example");
        assert_eq!(repository.get("Ex1").await.unwrap(), "https://upper.example");
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let repository = repository().await;

        repository
            .init_schema()
            .await
            .expect("second init must succeed");

        repository.save("https://example.com", "ex1").await.unwrap();
        assert_eq!(repository.get("ex1").await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_full_lifecycle_scenario() {
        let repository = repository().await;

        let id = repository.save("https://example.com", "ex1").await.unwrap();
        assert_eq!(id, 1);

        let err = repository
            .save("https://example.org", "ex1")
            .await
            .expect_err("conflicting save must fail");
        assert!(matches!(err, RepositoryError::Conflict));

        assert_eq!(repository.get("ex1").await.unwrap(), "https://example.com");

        repository.delete("ex1").await.expect("delete should succeed");

        let err = repository.get("ex1").await.expect_err("must fail");
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
