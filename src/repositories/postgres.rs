use std::time::Duration;

use async_trait::async_trait;
use log::info;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;

use crate::config::DatabaseConfig;
use crate::errors::RepositoryError;

use super::{Result, UrlRepositoryTrait};

/// PostgreSQL-backed repository.
pub struct PostgresUrlRepository {
    pool: PgPool,
}

impl PostgresUrlRepository {
    /// Opens a connection pool, verifies the server is reachable and
    /// prepares the schema. Fails fast on any of the three steps.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| RepositoryError::database("connect", e))?;

        let repository = Self { pool };
        repository.ping().await?;
        repository.init_schema().await?;

        info!("Connected to PostgreSQL storage");
        Ok(repository)
    }

    // A pooled handle alone proves nothing; ping is a real round trip.
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
                id BIGSERIAL PRIMARY KEY,
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
impl UrlRepositoryTrait for PostgresUrlRepository {
    async fn save(&self, url: &str, alias: &str) -> Result<i64> {
        let row = sqlx::query("INSERT INTO url (alias, url) VALUES ($1, $2) RETURNING id")
            .bind(alias)
            .bind(url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx("save", e))?;

        row.try_get("id")
            .map_err(|e| RepositoryError::database("save", e))
    }

    async fn get(&self, alias: &str) -> Result<String> {
        let row = sqlx::query("SELECT url FROM url WHERE alias = $1")
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
        let result = sqlx::query("DELETE FROM url WHERE alias = $1")
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
