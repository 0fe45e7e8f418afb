//! SQLite-backed data source.
//!
//! Provides async SQLite access using SQLx for the three entity tables and
//! the configuration override table. The schema mirrors the classic
//! e-commerce layout: `store_website`, `store_group`, `store` and
//! `core_config_data`.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ConfigValueRow;
use crate::error::{Error as CoreError, Result as CoreResult};
use crate::scope::ScopeKind;
use crate::source::ScopeDataSource;
use crate::store::{GroupRow, StoreRow, WebsiteRow};

static MEMDB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        Self::source(err)
    }
}

/// Database handle with connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connection acquire timeout - prevents connection storms from blocking indefinitely.
    const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Maximum time a connection can remain idle before being closed.
    const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

    /// Create a new database connection, bootstrapping the schema if needed.
    pub async fn new(path: &str) -> Result<Self, DbError> {
        let pool = if path == ":memory:" {
            // Use a uniquely named shared-cache memory database per call.
            // `file::memory:` is global-ish and will collide across parallel tests.
            let id = MEMDB_COUNTER.fetch_add(1, Ordering::Relaxed);
            let memdb_uri = format!(
                "file:scopestore-memdb-{}-{}?mode=memory&cache=shared",
                std::process::id(),
                id
            );

            let options = SqliteConnectOptions::new()
                .filename(&memdb_uri)
                .shared_cache(true)
                .create_if_missing(true);

            SqlitePoolOptions::new()
                .max_connections(1)
                .acquire_timeout(Self::ACQUIRE_TIMEOUT)
                .idle_timeout(Some(Self::IDLE_TIMEOUT))
                .test_before_acquire(true)
                .connect_with(options)
                .await?
        } else {
            if let Some(parent) = Path::new(path).parent()
                && !parent.as_os_str().is_empty()
                && let Err(e) = std::fs::create_dir_all(parent)
            {
                warn!(path = %parent.display(), error = %e, "Failed to create database directory");
            }

            let options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true);

            SqlitePoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Self::ACQUIRE_TIMEOUT)
                .idle_timeout(Some(Self::IDLE_TIMEOUT))
                .test_before_acquire(true)
                .connect_with(options)
                .await?
        };

        info!(path = %path, "Database connected");

        Self::ensure_schema(&pool).await?;

        // WAL mode allows reads to happen while writes are in progress
        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&pool)
            .await?;

        sqlx::query("PRAGMA foreign_keys=ON").execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Get reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the entity and config tables when absent.
    async fn ensure_schema(pool: &SqlitePool) -> Result<(), DbError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS store_website (
                website_id INTEGER PRIMARY KEY,
                code TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL DEFAULT '',
                sort_order INTEGER NOT NULL DEFAULT 0,
                default_group_id INTEGER NOT NULL DEFAULT 0,
                is_default INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS store_group (
                group_id INTEGER PRIMARY KEY,
                website_id INTEGER NOT NULL,
                name TEXT NOT NULL DEFAULT '',
                default_store_id INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS store (
                store_id INTEGER PRIMARY KEY,
                code TEXT NOT NULL UNIQUE,
                website_id INTEGER NOT NULL,
                group_id INTEGER NOT NULL,
                name TEXT NOT NULL DEFAULT '',
                sort_order INTEGER NOT NULL DEFAULT 0,
                is_active INTEGER NOT NULL DEFAULT 1
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS core_config_data (
                config_id INTEGER PRIMARY KEY AUTOINCREMENT,
                scope TEXT NOT NULL DEFAULT 'default',
                scope_id INTEGER NOT NULL DEFAULT 0,
                path TEXT NOT NULL,
                value TEXT,
                UNIQUE(scope, scope_id, path)
            )
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database schema checked/applied");
        Ok(())
    }
}

#[async_trait]
impl ScopeDataSource for Database {
    async fn load_websites(&self) -> CoreResult<Vec<WebsiteRow>> {
        let rows = sqlx::query_as::<_, (i64, String, String, i64, i64, bool)>(
            r#"
            SELECT website_id, code, name, sort_order, default_group_id, is_default
            FROM store_website
            ORDER BY sort_order, website_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(
                |(website_id, code, name, sort_order, default_group_id, is_default)| WebsiteRow {
                    website_id,
                    code,
                    name,
                    sort_order,
                    default_group_id,
                    is_default,
                },
            )
            .collect())
    }

    async fn load_groups(&self) -> CoreResult<Vec<GroupRow>> {
        let rows = sqlx::query_as::<_, (i64, i64, String, i64)>(
            r#"
            SELECT group_id, website_id, name, default_store_id
            FROM store_group
            ORDER BY group_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(|(group_id, website_id, name, default_store_id)| GroupRow {
                group_id,
                website_id,
                name,
                default_store_id,
            })
            .collect())
    }

    async fn load_stores(&self) -> CoreResult<Vec<StoreRow>> {
        let rows = sqlx::query_as::<_, (i64, String, i64, i64, String, i64, bool)>(
            r#"
            SELECT store_id, code, website_id, group_id, name, sort_order, is_active
            FROM store
            ORDER BY sort_order, store_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(
                |(store_id, code, website_id, group_id, name, sort_order, is_active)| StoreRow {
                    store_id,
                    code,
                    website_id,
                    group_id,
                    name,
                    sort_order,
                    is_active,
                },
            )
            .collect())
    }

    async fn load_config_values(&self) -> CoreResult<Vec<ConfigValueRow>> {
        let rows = sqlx::query_as::<_, (String, i64, String, Option<String>)>(
            r#"
            SELECT scope, scope_id, path, value
            FROM core_config_data
            ORDER BY config_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        let mut values = Vec::with_capacity(rows.len());
        for (scope, scope_id, path, value) in rows {
            let Some(kind) = ScopeKind::parse(&scope) else {
                warn!(scope = %scope, path = %path, "unknown scope discriminator, row skipped");
                continue;
            };
            let Some(value) = value else {
                // NULL value rows carry no override
                continue;
            };
            values.push(ConfigValueRow {
                scope: kind,
                scope_id,
                path,
                value,
            });
        }
        Ok(values)
    }
}
