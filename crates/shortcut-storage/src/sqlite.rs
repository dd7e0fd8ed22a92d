use async_trait::async_trait;
use shortcut_core::repository::Result;
use shortcut_core::{Alias, MappingId, MappingRecord, Repository, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, trace};
use typed_builder::TypedBuilder;

// AUTOINCREMENT keeps SQLite from handing out the id of a deleted last row again.
const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS url (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    alias TEXT NOT NULL UNIQUE,
    url   TEXT NOT NULL
)
"#;

const CREATE_ALIAS_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_alias ON url(alias)";

// SQLITE_BUSY and SQLITE_LOCKED primary result codes.
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Connection settings for [`SqliteRepository`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct SqliteSettings {
    /// e.g. `sqlite://shortcut.db`. The file is created if it does not exist.
    #[builder(default = "sqlite://shortcut.db".to_string(), setter(into))]
    pub database_url: String,
    /// Pool size. In-memory databases live in a single connection, so they
    /// always get exactly one that is never reaped.
    #[builder(default = 5)]
    pub max_connections: u32,
    /// How long a statement waits on a locked database before failing.
    #[builder(default = Duration::from_secs(5))]
    pub busy_timeout: Duration,
    /// How long an operation waits for a free pooled connection.
    #[builder(default = Duration::from_secs(5))]
    pub acquire_timeout: Duration,
}

impl Default for SqliteSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// SQLite implementation of the repository contract.
///
/// Each operation is one statement; uniqueness of `alias` is enforced by a
/// `UNIQUE` constraint. Deletes are hard deletes, so a deleted alias can be
/// inserted again.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens a pool for `settings` and makes sure the schema exists.
    pub async fn connect(settings: &SqliteSettings) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&settings.database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true)
            .busy_timeout(settings.busy_timeout);

        let pool_options = SqlitePoolOptions::new().acquire_timeout(settings.acquire_timeout);
        let pool_options = if is_in_memory(&settings.database_url) {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(settings.max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        info!(database_url = %settings.database_url, "opened sqlite database");
        Self::with_pool(pool).await
    }

    /// Wraps an existing pool and makes sure the schema exists.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self> {
        let repository = Self { pool };
        repository.initialize().await?;
        Ok(repository)
    }

    /// Creates the table and index if absent. Safe to run any number of times.
    pub async fn initialize(&self) -> Result<()> {
        for statement in [CREATE_TABLE, CREATE_ALIAS_INDEX] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StorageError::Initialization(e.to_string()))?;
        }
        debug!("sqlite schema ready");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn is_busy(err: &dyn sqlx::error::DatabaseError) -> bool {
    err.code()
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::Database(ref db) if is_busy(&**db) => StorageError::Timeout(message),
        sqlx::Error::Configuration(_) => StorageError::Initialization(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn insert(&self, alias: &Alias, url: &str) -> Result<MappingId> {
        let result = sqlx::query("INSERT INTO url (alias, url) VALUES (?, ?)")
            .bind(alias.as_str())
            .bind(url)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => {
                let id = done.last_insert_rowid();
                trace!(alias = %alias, id, "inserted mapping");
                Ok(id)
            }
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(alias.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn get(&self, alias: &Alias) -> Result<Option<MappingRecord>> {
        let row = sqlx::query("SELECT id, url FROM url WHERE alias = ?")
            .bind(alias.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let url: String = row.try_get("url").map_err(map_sqlx_error)?;

        Ok(Some(MappingRecord {
            id,
            alias: alias.clone(),
            url,
        }))
    }

    async fn delete(&self, alias: &Alias) -> Result<bool> {
        let result = sqlx::query("DELETE FROM url WHERE alias = ?")
            .bind(alias.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
