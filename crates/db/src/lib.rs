// crates/db/src/lib.rs
// SQLite-backed option store for the options size audit.

pub mod executor;
mod migrations;
mod queries;

pub use executor::{render_row_query, render_scalar_query, SqlParam};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{ConnectOptions, SqlitePool};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Failed to determine cache directory")]
    NoCacheDir,

    #[error("Failed to create database directory: {0}")]
    CreateDir(#[from] std::io::Error),

    #[error("Database file not found: {}", .0.display())]
    Missing(PathBuf),
}

pub type DbResult<T> = Result<T, DbError>;

/// Main database handle wrapping a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl Database {
    /// Open (or create) the database at the given path and run migrations.
    pub async fn new(path: &Path) -> DbResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30))
            .log_slow_statements(
                tracing::log::LevelFilter::Warn,
                std::time::Duration::from_secs(5),
            );

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        let db = Self {
            pool,
            db_path: path.to_owned(),
        };
        db.run_migrations().await?;

        info!("Database opened at {}", path.display());
        Ok(db)
    }

    /// Open an existing database without write access.
    ///
    /// The audit only ever reads, so the server uses this handle. No
    /// migrations run; the `options` table must already exist.
    pub async fn open_read_only(path: &Path) -> DbResult<Self> {
        if !path.exists() {
            return Err(DbError::Missing(path.to_owned()));
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
            .read_only(true)
            .busy_timeout(std::time::Duration::from_secs(30))
            .log_slow_statements(
                tracing::log::LevelFilter::Warn,
                std::time::Duration::from_secs(5),
            );

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        Ok(Self {
            pool,
            db_path: path.to_owned(),
        })
    }

    /// Create an in-memory database (for testing).
    ///
    /// Uses `shared_cache(true)` so all pool connections share the same
    /// in-memory database. Without this, each connection gets its own
    /// separate database.
    pub async fn new_in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?
            .shared_cache(true)
            .busy_timeout(std::time::Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;
        let db = Self {
            pool,
            db_path: PathBuf::new(),
        };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Run all inline migrations.
    ///
    /// Uses a `_migrations` table to track which migrations have already been
    /// applied.
    async fn run_migrations(&self) -> DbResult<()> {
        sqlx::query("CREATE TABLE IF NOT EXISTS _migrations (version INTEGER PRIMARY KEY)")
            .execute(&self.pool)
            .await?;

        let row: (i64,) = sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM _migrations")
            .fetch_one(&self.pool)
            .await?;
        let current_version = row.0 as usize;

        for (i, migration) in migrations::MIGRATIONS.iter().enumerate() {
            let version = i + 1; // 1-based
            if version > current_version {
                sqlx::query(migration).execute(&self.pool).await?;
                sqlx::query("INSERT INTO _migrations (version) VALUES (?)")
                    .bind(version as i64)
                    .execute(&self.pool)
                    .await?;
            }
        }

        Ok(())
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the path to the database file.
    /// Returns an empty path for in-memory databases.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

/// Returns the default database path: `~/.cache/options-audit/options.db`
pub fn default_db_path() -> DbResult<PathBuf> {
    dirs::cache_dir()
        .map(|dir| dir.join("options-audit").join("options.db"))
        .ok_or(DbError::NoCacheDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_database() {
        let db = Database::new_in_memory()
            .await
            .expect("should create in-memory database");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM options")
            .fetch_one(db.pool())
            .await
            .expect("options table should exist");
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_migrations_idempotent() {
        let db = Database::new_in_memory()
            .await
            .expect("first open should succeed");

        db.run_migrations()
            .await
            .expect("second migration run should succeed");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM options")
            .fetch_one(db.pool())
            .await
            .expect("options table should still exist");
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_file_based_database() {
        let tmp = tempfile::tempdir().expect("should create temp dir");
        let db_path = tmp.path().join("nested").join("test.db");

        let db = Database::new(&db_path)
            .await
            .expect("should create file-based database");
        db.upsert_option("siteurl", b"https://example.org", true)
            .await
            .unwrap();

        assert!(db_path.exists(), "database file should be created on disk");
        assert_eq!(db.db_path(), db_path.as_path());
    }

    #[tokio::test]
    async fn test_read_only_open_sees_rows_and_rejects_writes() {
        let tmp = tempfile::tempdir().expect("should create temp dir");
        let db_path = tmp.path().join("ro.db");

        let rw = Database::new(&db_path).await.unwrap();
        rw.upsert_option("blogname", b"My Site", true).await.unwrap();
        rw.pool().close().await;

        let ro = Database::open_read_only(&db_path).await.unwrap();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM options")
            .fetch_one(ro.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 1);

        let write = ro.upsert_option("blogname", b"Other", true).await;
        assert!(write.is_err(), "read-only handle must refuse writes");
    }

    #[tokio::test]
    async fn test_read_only_open_alongside_live_writer() {
        let tmp = tempfile::tempdir().expect("should create temp dir");
        let db_path = tmp.path().join("live.db");

        let rw = Database::new(&db_path).await.unwrap();
        rw.upsert_option("siteurl", b"https://example.org", true)
            .await
            .unwrap();

        let ro = Database::open_read_only(&db_path).await.unwrap();
        assert_eq!(ro.db_path(), db_path.as_path());
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM options")
            .fetch_one(ro.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 1);

        rw.upsert_option("blogname", b"My Site", true).await.unwrap();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM options")
            .fetch_one(ro.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 2, "reader sees rows committed by the writer");
    }

    #[tokio::test]
    async fn test_read_only_open_missing_file() {
        let tmp = tempfile::tempdir().expect("should create temp dir");
        let err = Database::open_read_only(&tmp.path().join("absent.db"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Missing(_)));
    }

    #[test]
    fn test_default_db_path() {
        if let Ok(path) = default_db_path() {
            assert!(path.to_string_lossy().contains("options-audit"));
            assert!(path.to_string_lossy().ends_with("options.db"));
        }
    }
}
