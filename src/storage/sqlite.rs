use std::str::FromStr;
use std::time::Duration;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tokio::runtime::Runtime;

use super::types::{KeyValueBackend, StorageError};

// ============================================================================
// SqliteBackend
// ============================================================================

/// Key-value store in a SQLite `user_preferences` table.
///
/// The core is synchronous, so the backend owns a current-thread runtime and
/// blocks on each query. It must not be used from inside another tokio
/// runtime.
pub struct SqliteBackend {
    runtime: Runtime,
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Open (or create) the database at `path` and ensure the table exists.
    ///
    /// `":memory:"` opens a private in-memory database.
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let url = format!("sqlite:{}?mode=rwc", path);
        let options = SqliteConnectOptions::from_str(&url)?.pragma("busy_timeout", "5000");

        // Single writer. One connection that never idles out also keeps an
        // in-memory database alive for the backend's lifetime.
        let pool = runtime.block_on(
            SqlitePoolOptions::new()
                .max_connections(1)
                .acquire_timeout(Duration::from_secs(10))
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options),
        )?;

        let backend = Self { runtime, pool };
        backend.migrate()?;
        tracing::debug!(path = %path, "Opened SQLite storage");
        Ok(backend)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.runtime.block_on(
            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS user_preferences (
                    key TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
                )
            "#,
            )
            .execute(&self.pool),
        )?;
        Ok(())
    }
}

impl KeyValueBackend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row: Option<(String,)> = self.runtime.block_on(
            sqlx::query_as("SELECT value FROM user_preferences WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool),
        )?;

        Ok(row.map(|(value,)| value))
    }

    /// UPSERT: inserts the pair or updates the value and timestamp.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.runtime.block_on(
            sqlx::query(
                r#"
                INSERT INTO user_preferences (key, value, updated_at)
                VALUES (?, ?, datetime('now'))
                ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            )
            .bind(key)
            .bind(value)
            .execute(&self.pool),
        )?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.runtime.block_on(
            sqlx::query("DELETE FROM user_preferences WHERE key = ?")
                .bind(key)
                .execute(&self.pool),
        )?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

impl Drop for SqliteBackend {
    fn drop(&mut self) {
        self.runtime.block_on(self.pool.close());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_backend() -> SqliteBackend {
        SqliteBackend::open(":memory:").unwrap()
    }

    #[test]
    fn test_get_missing() {
        let backend = test_backend();
        assert_eq!(backend.get("nonexistent.key").unwrap(), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut backend = test_backend();
        backend.set("folio.search", "code").unwrap();
        assert_eq!(
            backend.get("folio.search").unwrap(),
            Some("code".to_string())
        );
    }

    #[test]
    fn test_set_upsert() {
        let mut backend = test_backend();
        backend.set("folio.category", "Classic").unwrap();
        backend.set("folio.category", "Programming").unwrap();
        assert_eq!(
            backend.get("folio.category").unwrap(),
            Some("Programming".to_string())
        );
    }

    #[test]
    fn test_remove() {
        let mut backend = test_backend();
        backend.set("folio.favorites", "[]").unwrap();
        backend.remove("folio.favorites").unwrap();
        backend.remove("folio.favorites").unwrap();
        assert_eq!(backend.get("folio.favorites").unwrap(), None);
    }

    #[test]
    fn test_values_are_opaque() {
        let mut backend = test_backend();
        let raw = "  Mixed Case\twith 'quotes' and \"json\" [{}] ";
        backend.set("k", raw).unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some(raw));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = std::env::temp_dir().join("folio_sqlite_test_reopen");
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("folio.db");
        let path = path.to_str().unwrap();

        {
            let mut backend = SqliteBackend::open(path).unwrap();
            backend.set("folio.search", "prince").unwrap();
        }

        let backend = SqliteBackend::open(path).unwrap();
        assert_eq!(
            backend.get("folio.search").unwrap().as_deref(),
            Some("prince")
        );

        std::fs::remove_dir_all(&dir).ok();
    }
}
