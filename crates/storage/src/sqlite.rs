//! SQLite cache store using sqlx.
//!
//! Entries are append-only rows. Timestamps are stored as fixed-width
//! RFC 3339 UTC text so that string order matches time order and range
//! filters and sorting stay in SQL.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use weather_common::{QueryType, WeatherError, WeatherResult};

use crate::cache_store::{normalize_city, CacheEntry, CacheStore};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS cache_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        city TEXT NOT NULL,
        city_key TEXT NOT NULL,
        query_type TEXT NOT NULL,
        payload TEXT NOT NULL,
        retrieved_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_cache_entries_lookup ON cache_entries(city_key, query_type, retrieved_at)",
    "CREATE INDEX IF NOT EXISTS idx_cache_entries_retrieved ON cache_entries(retrieved_at)",
];

type EntryRow = (String, String, String, String);

fn storage_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> WeatherError {
    move |e| WeatherError::Storage(format!("{}: {}", context, e))
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(s: &str) -> WeatherResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| WeatherError::Storage(format!("Invalid stored timestamp '{}': {}", s, e)))
}

fn row_to_entry(row: EntryRow) -> WeatherResult<CacheEntry> {
    let (city, query_type, payload, retrieved_at) = row;

    let query_type: QueryType = query_type
        .parse()
        .map_err(|e| WeatherError::Storage(format!("Invalid stored query type: {}", e)))?;

    Ok(CacheEntry {
        city,
        query_type,
        payload,
        retrieved_at: parse_timestamp(&retrieved_at)?,
    })
}

/// Cache store persisted in a SQLite database.
pub struct SqliteCacheStore {
    pool: SqlitePool,
}

impl SqliteCacheStore {
    /// Open or create the cache database at the given path.
    pub async fn open(path: &Path) -> WeatherResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                WeatherError::Storage(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(storage_error("Failed to open SQLite database"))?;

        let store = Self { pool };
        store.run_migrations().await?;

        info!(path = %path.display(), "Opened weather cache database");

        Ok(store)
    }

    /// Open an in-memory database (for testing).
    ///
    /// Uses a single connection that is never recycled, since every SQLite
    /// connection to `:memory:` sees its own empty database.
    pub async fn open_memory() -> WeatherResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(storage_error("Failed to open in-memory database"))?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    async fn run_migrations(&self) -> WeatherResult<()> {
        for statement in SCHEMA {
            sqlx::query(*statement)
                .execute(&self.pool)
                .await
                .map_err(storage_error("Failed to run cache migrations"))?;
        }
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl CacheStore for SqliteCacheStore {
    async fn latest_entry(
        &self,
        city: &str,
        query_type: QueryType,
    ) -> WeatherResult<Option<CacheEntry>> {
        let row: Option<EntryRow> = sqlx::query_as(
            r#"
            SELECT city, query_type, payload, retrieved_at
            FROM cache_entries
            WHERE city_key = ? AND query_type = ?
            ORDER BY retrieved_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(normalize_city(city))
        .bind(query_type.as_key())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("Failed to query latest cache entry"))?;

        row.map(row_to_entry).transpose()
    }

    async fn insert(&self, entry: &CacheEntry) -> WeatherResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cache_entries (city, city_key, query_type, payload, retrieved_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.city)
        .bind(entry.city_key())
        .bind(entry.query_type.as_key())
        .bind(&entry.payload)
        .bind(format_timestamp(entry.retrieved_at))
        .execute(&self.pool)
        .await
        .map_err(storage_error("Failed to insert cache entry"))?;

        debug!(
            city = %entry.city,
            query_type = %entry.query_type,
            "Inserted cache entry"
        );
        Ok(())
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> WeatherResult<u64> {
        let result = sqlx::query("DELETE FROM cache_entries WHERE retrieved_at < ?")
            .bind(format_timestamp(cutoff))
            .execute(&self.pool)
            .await
            .map_err(storage_error("Failed to delete expired cache entries"))?;

        Ok(result.rows_affected())
    }

    async fn all_entries_descending(&self) -> WeatherResult<Vec<CacheEntry>> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            r#"
            SELECT city, query_type, payload, retrieved_at
            FROM cache_entries
            ORDER BY retrieved_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to list cache entries"))?;

        rows.into_iter().map(row_to_entry).collect()
    }

    async fn count(&self) -> WeatherResult<u64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cache_entries")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("Failed to count cache entries"))?;

        Ok(count.0 as u64)
    }
}
