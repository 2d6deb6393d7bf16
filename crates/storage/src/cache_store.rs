//! Cache entry model and the storage trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use weather_common::{QueryType, WeatherResult};

/// A raw provider payload as fetched for one (city, query type).
///
/// Entries are immutable once stored. Several entries may exist for the same
/// key; only the newest one is ever consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// City as the caller typed it.
    pub city: String,
    pub query_type: QueryType,
    /// Verbatim provider response body.
    pub payload: String,
    pub retrieved_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(
        city: impl Into<String>,
        query_type: QueryType,
        payload: impl Into<String>,
        retrieved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            city: city.into(),
            query_type,
            payload: payload.into(),
            retrieved_at,
        }
    }

    /// Case-folded city used for matching.
    pub fn city_key(&self) -> String {
        normalize_city(&self.city)
    }
}

/// Case-insensitive matching key for a city name.
pub fn normalize_city(city: &str) -> String {
    city.trim().to_lowercase()
}

/// Persistence for cached provider payloads.
///
/// Implementations must tolerate concurrent calls; atomicity of a single
/// insert or bulk delete is left to the underlying engine.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Newest entry for `city` (case-insensitive) and `query_type`, or `None`.
    async fn latest_entry(
        &self,
        city: &str,
        query_type: QueryType,
    ) -> WeatherResult<Option<CacheEntry>>;

    /// Append a new entry. Existing entries are never updated.
    async fn insert(&self, entry: &CacheEntry) -> WeatherResult<()>;

    /// Remove every entry retrieved strictly before `cutoff`; returns how many
    /// were removed.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> WeatherResult<u64>;

    /// All entries, newest first.
    async fn all_entries_descending(&self) -> WeatherResult<Vec<CacheEntry>>;

    /// Number of stored entries.
    async fn count(&self) -> WeatherResult<u64>;
}
