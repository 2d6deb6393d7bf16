//! Read-through lookups over the cache store and the provider.
//!
//! A lookup returns the newest stored payload for (city, query type) while it
//! is inside the expiration window. Otherwise the provider is called, the raw
//! body is appended to the store, and the body is parsed. Stale entries are
//! left for the sweeper.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serialize;
use tracing::{debug, error, info, instrument};

use payload_parser::{CurrentWeather, Forecast};
use storage::{CacheEntry, CacheStore};
use weather_common::{ExpirationWindow, ForecastDays, QueryType, WeatherError, WeatherResult};

use crate::metrics;
use crate::provider::ProviderFetcher;

/// Hours east of UTC at which history timestamps are displayed.
pub const HISTORY_DISPLAY_OFFSET_HOURS: i32 = -3;

/// One row of the search history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryItem {
    pub city: String,
    #[serde(rename = "type")]
    pub query_type: String,
    pub retrieved_at: DateTime<FixedOffset>,
}

/// `east_opt` only rejects offsets of a full day or more, so the UTC
/// fallback is never taken.
fn history_offset() -> FixedOffset {
    FixedOffset::east_opt(HISTORY_DISPLAY_OFFSET_HOURS * 3600).unwrap_or_else(|| Utc.fix())
}

/// Where a lookup's payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Cache,
    Provider,
}

pub struct WeatherLookupService {
    store: Arc<dyn CacheStore>,
    provider: Arc<dyn ProviderFetcher>,
    window: ExpirationWindow,
}

impl WeatherLookupService {
    pub fn new(
        store: Arc<dyn CacheStore>,
        provider: Arc<dyn ProviderFetcher>,
        window: ExpirationWindow,
    ) -> Self {
        Self {
            store,
            provider,
            window,
        }
    }

    /// Current conditions for `city`.
    #[instrument(skip(self))]
    pub async fn current(&self, city: &str) -> WeatherResult<CurrentWeather> {
        let query_type = QueryType::Current;
        let (payload, source) = self.payload_for(city, query_type).await?;

        payload_parser::parse_current(&payload).map_err(|e| {
            let err = WeatherError::from(e);
            error!(operation = "current", city = %city, source = ?source, error = %err, "Failed to parse payload");
            err
        })
    }

    /// Forecast for `city` limited to the first `days` days.
    #[instrument(skip(self), fields(days = days.get()))]
    pub async fn forecast(&self, city: &str, days: ForecastDays) -> WeatherResult<Forecast> {
        let query_type = QueryType::Forecast(days);
        let (payload, source) = self.payload_for(city, query_type).await?;

        payload_parser::parse_forecast(&payload, usize::from(days.get())).map_err(|e| {
            let err = WeatherError::from(e);
            error!(operation = "forecast", city = %city, source = ?source, error = %err, "Failed to parse payload");
            err
        })
    }

    /// Every stored entry, newest first, with display-offset timestamps.
    #[instrument(skip(self))]
    pub async fn search_history(&self) -> WeatherResult<Vec<SearchHistoryItem>> {
        let entries = self.store.all_entries_descending().await.map_err(|e| {
            error!(operation = "search_history", error = %e, "Failed to read search history");
            e
        })?;

        let offset = history_offset();
        let items: Vec<SearchHistoryItem> = entries
            .into_iter()
            .map(|entry| SearchHistoryItem {
                city: entry.city,
                query_type: entry.query_type.as_key(),
                retrieved_at: entry.retrieved_at.with_timezone(&offset),
            })
            .collect();

        debug!(count = items.len(), "Search history loaded");
        Ok(items)
    }

    /// Fresh stored payload, or a newly fetched and stored one.
    async fn payload_for(
        &self,
        city: &str,
        query_type: QueryType,
    ) -> WeatherResult<(String, Source)> {
        let operation = query_type.kind();

        let cached = self
            .store
            .latest_entry(city, query_type)
            .await
            .map_err(|e| {
                error!(operation, city = %city, query_type = %query_type, error = %e, "Cache lookup failed");
                e
            })?;

        let now = Utc::now();
        if let Some(entry) = cached {
            if self.window.is_fresh(entry.retrieved_at, now) {
                info!(city = %city, query_type = %query_type, "Returning cached weather data");
                metrics::record_cache_hit(query_type);
                return Ok((entry.payload, Source::Cache));
            }
            debug!(
                city = %city,
                query_type = %query_type,
                age_secs = (now - entry.retrieved_at).num_seconds(),
                "Cached entry is stale"
            );
        }

        info!(city = %city, query_type = %query_type, "Fetching weather data from provider");
        metrics::record_cache_miss(query_type);

        let fetched = match query_type {
            QueryType::Current => self.provider.fetch_current(city).await,
            QueryType::Forecast(days) => self.provider.fetch_forecast(city, days).await,
        };
        let payload = fetched.map_err(|e| {
            metrics::record_provider_failure(query_type);
            error!(operation, city = %city, query_type = %query_type, error = %e, "Provider request failed");
            e
        })?;

        let entry = CacheEntry::new(city, query_type, payload, Utc::now());
        self.store.insert(&entry).await.map_err(|e| {
            error!(operation, city = %city, query_type = %query_type, error = %e, "Failed to store cache entry");
            e
        })?;

        Ok((entry.payload, Source::Provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_history_offset_is_three_hours_behind_utc() {
        let utc = Utc.with_ymd_and_hms(2025, 9, 19, 12, 0, 0).unwrap();
        let shown = utc.with_timezone(&history_offset());

        assert_eq!(shown.to_rfc3339(), "2025-09-19T09:00:00-03:00");
        assert_eq!(shown, utc);
    }

    #[test]
    fn test_history_item_json_shape() {
        let item = SearchHistoryItem {
            city: "London".to_string(),
            query_type: "forecast_3".to_string(),
            retrieved_at: Utc
                .with_ymd_and_hms(2025, 9, 19, 12, 0, 0)
                .unwrap()
                .with_timezone(&history_offset()),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["city"], "London");
        assert_eq!(json["type"], "forecast_3");
        assert_eq!(json["retrievedAt"], "2025-09-19T09:00:00-03:00");
    }
}
