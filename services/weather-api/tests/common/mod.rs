//! Test doubles shared by the weather-api integration tests
//!
//! Provides:
//! - A provider that records calls and can be told to fail
//! - An in-memory cache store with injectable sweep failures

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use storage::{normalize_city, CacheEntry, CacheStore, SqliteCacheStore};
use test_utils::{current_payload, forecast_payload};
use weather_api::{ProviderFetcher, WeatherLookupService};
use weather_common::{ExpirationWindow, ForecastDays, QueryType, WeatherError, WeatherResult};

/// Number of days the fake provider always returns for forecasts.
pub const PROVIDER_FORECAST_DAYS: usize = 5;

/// Provider double that echoes the requested city.
#[derive(Default)]
pub struct FakeProvider {
    calls: Mutex<Vec<(String, QueryType)>>,
    fail: bool,
    current_body: Option<String>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request fails as if the provider were unreachable.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Return `body` verbatim for current-conditions requests.
    pub fn with_current_body(body: &str) -> Self {
        Self {
            current_body: Some(body.to_string()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, QueryType)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, city: &str, query_type: QueryType) -> WeatherResult<()> {
        self.calls.lock().unwrap().push((city.to_string(), query_type));
        if self.fail {
            return Err(WeatherError::ExternalUnavailable("provider down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProviderFetcher for FakeProvider {
    async fn fetch_current(&self, city: &str) -> WeatherResult<String> {
        self.record(city, QueryType::Current)?;
        Ok(self
            .current_body
            .clone()
            .unwrap_or_else(|| current_payload(city, 18.5, 70, "Partly cloudy", 11.0)))
    }

    async fn fetch_forecast(&self, city: &str, days: ForecastDays) -> WeatherResult<String> {
        self.record(city, QueryType::Forecast(days))?;
        Ok(forecast_payload(city, PROVIDER_FORECAST_DAYS))
    }
}

/// Cache store double kept in a vector.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<CacheEntry>>,
    failing_deletes: AtomicUsize,
    delete_calls: AtomicUsize,
    cutoffs: Mutex<Vec<DateTime<Utc>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` deletes fail with a storage error.
    pub fn fail_next_deletes(&self, n: usize) {
        self.failing_deletes.store(n, Ordering::SeqCst);
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn cutoffs(&self) -> Vec<DateTime<Utc>> {
        self.cutoffs.lock().unwrap().clone()
    }

    pub fn push(&self, entry: CacheEntry) {
        self.entries.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn latest_entry(
        &self,
        city: &str,
        query_type: QueryType,
    ) -> WeatherResult<Option<CacheEntry>> {
        let key = normalize_city(city);
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.city_key() == key && e.query_type == query_type)
            .max_by_key(|e| e.retrieved_at)
            .cloned())
    }

    async fn insert(&self, entry: &CacheEntry) -> WeatherResult<()> {
        self.push(entry.clone());
        Ok(())
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> WeatherResult<u64> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.cutoffs.lock().unwrap().push(cutoff);

        let remaining_failures = self.failing_deletes.load(Ordering::SeqCst);
        if remaining_failures > 0 {
            self.failing_deletes
                .store(remaining_failures - 1, Ordering::SeqCst);
            return Err(WeatherError::Storage("disk unavailable".to_string()));
        }

        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.retrieved_at >= cutoff);
        Ok((before - entries.len()) as u64)
    }

    async fn all_entries_descending(&self) -> WeatherResult<Vec<CacheEntry>> {
        let mut entries = self.entries.lock().unwrap().clone();
        entries.sort_by(|a, b| b.retrieved_at.cmp(&a.retrieved_at));
        Ok(entries)
    }

    async fn count(&self) -> WeatherResult<u64> {
        Ok(self.entries.lock().unwrap().len() as u64)
    }
}

/// Lookup service over a fresh in-memory SQLite store with a 60-minute window.
pub async fn sqlite_service(
    provider: Arc<FakeProvider>,
) -> (WeatherLookupService, Arc<SqliteCacheStore>) {
    let store = Arc::new(SqliteCacheStore::open_memory().await.unwrap());
    let service = WeatherLookupService::new(
        store.clone(),
        provider,
        ExpirationWindow::from_minutes(60),
    );
    (service, store)
}
