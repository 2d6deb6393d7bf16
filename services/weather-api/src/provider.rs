//! Client for the external weather provider.
//!
//! Returns raw response bodies; parsing happens later so the verbatim text
//! can be cached. No retries are attempted here.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use weather_common::{ForecastDays, WeatherError, WeatherResult};

/// Source of raw provider payloads.
#[async_trait]
pub trait ProviderFetcher: Send + Sync {
    /// Raw `current.json` body for `city`.
    async fn fetch_current(&self, city: &str) -> WeatherResult<String>;

    /// Raw `forecast.json` body for `city` covering `days` days.
    async fn fetch_forecast(&self, city: &str, days: ForecastDays) -> WeatherResult<String>;
}

/// WeatherAPI-compatible HTTP client.
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    /// Create a client for `base_url` (e.g. `https://api.weatherapi.com/v1/`).
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    async fn get_text(&self, url: &str, query: &[(&str, String)]) -> WeatherResult<String> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(unavailable)?;

        let response = response.error_for_status().map_err(unavailable)?;
        let body = response.text().await.map_err(unavailable)?;

        debug!(url = %url, bytes = body.len(), "Provider response received");
        Ok(body)
    }
}

/// Map a transport failure, dropping the request URL since it carries the
/// API key.
fn unavailable(err: reqwest::Error) -> WeatherError {
    let reason = if err.is_timeout() {
        "request timed out".to_string()
    } else if let Some(status) = err.status() {
        format!("provider returned HTTP {}", status)
    } else {
        err.without_url().to_string()
    };
    WeatherError::ExternalUnavailable(reason)
}

#[async_trait]
impl ProviderFetcher for WeatherApiClient {
    #[instrument(skip(self))]
    async fn fetch_current(&self, city: &str) -> WeatherResult<String> {
        let query = [
            ("key", self.api_key.clone()),
            ("q", city.to_string()),
            ("aqi", "no".to_string()),
        ];
        self.get_text(&self.endpoint("current.json"), &query).await
    }

    #[instrument(skip(self), fields(days = days.get()))]
    async fn fetch_forecast(&self, city: &str, days: ForecastDays) -> WeatherResult<String> {
        let query = [
            ("key", self.api_key.clone()),
            ("q", city.to_string()),
            ("days", days.to_string()),
            ("aqi", "no".to_string()),
            ("alerts", "no".to_string()),
        ];
        self.get_text(&self.endpoint("forecast.json"), &query).await
    }
}
