//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::Level;

use weather_common::ExpirationWindow;

#[derive(Parser, Debug, Clone)]
#[command(name = "weather-api")]
#[command(about = "Caching front for an external weather provider")]
pub struct Args {
    /// Listen address
    #[arg(short, long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// SQLite cache database file
    #[arg(long, env = "DATABASE_PATH", default_value = "data/weather-cache.db")]
    pub database_path: PathBuf,

    /// Provider base URL
    #[arg(
        long,
        env = "WEATHER_API_BASE_URL",
        default_value = "https://api.weatherapi.com/v1/"
    )]
    pub provider_base_url: String,

    /// Provider API key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub provider_api_key: String,

    /// Provider request timeout in seconds
    #[arg(long, env = "WEATHER_API_TIMEOUT_SECS", default_value = "10")]
    pub provider_timeout_secs: u64,

    /// Minutes a cached payload stays fresh (invalid values fall back to 60)
    #[arg(long, env = "CACHE_EXPIRATION_MINUTES")]
    pub cache_expiration_minutes: Option<String>,

    /// Seconds between expired-entry sweeps
    #[arg(long, env = "CACHE_SWEEP_INTERVAL_SECS", default_value = "3600")]
    pub sweep_interval_secs: u64,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn expiration_window(&self) -> ExpirationWindow {
        ExpirationWindow::from_minutes_setting(self.cache_expiration_minutes.as_deref())
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }

    pub fn tracing_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}
