//! Background removal of expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use storage::CacheStore;
use weather_common::{ExpirationWindow, WeatherResult};

use crate::metrics;

/// Result of one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    /// Entries retrieved before this instant were removed.
    pub cutoff: DateTime<Utc>,
    pub removed: u64,
}

/// Periodically deletes entries older than the expiration window.
pub struct ExpirationSweeper {
    store: Arc<dyn CacheStore>,
    window: ExpirationWindow,
    interval: Duration,
}

impl ExpirationSweeper {
    pub fn new(store: Arc<dyn CacheStore>, window: ExpirationWindow, interval: Duration) -> Self {
        Self {
            store,
            window,
            interval,
        }
    }

    /// Remove every entry that is expired as of `now`.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> WeatherResult<SweepStats> {
        let cutoff = self.window.cutoff(now);
        let removed = self.store.delete_older_than(cutoff).await?;

        metrics::record_entries_swept(removed);
        info!(
            removed,
            cutoff = %cutoff,
            window_minutes = self.window.minutes(),
            "Expired cache entries removed"
        );

        Ok(SweepStats { cutoff, removed })
    }

    /// Sweep against the current wall clock.
    pub async fn run_once(&self) -> WeatherResult<SweepStats> {
        self.sweep_at(Utc::now()).await
    }

    /// Sweep immediately, then once per interval until `shutdown` is
    /// cancelled. A failed sweep is logged and the loop keeps going.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            interval_secs = self.interval.as_secs(),
            window_minutes = self.window.minutes(),
            "Starting cache expiration sweeper"
        );

        loop {
            if shutdown.is_cancelled() {
                break;
            }

            if let Err(e) = self.run_once().await {
                error!(operation = "sweep", error = %e, "Cache sweep failed");
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("Cache expiration sweeper stopped");
    }
}
