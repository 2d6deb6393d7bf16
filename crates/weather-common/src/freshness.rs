//! Freshness policy for cached provider payloads.

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

/// Default expiration window when the setting is absent or invalid.
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 60;

/// Largest accepted window (one year).
pub const MAX_EXPIRATION_MINUTES: i64 = 365 * 24 * 60;

/// How long a cached payload stays eligible for a cache hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationWindow {
    window: Duration,
}

impl ExpirationWindow {
    /// Create a window of `minutes` minutes, clamped to
    /// `0..=MAX_EXPIRATION_MINUTES`.
    pub fn from_minutes(minutes: i64) -> Self {
        Self {
            window: Duration::minutes(minutes.clamp(0, MAX_EXPIRATION_MINUTES)),
        }
    }

    /// Build the window from the raw configuration value.
    ///
    /// Never fails: an absent, unparsable, negative or oversized value falls
    /// back to [`DEFAULT_EXPIRATION_MINUTES`].
    pub fn from_minutes_setting(setting: Option<&str>) -> Self {
        let Some(raw) = setting else {
            return Self::default();
        };

        match raw.trim().parse::<i64>() {
            Ok(minutes) if (0..=MAX_EXPIRATION_MINUTES).contains(&minutes) => {
                Self::from_minutes(minutes)
            }
            _ => {
                warn!(
                    value = %raw,
                    default_minutes = DEFAULT_EXPIRATION_MINUTES,
                    "Invalid cache expiration setting, using default"
                );
                Self::default()
            }
        }
    }

    pub fn duration(&self) -> Duration {
        self.window
    }

    pub fn minutes(&self) -> i64 {
        self.window.num_minutes()
    }

    /// True iff `now - retrieved_at < window`. An entry aged exactly
    /// `window` is stale.
    pub fn is_fresh(&self, retrieved_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - retrieved_at < self.window
    }

    /// Entries retrieved strictly before this instant are expired.
    ///
    /// Saturates at the earliest representable instant.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl Default for ExpirationWindow {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_EXPIRATION_MINUTES)
    }
}
