//! Query discriminators used as cache keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{WeatherError, WeatherResult};

/// Number of forecast days the provider is asked for (1 to 5 inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ForecastDays(u8);

impl ForecastDays {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(days: u8) -> WeatherResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&days) {
            Ok(Self(days))
        } else {
            Err(WeatherError::InvalidParameter {
                param: "daysQuantity".to_string(),
                message: format!(
                    "daysQuantity must be between {} and {}.",
                    Self::MIN,
                    Self::MAX
                ),
            })
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for ForecastDays {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u8> for ForecastDays {
    type Error = WeatherError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ForecastDays> for u8 {
    fn from(days: ForecastDays) -> Self {
        days.0
    }
}

impl fmt::Display for ForecastDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of provider query a cache entry holds.
///
/// Stored as `"current"` or `"forecast_<N>"`; each day count is its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Current,
    Forecast(ForecastDays),
}

impl QueryType {
    /// Cache key discriminator as persisted.
    pub fn as_key(&self) -> String {
        match self {
            QueryType::Current => "current".to_string(),
            QueryType::Forecast(days) => format!("forecast_{}", days),
        }
    }

    /// Coarse label without the day count (for metrics).
    pub fn kind(&self) -> &'static str {
        match self {
            QueryType::Current => "current",
            QueryType::Forecast(_) => "forecast",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

impl FromStr for QueryType {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "current" {
            return Ok(QueryType::Current);
        }

        let invalid = || WeatherError::InvalidParameter {
            param: "query_type".to_string(),
            message: format!("unknown query type '{}'", s),
        };

        let days = s
            .strip_prefix("forecast_")
            .and_then(|n| n.parse::<u8>().ok())
            .ok_or_else(invalid)?;

        ForecastDays::new(days)
            .map(QueryType::Forecast)
            .map_err(|_| invalid())
    }
}
