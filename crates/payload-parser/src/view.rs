//! Normalized views returned to API clients.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current conditions for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub city: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub condition_text: String,
    pub wind_kph: f64,
}

/// Multi-day forecast for a city, in provider order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub city: String,
    pub days: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub avg_temp_c: f64,
    pub avg_humidity_pct: u8,
    pub max_wind_kph: f64,
    pub condition_text: String,
}
