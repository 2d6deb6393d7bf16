//! Parser for raw weather provider payloads.
//!
//! Turns the verbatim JSON text kept in the cache into the normalized
//! [`CurrentWeather`] and [`Forecast`] views. Required fields are checked one
//! at a time; a missing or null field fails with its JSON path and no value
//! is ever defaulted.

mod raw;
pub mod view;

use thiserror::Error;
use tracing::debug;

use weather_common::WeatherError;

use raw::{RawCondition, RawCurrentDocument, RawForecastDay, RawForecastDocument, RawLocation};
pub use view::{CurrentWeather, Forecast, ForecastDay};

/// Errors produced while extracting a view from a payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("missing required field '{0}'")]
    MissingField(String),
}

impl From<PayloadError> for WeatherError {
    fn from(err: PayloadError) -> Self {
        WeatherError::MalformedPayload(err.to_string())
    }
}

fn required<T>(value: Option<T>, path: impl Into<String>) -> Result<T, PayloadError> {
    value.ok_or_else(|| PayloadError::MissingField(path.into()))
}

fn location_name(location: Option<RawLocation>) -> Result<String, PayloadError> {
    let location = required(location, "location")?;
    required(location.name, "location.name")
}

fn condition_text(condition: Option<RawCondition>, prefix: &str) -> Result<String, PayloadError> {
    let condition = required(condition, format!("{}.condition", prefix))?;
    required(condition.text, format!("{}.condition.text", prefix))
}

/// Extract current conditions from a `current.json` payload.
pub fn parse_current(payload: &str) -> Result<CurrentWeather, PayloadError> {
    let doc: RawCurrentDocument = serde_json::from_str(payload)?;

    let city = location_name(doc.location)?;
    let current = required(doc.current, "current")?;

    Ok(CurrentWeather {
        city,
        temperature_c: required(current.temp_c, "current.temp_c")?,
        humidity_pct: required(current.humidity, "current.humidity")?,
        condition_text: condition_text(current.condition, "current")?,
        wind_kph: required(current.wind_kph, "current.wind_kph")?,
    })
}

/// Extract a forecast from a `forecast.json` payload, keeping at most the
/// first `days_quantity` days in payload order.
///
/// A payload with fewer days than requested yields the days it has. Days past
/// `days_quantity` are not validated.
pub fn parse_forecast(payload: &str, days_quantity: usize) -> Result<Forecast, PayloadError> {
    let doc: RawForecastDocument = serde_json::from_str(payload)?;

    let city = location_name(doc.location)?;
    let forecast = required(doc.forecast, "forecast")?;
    let forecast_days = required(forecast.forecastday, "forecast.forecastday")?;

    let available = forecast_days.len();
    let days = forecast_days
        .into_iter()
        .take(days_quantity)
        .enumerate()
        .map(|(index, day)| parse_forecast_day(index, day))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        city = %city,
        requested = days_quantity,
        available = available,
        returned = days.len(),
        "Parsed forecast payload"
    );

    Ok(Forecast { city, days })
}

fn parse_forecast_day(index: usize, raw: RawForecastDay) -> Result<ForecastDay, PayloadError> {
    let prefix = format!("forecast.forecastday[{}]", index);
    let date = required(raw.date, format!("{}.date", prefix))?;

    let day_prefix = format!("{}.day", prefix);
    let day = required(raw.day, day_prefix.as_str())?;
    let field = |name: &str| format!("{}.{}", day_prefix, name);

    Ok(ForecastDay {
        date,
        max_temp_c: required(day.maxtemp_c, field("maxtemp_c"))?,
        min_temp_c: required(day.mintemp_c, field("mintemp_c"))?,
        avg_temp_c: required(day.avgtemp_c, field("avgtemp_c"))?,
        avg_humidity_pct: required(day.avghumidity, field("avghumidity"))?,
        max_wind_kph: required(day.maxwind_kph, field("maxwind_kph"))?,
        condition_text: condition_text(day.condition, &day_prefix)?,
    })
}
