//! Typed mirror of the provider's JSON documents.
//!
//! Every field is optional so that a missing value is reported by path
//! instead of as a generic deserialization failure. Unknown fields are
//! ignored.

use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RawCurrentDocument {
    pub location: Option<RawLocation>,
    pub current: Option<RawCurrent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawForecastDocument {
    pub location: Option<RawLocation>,
    pub forecast: Option<RawForecast>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLocation {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCondition {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCurrent {
    pub temp_c: Option<f64>,
    pub humidity: Option<u8>,
    pub condition: Option<RawCondition>,
    pub wind_kph: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawForecast {
    pub forecastday: Option<Vec<RawForecastDay>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawForecastDay {
    pub date: Option<NaiveDate>,
    pub day: Option<RawDay>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDay {
    pub maxtemp_c: Option<f64>,
    pub mintemp_c: Option<f64>,
    pub avgtemp_c: Option<f64>,
    pub avghumidity: Option<u8>,
    pub maxwind_kph: Option<f64>,
    pub condition: Option<RawCondition>,
}
