//! Common types and utilities shared across the weather cache crates.

pub mod error;
pub mod freshness;
pub mod query;

pub use error::{WeatherError, WeatherResult};
pub use freshness::ExpirationWindow;
pub use query::{ForecastDays, QueryType};
