//! Payload and timestamp generators for tests.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::json;

/// Build a `current.json` payload.
pub fn current_payload(city: &str, temp_c: f64, humidity: u8, condition: &str, wind_kph: f64) -> String {
    json!({
        "location": { "name": city },
        "current": {
            "temp_c": temp_c,
            "humidity": humidity,
            "condition": { "text": condition },
            "wind_kph": wind_kph
        }
    })
    .to_string()
}

/// Build a `forecast.json` payload with `days` consecutive days starting at
/// 2025-09-19. Day `i` has a max temperature of `20 + i`.
pub fn forecast_payload(city: &str, days: usize) -> String {
    let start = NaiveDate::from_ymd_opt(2025, 9, 19).expect("valid date");

    let forecastday: Vec<_> = (0..days)
        .map(|i| {
            let date = start + Duration::days(i as i64);
            json!({
                "date": date.format("%Y-%m-%d").to_string(),
                "day": {
                    "maxtemp_c": 20.0 + i as f64,
                    "mintemp_c": 10.0 + i as f64,
                    "avgtemp_c": 15.0 + i as f64,
                    "avghumidity": 60 + i,
                    "maxwind_kph": 12.5,
                    "condition": { "text": format!("Day {}", i + 1) }
                }
            })
        })
        .collect();

    json!({
        "location": { "name": city },
        "forecast": { "forecastday": forecastday }
    })
    .to_string()
}

/// Timestamp `minutes` minutes before now.
pub fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    Utc::now() - Duration::minutes(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_payload_day_count() {
        let payload: serde_json::Value = serde_json::from_str(&forecast_payload("Oslo", 4)).unwrap();
        let days = payload["forecast"]["forecastday"].as_array().unwrap();
        assert_eq!(days.len(), 4);
        assert_eq!(days[3]["date"], "2025-09-22");
    }
}
