//! Canned provider payloads for tests.
//!
//! Shapes follow the provider's `current.json` and `forecast.json` responses,
//! trimmed to the fields the parser reads plus a few it ignores.

/// Current conditions for London.
pub const LONDON_CURRENT: &str = r#"{
    "location": {"name": "London", "region": "City of London, Greater London", "country": "United Kingdom"},
    "current": {
        "last_updated": "2025-09-19 12:00",
        "temp_c": 20.0,
        "humidity": 50,
        "condition": {"text": "Sunny", "code": 1000},
        "wind_kph": 10.0
    }
}"#;

/// Current conditions for Paris.
pub const PARIS_CURRENT: &str = r#"{"location":{"name":"Paris"},"current":{"temp_c":22,"humidity":60,"condition":{"text":"Cloudy"},"wind_kph":5}}"#;

/// Current payload whose `current.temp_c` field is missing.
pub const CURRENT_MISSING_TEMP: &str = r#"{"location":{"name":"London"},"current":{"humidity":50,"condition":{"text":"Sunny"},"wind_kph":10}}"#;

/// Three-day forecast for London.
pub const LONDON_FORECAST_3_DAYS: &str = r#"{
    "location": {"name": "London"},
    "forecast": {
        "forecastday": [
            {
                "date": "2025-09-19",
                "day": {"maxtemp_c": 25.0, "mintemp_c": 15.0, "avgtemp_c": 20.0, "avghumidity": 60, "maxwind_kph": 15, "condition": {"text": "Sunny"}}
            },
            {
                "date": "2025-09-20",
                "day": {"maxtemp_c": 22.5, "mintemp_c": 14.0, "avgtemp_c": 18.1, "avghumidity": 72, "maxwind_kph": 21.6, "condition": {"text": "Patchy rain nearby"}}
            },
            {
                "date": "2025-09-21",
                "day": {"maxtemp_c": 19.0, "mintemp_c": 12.3, "avgtemp_c": 15.7, "avghumidity": 81, "maxwind_kph": 30.2, "condition": {"text": "Moderate rain"}}
            }
        ]
    }
}"#;

/// Forecast whose second day lacks `day.maxtemp_c`.
pub const FORECAST_SECOND_DAY_BROKEN: &str = r#"{
    "location": {"name": "London"},
    "forecast": {
        "forecastday": [
            {"date": "2025-09-19", "day": {"maxtemp_c": 25.0, "mintemp_c": 15.0, "avgtemp_c": 20.0, "avghumidity": 60, "maxwind_kph": 15, "condition": {"text": "Sunny"}}},
            {"date": "2025-09-20", "day": {"mintemp_c": 14.0, "avgtemp_c": 18.1, "avghumidity": 72, "maxwind_kph": 21.6, "condition": {"text": "Cloudy"}}}
        ]
    }
}"#;
