//! Extraction tests against canned and generated provider payloads.

use chrono::NaiveDate;
use payload_parser::{parse_current, parse_forecast, PayloadError};
use test_utils::{assert_approx_eq, fixtures, forecast_payload};

fn expect_missing(result: Result<impl std::fmt::Debug, PayloadError>, expected_path: &str) {
    match result {
        Err(PayloadError::MissingField(path)) => assert_eq!(path, expected_path),
        other => panic!("Expected MissingField({}), got {:?}", expected_path, other),
    }
}

// ============================================================================
// Current conditions
// ============================================================================

#[test]
fn test_current_ignores_unknown_fields() {
    let view = parse_current(fixtures::LONDON_CURRENT).unwrap();

    assert_eq!(view.city, "London");
    assert_approx_eq!(view.temperature_c, 20.0, 1e-9);
    assert_eq!(view.humidity_pct, 50);
    assert_eq!(view.condition_text, "Sunny");
    assert_approx_eq!(view.wind_kph, 10.0, 1e-9);
}

#[test]
fn test_current_missing_temperature() {
    expect_missing(parse_current(fixtures::CURRENT_MISSING_TEMP), "current.temp_c");
}

#[test]
fn test_current_missing_sections() {
    expect_missing(parse_current(r#"{"current":{}}"#), "location");
    expect_missing(parse_current(r#"{"location":{}}"#), "location.name");
    expect_missing(parse_current(r#"{"location":{"name":"X"}}"#), "current");
    expect_missing(
        parse_current(r#"{"location":{"name":"X"},"current":{"temp_c":1,"humidity":2,"wind_kph":3}}"#),
        "current.condition",
    );
    expect_missing(
        parse_current(
            r#"{"location":{"name":"X"},"current":{"temp_c":1,"humidity":2,"condition":{},"wind_kph":3}}"#,
        ),
        "current.condition.text",
    );
}

#[test]
fn test_current_wrong_type_is_invalid_json() {
    let payload = r#"{"location":{"name":"X"},"current":{"temp_c":"warm","humidity":2,"condition":{"text":"a"},"wind_kph":3}}"#;
    assert!(matches!(parse_current(payload), Err(PayloadError::InvalidJson(_))));
}

#[test]
fn test_current_truncated_body() {
    assert!(matches!(
        parse_current(r#"{"location":{"name":"#),
        Err(PayloadError::InvalidJson(_))
    ));
    assert!(matches!(parse_current(""), Err(PayloadError::InvalidJson(_))));
    assert!(matches!(parse_current("null"), Err(PayloadError::InvalidJson(_))));
}

// ============================================================================
// Forecast
// ============================================================================

#[test]
fn test_forecast_truncates_to_requested_days() {
    let forecast = parse_forecast(fixtures::LONDON_FORECAST_3_DAYS, 1).unwrap();

    assert_eq!(forecast.city, "London");
    assert_eq!(forecast.days.len(), 1);

    let day = &forecast.days[0];
    assert_eq!(day.date, NaiveDate::from_ymd_opt(2025, 9, 19).unwrap());
    assert_approx_eq!(day.max_temp_c, 25.0, 1e-9);
    assert_approx_eq!(day.min_temp_c, 15.0, 1e-9);
    assert_approx_eq!(day.avg_temp_c, 20.0, 1e-9);
    assert_eq!(day.avg_humidity_pct, 60);
    assert_approx_eq!(day.max_wind_kph, 15.0, 1e-9);
    assert_eq!(day.condition_text, "Sunny");
}

#[test]
fn test_forecast_keeps_payload_order() {
    let forecast = parse_forecast(fixtures::LONDON_FORECAST_3_DAYS, 3).unwrap();
    let dates: Vec<String> = forecast.days.iter().map(|d| d.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-09-19", "2025-09-20", "2025-09-21"]);
    assert_eq!(forecast.days[2].condition_text, "Moderate rain");
}

#[test]
fn test_forecast_fewer_days_than_requested() {
    let payload = forecast_payload("Lisbon", 2);
    let forecast = parse_forecast(&payload, 5).unwrap();

    assert_eq!(forecast.city, "Lisbon");
    assert_eq!(forecast.days.len(), 2);
    assert_approx_eq!(forecast.days[1].max_temp_c, 21.0, 1e-9);
}

#[test]
fn test_forecast_empty_day_list() {
    let forecast = parse_forecast(&forecast_payload("Nowhere", 0), 3).unwrap();
    assert!(forecast.days.is_empty());
}

#[test]
fn test_forecast_missing_field_reports_day_index() {
    expect_missing(
        parse_forecast(fixtures::FORECAST_SECOND_DAY_BROKEN, 2),
        "forecast.forecastday[1].day.maxtemp_c",
    );
}

#[test]
fn test_forecast_days_past_quantity_are_not_checked() {
    let forecast = parse_forecast(fixtures::FORECAST_SECOND_DAY_BROKEN, 1).unwrap();
    assert_eq!(forecast.days.len(), 1);
}

#[test]
fn test_forecast_missing_list() {
    expect_missing(
        parse_forecast(r#"{"location":{"name":"X"},"forecast":{}}"#, 1),
        "forecast.forecastday",
    );
    expect_missing(parse_forecast(r#"{"location":{"name":"X"}}"#, 1), "forecast");
}

#[test]
fn test_forecast_bad_date() {
    let payload = r#"{"location":{"name":"X"},"forecast":{"forecastday":[{"date":"19/09/2025","day":{}}]}}"#;
    assert!(matches!(parse_forecast(payload, 1), Err(PayloadError::InvalidJson(_))));
}

#[test]
fn test_view_serializes_camel_case() {
    let forecast = parse_forecast(fixtures::LONDON_FORECAST_3_DAYS, 1).unwrap();
    let json = serde_json::to_value(&forecast).unwrap();

    assert_eq!(json["city"], "London");
    assert_eq!(json["days"][0]["date"], "2025-09-19");
    assert_eq!(json["days"][0]["maxTempC"], 25.0);
    assert_eq!(json["days"][0]["avgHumidityPct"], 60);
    assert_eq!(json["days"][0]["conditionText"], "Sunny");

    let current = serde_json::to_value(parse_current(fixtures::PARIS_CURRENT).unwrap()).unwrap();
    assert_eq!(current["temperatureC"], 22.0);
    assert_eq!(current["humidityPct"], 60);
    assert_eq!(current["windKph"], 5.0);
}
