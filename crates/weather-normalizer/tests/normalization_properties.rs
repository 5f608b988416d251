//! End-to-end properties of normalization, driven through the public API
//! from JSON input the way the HTTP layer receives it.

use proptest::prelude::*;
use weather_normalizer::{
    normalize, normalize_batch, ErrorKind, Normalizer, RawReading, Source, TemperatureUnit,
    WindSpeedUnit,
};

fn parse(json: serde_json::Value) -> RawReading {
    serde_json::from_value(json).expect("valid reading")
}

fn base_json() -> serde_json::Value {
    serde_json::json!({
        "temperature": 20.0,
        "temp_unit": "celsius",
        "wind_speed": 5.0,
        "wind_speed_unit": "ms",
        "humidity": 50,
        "lat": 10.0,
        "lon": 20.0,
        "timestamp": "2025-12-01T12:15:00Z"
    })
}

#[test]
fn singapore_scenario() {
    let raw = parse(serde_json::json!({
        "temperature": 302.15,
        "temp_unit": "kelvin",
        "wind_speed": 15.0,
        "wind_speed_unit": "kmh",
        "humidity": 75,
        "pressure": 1007,
        "lat": 1.3521,
        "lon": 103.8198,
        "timestamp": "2025-12-01T12:15:00Z"
    }));

    let weather = normalize(&raw).expect("reading should normalize");
    assert!((weather.temperature_c - 29.0).abs() < 1e-6);
    assert!((weather.wind_speed_ms - 4.1667).abs() < 1e-4);
    assert_eq!(weather.humidity_percent, 75);
    assert_eq!(weather.pressure_hpa, Some(1007.0));
    assert_eq!(weather.location.lat, 1.3521);
    assert_eq!(weather.location.lon, 103.8198);
    assert_eq!(weather.source, Source::RAW_INPUT);

    let json = serde_json::to_value(&weather).unwrap();
    assert_eq!(json["timestamp_utc"], "2025-12-01T12:15:00Z");
    assert_eq!(json["humidity_percent"], 75);
    assert!(json["feels_like_c"].is_null());
    assert!(json["wind_direction_deg"].is_null());
    assert!(json["weather_code"].is_null());
    assert_eq!(json["source"], "raw_input");
}

#[test]
fn fahrenheit_freezing_point_round_trip() {
    let mut json = base_json();
    json["temperature"] = serde_json::json!(32.0);
    json["temp_unit"] = serde_json::json!("fahrenheit");
    let weather = normalize(&parse(json)).unwrap();
    assert!(weather.temperature_c.abs() < 1e-6);
}

#[test]
fn zero_kmh_round_trip() {
    let mut json = base_json();
    json["wind_speed"] = serde_json::json!(0.0);
    json["wind_speed_unit"] = serde_json::json!("kmh");
    let weather = normalize(&parse(json)).unwrap();
    assert_eq!(weather.wind_speed_ms, 0.0);
}

#[test]
fn naive_timestamp_treated_as_utc() {
    let mut json = base_json();
    json["timestamp"] = serde_json::json!("2025-12-01T12:15:00");
    let weather = normalize(&parse(json)).unwrap();
    let out = serde_json::to_value(&weather).unwrap();
    assert_eq!(out["timestamp_utc"], "2025-12-01T12:15:00Z");
}

#[test]
fn bad_latitude_reported_before_bad_temperature() {
    let mut json = base_json();
    json["lat"] = serde_json::json!(-120.0);
    json["temperature"] = serde_json::json!(500.0);
    let failure = normalize(&parse(json)).unwrap_err();
    assert_eq!(failure.kind, ErrorKind::Validation);
    assert!(failure.to_string().contains("latitude"));
    assert!(!failure.to_string().contains("temperature"));
}

#[test]
fn batch_isolates_invalid_item() {
    let valid = parse(base_json());
    let mut invalid_json = base_json();
    invalid_json["humidity"] = serde_json::json!(150);
    let invalid = parse(invalid_json);

    let items = vec![
        ("item-1".to_string(), valid.clone()),
        ("item-2".to_string(), invalid),
        ("item-3".to_string(), valid),
    ];
    let results = normalize_batch(items);

    assert_eq!(results.len(), 3);
    let ids: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, ["item-1", "item-2", "item-3"]);
    assert!(results[0].1.is_ok());
    assert!(results[2].1.is_ok());
    let failure = results[1].1.as_ref().unwrap_err();
    assert!(failure.to_string().starts_with("VALIDATION_ERROR: humidity_percent: "));
}

proptest! {
    #[test]
    fn kelvin_below_minimum_cites_temperature(k in 0.0f64..183.14) {
        let mut json = base_json();
        json["temperature"] = serde_json::json!(k);
        json["temp_unit"] = serde_json::json!("kelvin");
        let failure = normalize(&parse(json)).unwrap_err();
        prop_assert_eq!(failure.kind, ErrorKind::Validation);
        prop_assert!(failure.to_string().contains("temperature_c"));
    }

    #[test]
    fn humidity_outside_percent_fails(h in prop_oneof![-500i64..0, 101i64..500]) {
        let mut json = base_json();
        json["humidity"] = serde_json::json!(h);
        let failure = normalize(&parse(json)).unwrap_err();
        prop_assert!(failure.to_string().contains("humidity"));
    }

    #[test]
    fn latitude_outside_range_fails_first(lat in prop_oneof![-1000.0f64..-90.001, 90.001f64..1000.0]) {
        let mut json = base_json();
        json["lat"] = serde_json::json!(lat);
        json["temperature"] = serde_json::json!(-400.0);
        let failure = normalize(&parse(json)).unwrap_err();
        prop_assert_eq!(failure.field(), "latitude");
    }

    #[test]
    fn canonical_units_are_idempotent(
        temp in -90.0f64..=60.0,
        wind in 0.0f64..=150.0,
        humidity in 0i64..=100,
        pressure in 800.0f64..=1100.0,
    ) {
        let raw = RawReading::new(
            temp,
            TemperatureUnit::Celsius,
            wind,
            WindSpeedUnit::MetersPerSecond,
            humidity,
            0.0,
            0.0,
            chrono::Utc::now(),
        )
        .with_pressure(pressure);
        let weather = Normalizer::default().normalize(&raw, Source::CLIENT).unwrap();
        prop_assert_eq!(weather.temperature_c, temp);
        prop_assert_eq!(weather.wind_speed_ms, wind);
        prop_assert_eq!(i64::from(weather.humidity_percent), humidity);
        prop_assert_eq!(weather.pressure_hpa, Some(pressure));
    }
}
