//! Weather Reading Models
//!
//! `RawReading` is the provider/client-agnostic input, `CanonicalWeather` the
//! validated output. Field names are part of the external JSON contract.

use crate::error::ValidationError;
use crate::units::{TemperatureUnit, WindSpeedUnit};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Accepted layouts for timestamps without an offset, interpreted as UTC
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A weather observation in caller- or provider-native units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    pub temperature: f64,
    #[serde(default)]
    pub temp_unit: TemperatureUnit,
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_speed_unit: WindSpeedUnit,
    /// Relative humidity in whole percent; `75.0` is accepted, `75.5` is not
    #[serde(deserialize_with = "deserialize_whole_number")]
    pub humidity: i64,
    /// Pressure in hPa
    #[serde(default)]
    pub pressure: Option<f64>,
    pub lat: f64,
    pub lon: f64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub weather_code: Option<String>,
    /// Apparent temperature, in `temp_unit`
    #[serde(default)]
    pub feels_like: Option<f64>,
    /// Wind direction in degrees
    #[serde(default)]
    pub wind_direction: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl RawReading {
    /// Reading with the required fields set and every optional field absent
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        temperature: f64,
        temp_unit: TemperatureUnit,
        wind_speed: f64,
        wind_speed_unit: WindSpeedUnit,
        humidity: i64,
        lat: f64,
        lon: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            temperature,
            temp_unit,
            wind_speed,
            wind_speed_unit,
            humidity,
            pressure: None,
            lat,
            lon,
            timestamp,
            weather_code: None,
            feels_like: None,
            wind_direction: None,
            city: None,
            country_code: None,
        }
    }

    pub fn with_pressure(mut self, pressure_hpa: f64) -> Self {
        self.pressure = Some(pressure_hpa);
        self
    }

    pub fn with_weather_code(mut self, code: impl Into<String>) -> Self {
        self.weather_code = Some(code.into());
        self
    }

    pub fn with_feels_like(mut self, feels_like: f64) -> Self {
        self.feels_like = Some(feels_like);
        self
    }

    pub fn with_wind_direction(mut self, direction_deg: f64) -> Self {
        self.wind_direction = Some(direction_deg);
        self
    }

    pub fn with_place(mut self, city: Option<String>, country_code: Option<String>) -> Self {
        self.city = city;
        self.country_code = country_code;
        self
    }
}

/// Geographic position of an observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub city: Option<String>,
    /// ISO 3166-1 alpha-2 code
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Provenance tag carried on every canonical record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Source(Cow<'static, str>);

impl Source {
    /// Reading obtained from the live provider fetch
    pub const EXTERNAL_API: Source = Source(Cow::Borrowed("external_api"));
    /// Reading submitted by a client through the batch endpoint
    pub const CLIENT: Source = Source(Cow::Borrowed("client"));
    /// Reading submitted through the raw normalization endpoint
    pub const RAW_INPUT: Source = Source(Cow::Borrowed("raw_input"));

    pub fn new(tag: impl Into<String>) -> Self {
        Self(Cow::Owned(tag.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::RAW_INPUT
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical, range-checked weather record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalWeather {
    pub location: Location,
    pub timestamp_utc: DateTime<Utc>,
    pub temperature_c: f64,
    pub feels_like_c: Option<f64>,
    pub humidity_percent: u8,
    pub wind_speed_ms: f64,
    pub wind_direction_deg: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub weather_code: Option<String>,
    pub source: Source,
}

/// Parse an observation timestamp into UTC.
///
/// Strings with an offset are converted to UTC; strings without one are taken
/// to already be UTC. A bare date is midnight UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Some(naive) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc());
    }

    Err(ValidationError::InvalidFormat {
        field: "timestamp".to_string(),
        reason: format!("'{}' is not a valid ISO-8601 datetime", input),
    })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(WholeNumberVisitor)
}

struct WholeNumberVisitor;

impl<'de> de::Visitor<'de> for WholeNumberVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a whole number")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
        i64::try_from(value)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
        // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            Ok(value as i64)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(value), &self))
        }
    }
}
