//! Weather Reading Normalization
//!
//! Converts a [`RawReading`] into a [`CanonicalWeather`] record. Checks run in
//! a fixed order and the first violation is returned:
//! latitude, longitude, country code, temperature, feels-like, humidity,
//! wind speed, pressure, wind direction.

use crate::error::{NormalizationFailure, ValidationError};
use crate::model::{CanonicalWeather, Location, RawReading, Source};
use crate::validator::{ValidationConfig, Validator};
use tracing::debug;

/// Result of normalizing one reading
pub type NormalizationOutcome = Result<CanonicalWeather, NormalizationFailure>;

/// Raw values converted to canonical units, not yet range-checked
#[derive(Debug, Clone, Copy)]
struct CanonicalValues {
    temperature_c: f64,
    feels_like_c: Option<f64>,
    wind_speed_ms: f64,
}

impl CanonicalValues {
    fn convert(raw: &RawReading) -> Self {
        Self {
            temperature_c: raw.temp_unit.to_celsius(raw.temperature),
            feels_like_c: raw.feels_like.map(|value| raw.temp_unit.to_celsius(value)),
            wind_speed_ms: raw.wind_speed_unit.to_meters_per_second(raw.wind_speed),
        }
    }
}

/// Stateless normalizer; safe to share across threads and tasks
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    validator: Validator,
}

impl Normalizer {
    /// Create a normalizer with custom validation ranges
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            validator: Validator::new(config),
        }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Normalize a reading, tagging the result with `source`
    pub fn normalize(&self, raw: &RawReading, source: Source) -> NormalizationOutcome {
        self.try_normalize(raw, source).map_err(|error| {
            debug!(field = error.field(), "Reading rejected: {}", error);
            NormalizationFailure::from(error)
        })
    }

    fn try_normalize(
        &self,
        raw: &RawReading,
        source: Source,
    ) -> Result<CanonicalWeather, ValidationError> {
        let location = self.validate_location(raw)?;

        let values = CanonicalValues::convert(raw);

        self.validator.validate_temperature(values.temperature_c)?;
        self.validator.validate_feels_like(values.feels_like_c)?;
        self.validator.validate_humidity(raw.humidity)?;
        self.validator.validate_wind_speed(values.wind_speed_ms)?;
        self.validator.validate_pressure(raw.pressure)?;
        self.validator.validate_wind_direction(raw.wind_direction)?;

        let humidity_percent = u8::try_from(raw.humidity).map_err(|_| {
            let (min, max) = self.validator.config().humidity_range;
            ValidationError::OutOfRange {
                field: "humidity_percent",
                value: raw.humidity as f64,
                min,
                max,
            }
        })?;

        Ok(CanonicalWeather {
            location,
            timestamp_utc: raw.timestamp,
            temperature_c: values.temperature_c,
            feels_like_c: values.feels_like_c,
            humidity_percent,
            wind_speed_ms: values.wind_speed_ms,
            wind_direction_deg: raw.wind_direction,
            pressure_hpa: raw.pressure,
            weather_code: raw.weather_code.clone(),
            source,
        })
    }

    fn validate_location(&self, raw: &RawReading) -> Result<Location, ValidationError> {
        self.validator.validate_latitude(raw.lat)?;
        self.validator.validate_longitude(raw.lon)?;

        if let Some(code) = raw.country_code.as_deref() {
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ValidationError::InvalidFormat {
                    field: "country_code".to_string(),
                    reason: format!("'{}' is not a two-letter country code", code),
                });
            }
        }

        Ok(Location {
            lat: raw.lat,
            lon: raw.lon,
            city: raw.city.clone(),
            country_code: raw.country_code.clone(),
        })
    }
}

/// Normalize a caller-submitted reading with the default validation ranges
pub fn normalize(raw: &RawReading) -> NormalizationOutcome {
    Normalizer::default().normalize(raw, Source::RAW_INPUT)
}
