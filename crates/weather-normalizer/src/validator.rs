//! Range Validator for Canonical Weather Values

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Validation configuration
///
/// All ranges are inclusive except `wind_direction_range`, whose upper bound
/// is exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Air temperature valid range (°C), also used for "feels like"
    pub temperature_range: (f64, f64),
    /// Relative humidity valid range (%)
    pub humidity_range: (f64, f64),
    /// Wind speed valid range (m/s)
    pub wind_speed_range: (f64, f64),
    /// Wind direction valid range (degrees, upper bound exclusive)
    pub wind_direction_range: (f64, f64),
    /// Sea-level pressure valid range (hPa)
    pub pressure_range: (f64, f64),
    /// Latitude valid range (degrees)
    pub latitude_range: (f64, f64),
    /// Longitude valid range (degrees)
    pub longitude_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            temperature_range: (-90.0, 60.0),
            humidity_range: (0.0, 100.0),
            wind_speed_range: (0.0, 150.0),
            wind_direction_range: (0.0, 360.0),
            pressure_range: (800.0, 1100.0),
            latitude_range: (-90.0, 90.0),
            longitude_range: (-180.0, 180.0),
        }
    }
}

/// Range validator for canonical weather values.
///
/// Operates on values that are already in canonical units and knows nothing
/// about unit tags.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config.
    ///
    /// `humidity_range` is narrowed to `[0, 255]` so every accepted humidity
    /// fits the canonical `u8` field.
    pub fn new(mut config: ValidationConfig) -> Self {
        let (min, max) = config.humidity_range;
        config.humidity_range = (min.max(0.0), max.min(f64::from(u8::MAX)));
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against an inclusive range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        check_finite(field, value)?;
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate a single value against `[min, max)`
    pub fn validate_half_open_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        check_finite(field, value)?;
        if value < range.0 || value >= range.1 {
            Err(ValidationError::OutOfHalfOpenRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    pub fn validate_latitude(&self, lat: f64) -> Result<(), ValidationError> {
        self.validate_range("latitude", lat, self.config.latitude_range)
    }

    pub fn validate_longitude(&self, lon: f64) -> Result<(), ValidationError> {
        self.validate_range("longitude", lon, self.config.longitude_range)
    }

    /// Validate air temperature (°C)
    pub fn validate_temperature(&self, temp_c: f64) -> Result<(), ValidationError> {
        self.validate_range("temperature_c", temp_c, self.config.temperature_range)
    }

    /// Validate apparent temperature (°C); absent passes
    pub fn validate_feels_like(&self, feels_like_c: Option<f64>) -> Result<(), ValidationError> {
        match feels_like_c {
            Some(value) => {
                self.validate_range("feels_like_c", value, self.config.temperature_range)
            }
            None => Ok(()),
        }
    }

    /// Validate relative humidity (%)
    pub fn validate_humidity(&self, humidity: i64) -> Result<(), ValidationError> {
        // i64 -> f64 is exact for every value near the valid range
        self.validate_range("humidity_percent", humidity as f64, self.config.humidity_range)
    }

    /// Validate wind speed (m/s)
    pub fn validate_wind_speed(&self, speed_ms: f64) -> Result<(), ValidationError> {
        self.validate_range("wind_speed_ms", speed_ms, self.config.wind_speed_range)
    }

    /// Validate pressure (hPa); absent passes
    pub fn validate_pressure(&self, pressure_hpa: Option<f64>) -> Result<(), ValidationError> {
        match pressure_hpa {
            Some(value) => self.validate_range("pressure_hpa", value, self.config.pressure_range),
            None => Ok(()),
        }
    }

    /// Validate wind direction (degrees); absent passes
    pub fn validate_wind_direction(&self, direction_deg: Option<f64>) -> Result<(), ValidationError> {
        match direction_deg {
            Some(value) => self.validate_half_open_range(
                "wind_direction_deg",
                value,
                self.config.wind_direction_range,
            ),
            None => Ok(()),
        }
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_temperature_bounds_are_inclusive() {
        let validator = Validator::default();
        assert!(validator.validate_temperature(-90.0).is_ok());
        assert!(validator.validate_temperature(60.0).is_ok());
        assert!(validator.validate_temperature(21.0).is_ok());
        assert!(validator.validate_temperature(-90.01).is_err());
        assert!(validator.validate_temperature(60.01).is_err());
    }

    #[test]
    fn test_humidity_range() {
        let validator = Validator::default();
        assert!(validator.validate_humidity(0).is_ok());
        assert!(validator.validate_humidity(100).is_ok());
        let err = validator.validate_humidity(150).unwrap_err();
        assert!(err.to_string().contains("humidity"));
        assert!(validator.validate_humidity(-1).is_err());
    }

    #[test]
    fn test_wind_direction_upper_bound_exclusive() {
        let validator = Validator::default();
        assert!(validator.validate_wind_direction(Some(0.0)).is_ok());
        assert!(validator.validate_wind_direction(Some(359.99)).is_ok());
        let err = validator.validate_wind_direction(Some(360.0)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfHalfOpenRange {
                field: "wind_direction_deg",
                value: 360.0,
                min: 0.0,
                max: 360.0,
            }
        );
        assert!(validator.validate_wind_direction(Some(-0.5)).is_err());
    }

    #[test]
    fn test_absent_optionals_pass() {
        let validator = Validator::default();
        assert!(validator.validate_pressure(None).is_ok());
        assert!(validator.validate_wind_direction(None).is_ok());
        assert!(validator.validate_feels_like(None).is_ok());
    }

    #[test]
    fn test_pressure_range() {
        let validator = Validator::default();
        assert!(validator.validate_pressure(Some(800.0)).is_ok());
        assert!(validator.validate_pressure(Some(1100.0)).is_ok());
        let err = validator.validate_pressure(Some(500.0)).unwrap_err();
        assert_eq!(err.to_string(), "pressure_hpa: value 500 is out of range [800, 1100]");
    }

    #[test]
    fn test_coordinates() {
        let validator = Validator::default();
        assert!(validator.validate_latitude(90.0).is_ok());
        assert!(validator.validate_latitude(-90.0).is_ok());
        assert!(validator.validate_latitude(90.5).is_err());
        assert!(validator.validate_longitude(-180.0).is_ok());
        assert!(validator.validate_longitude(180.1).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let validator = Validator::default();
        let err = validator.validate_wind_speed(f64::NAN).unwrap_err();
        assert_eq!(err.field(), "wind_speed_ms");
        assert!(err.to_string().contains("not a finite number"));
        assert!(validator.validate_temperature(f64::INFINITY).is_err());
    }

    #[test]
    fn test_custom_config() {
        let validator = Validator::new(ValidationConfig {
            wind_speed_range: (0.0, 50.0),
            ..Default::default()
        });
        assert!(validator.validate_wind_speed(60.0).is_err());
        assert!(Validator::default().validate_wind_speed(60.0).is_ok());
    }

    proptest! {
        #[test]
        fn prop_in_range_temperatures_pass(t in -90.0f64..=60.0) {
            prop_assert!(Validator::default().validate_temperature(t).is_ok());
        }

        #[test]
        fn prop_out_of_range_humidity_fails(h in prop_oneof![-1000i64..0, 101i64..1000]) {
            let err = Validator::default().validate_humidity(h).unwrap_err();
            prop_assert!(err.to_string().contains("humidity"));
        }

        #[test]
        fn prop_out_of_range_latitude_fails(lat in prop_oneof![-1.0e4f64..-90.0001, 90.0001f64..1.0e4]) {
            let err = Validator::default().validate_latitude(lat).unwrap_err();
            prop_assert_eq!(err.field(), "latitude");
        }
    }
}
