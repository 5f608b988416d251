//! Unit Conversion to Canonical Units
//!
//! Total, pure transforms. Unknown unit tags never reach this module: they
//! are rejected when the enums are deserialized.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset between Kelvin and Celsius
const KELVIN_OFFSET: f64 = 273.15;
/// Kilometres per hour in one metre per second
const KMH_PER_MS: f64 = 3.6;
/// Metres per second in one mile per hour
const MS_PER_MPH: f64 = 0.44704;

/// Temperature unit tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    /// Convert a value in this unit to degrees Celsius
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Kelvin => value - KELVIN_OFFSET,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Kelvin => "kelvin",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wind speed unit tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindSpeedUnit {
    /// Metres per second
    #[default]
    #[serde(rename = "ms")]
    MetersPerSecond,
    /// Kilometres per hour
    #[serde(rename = "kmh")]
    KilometersPerHour,
    /// Miles per hour
    #[serde(rename = "mph")]
    MilesPerHour,
}

impl WindSpeedUnit {
    /// Convert a value in this unit to metres per second
    pub fn to_meters_per_second(self, value: f64) -> f64 {
        match self {
            WindSpeedUnit::MetersPerSecond => value,
            WindSpeedUnit::KilometersPerHour => value / KMH_PER_MS,
            WindSpeedUnit::MilesPerHour => value * MS_PER_MPH,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindSpeedUnit::MetersPerSecond => "ms",
            WindSpeedUnit::KilometersPerHour => "kmh",
            WindSpeedUnit::MilesPerHour => "mph",
        }
    }
}

impl fmt::Display for WindSpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
