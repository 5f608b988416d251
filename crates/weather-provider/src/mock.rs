//! Mock Weather Source
//!
//! Deterministic readings without network access, for tests and local runs.

use crate::error::ProviderError;
use crate::WeatherSource;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use weather_normalizer::{RawReading, TemperatureUnit, WindSpeedUnit};

/// Weather source that answers every request from a fixed template
#[derive(Debug, Clone)]
pub struct MockWeatherSource {
    template: RawReading,
    /// Returned instead of a reading when set
    failure: Option<ProviderError>,
    /// Pin the observation time; `None` stamps each reading with now
    fixed_time: Option<DateTime<Utc>>,
}

impl MockWeatherSource {
    /// Create a mock source returning tropical afternoon conditions
    pub fn new() -> Self {
        info!("Creating mock weather source");
        let template = RawReading::new(
            302.15,
            TemperatureUnit::Kelvin,
            15.0,
            WindSpeedUnit::KilometersPerHour,
            75,
            1.3521,
            103.8198,
            Utc::now(),
        )
        .with_pressure(1007.0)
        .with_weather_code("Clouds");

        Self {
            template,
            failure: None,
            fixed_time: None,
        }
    }

    /// Mock source returning `template` for every coordinate
    pub fn with_reading(template: RawReading) -> Self {
        Self {
            fixed_time: Some(template.timestamp),
            template,
            failure: None,
        }
    }

    /// Mock source that always fails with `error`
    pub fn failing(error: ProviderError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }
}

impl Default for MockWeatherSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherSource for MockWeatherSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<RawReading, ProviderError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        debug!("Mock fetch for ({}, {})", lat, lon);
        let mut reading = self.template.clone();
        reading.lat = lat;
        reading.lon = lon;
        reading.timestamp = self.fixed_time.unwrap_or_else(Utc::now);
        Ok(reading)
    }
}
