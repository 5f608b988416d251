//! OpenWeatherMap Client
//!
//! Fetches current conditions for a coordinate and maps the provider's field
//! names onto a [`RawReading`]. Requests use the provider's standard units
//! (Kelvin, m/s, hPa), so no conversion happens here.

use crate::error::ProviderError;
use crate::WeatherSource;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use weather_normalizer::{RawReading, TemperatureUnit, WindSpeedUnit};

/// Default timeout for provider requests
const DEFAULT_TIMEOUT_MS: u64 = 5000;
/// Public OpenWeatherMap endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const PROVIDER_NAME: &str = "openweather";
/// Longest body excerpt kept in error messages
const MAX_BODY_EXCERPT: usize = 200;

/// Provider client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Scheme and host, without a trailing path
    pub base_url: String,
    /// OpenWeatherMap `appid`
    pub api_key: Option<String>,
    /// Request timeout (milliseconds)
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Client for the OpenWeatherMap current-weather API
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    config: ProviderConfig,
}

impl OpenWeatherClient {
    /// Create a new client; fails only if the HTTP client cannot be built
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        info!(
            "Creating OpenWeather client for {} (timeout {}ms)",
            config.base_url, config.timeout_ms
        );

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn current_weather_url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            CURRENT_WEATHER_PATH
        )
    }

    async fn request_current(&self, api_key: &str, lat: f64, lon: f64) -> Result<String, ProviderError> {
        let url = self.current_weather_url();
        debug!("Querying {} for ({}, {})", url, lat, lon);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", api_key.to_string()),
            ])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: truncate_body(&body),
            });
        }

        Ok(body)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.config.timeout_ms)
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn is_configured(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<RawReading, ProviderError> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(ProviderError::NotConfigured(PROVIDER_NAME)),
        };

        let result = match self.request_current(api_key, lat, lon).await {
            Ok(body) => parse_current_response(&body),
            Err(e) => Err(e),
        };

        let outcome = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(
            "weather_provider_requests_total",
            "provider" => PROVIDER_NAME,
            "outcome" => outcome
        )
        .increment(1);

        if let Err(e) = &result {
            warn!("OpenWeather request failed: {}", e);
        }
        result
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: Option<f64>,
    #[serde(default)]
    pressure: Option<f64>,
    humidity: i64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    coord: OwCoord,
    #[serde(default)]
    weather: Vec<OwWeather>,
    main: OwMain,
    wind: OwWind,
    dt: i64,
    #[serde(default)]
    sys: OwSys,
    #[serde(default)]
    name: Option<String>,
}

/// Map an OpenWeatherMap current-weather body to a raw reading
pub fn parse_current_response(body: &str) -> Result<RawReading, ProviderError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::InvalidResponse(format!("malformed JSON: {}", e)))?;

    let timestamp = DateTime::from_timestamp(parsed.dt, 0).ok_or_else(|| {
        ProviderError::InvalidResponse(format!("observation time {} out of range", parsed.dt))
    })?;

    let city = parsed.name.filter(|name| !name.is_empty());
    let country_code = parsed.sys.country.filter(|code| !code.is_empty());

    let mut reading = RawReading::new(
        parsed.main.temp,
        TemperatureUnit::Kelvin,
        parsed.wind.speed,
        WindSpeedUnit::MetersPerSecond,
        parsed.main.humidity,
        parsed.coord.lat,
        parsed.coord.lon,
        timestamp,
    )
    .with_place(city, country_code);

    reading.pressure = parsed.main.pressure;
    reading.feels_like = parsed.main.feels_like;
    // Due north is reported as 360
    reading.wind_direction = parsed.wind.deg.map(|deg| deg.rem_euclid(360.0));
    reading.weather_code = parsed.weather.into_iter().next().map(|w| w.main);

    Ok(reading)
}

fn truncate_body(body: &str) -> String {
    if body.len() > MAX_BODY_EXCERPT {
        let mut end = MAX_BODY_EXCERPT;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
