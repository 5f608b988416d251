//! Weather Provider Client
//!
//! Obtains current observations from an external provider and hands them to
//! the normalizer as [`RawReading`]s. Transport failures surface as
//! [`ProviderError`] before normalization is ever invoked.

mod client;
mod error;
mod mock;

pub use client::{parse_current_response, OpenWeatherClient, ProviderConfig, DEFAULT_BASE_URL};
pub use error::ProviderError;
pub use mock::MockWeatherSource;

use async_trait::async_trait;
use std::fmt::Debug;
use weather_normalizer::RawReading;

/// Source of live weather readings
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Short provider identifier used in logs and metrics
    fn name(&self) -> &'static str;

    /// Whether the source has what it needs (e.g. an API key) to serve requests
    fn is_configured(&self) -> bool;

    /// Fetch the current observation closest to a coordinate
    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<RawReading, ProviderError>;
}
