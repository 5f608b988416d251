//! Single-Reading Routes

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};
use weather_normalizer::{CanonicalWeather, RawReading, Source};

use super::record_outcome;
use crate::boundary::{json_rejection, query_rejection};
use crate::error::ApiError;
use crate::AppState;

/// Query parameters for the normalize endpoint
#[derive(Debug, Deserialize)]
pub struct NormalizeQuery {
    /// Provenance tag for the record (default `raw_input`)
    pub source: Option<String>,
}

/// Query parameters for the live-fetch endpoint
#[derive(Debug, Deserialize)]
pub struct CurrentQuery {
    pub lat: f64,
    pub lon: f64,
}

/// Normalize a caller-submitted reading
pub async fn normalize_reading(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NormalizeQuery>, QueryRejection>,
    payload: Result<Json<RawReading>, JsonRejection>,
) -> Result<Json<CanonicalWeather>, ApiError> {
    let Query(params) = query.map_err(query_rejection)?;
    let Json(raw) = payload.map_err(json_rejection)?;
    let source = params
        .source
        .filter(|tag| !tag.trim().is_empty())
        .map(Source::new)
        .unwrap_or(Source::RAW_INPUT);

    let outcome = state.normalizer.normalize(&raw, source);
    record_outcome(&outcome);
    Ok(Json(outcome?))
}

/// Fetch the current observation from the provider and normalize it
pub async fn current_weather(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CurrentQuery>, QueryRejection>,
) -> Result<Json<CanonicalWeather>, ApiError> {
    let Query(CurrentQuery { lat, lon }) = query.map_err(query_rejection)?;

    // Out-of-range coordinates are a client error, not worth a provider call
    let validator = state.normalizer.validator();
    validator.validate_latitude(lat)?;
    validator.validate_longitude(lon)?;

    info!("Fetching current weather from {} for ({}, {})", state.provider.name(), lat, lon);
    let raw = state.provider.fetch_current(lat, lon).await?;
    debug!("Provider reading: {:?}", raw);

    let outcome = state.normalizer.normalize(&raw, Source::EXTERNAL_API);
    record_outcome(&outcome);
    Ok(Json(outcome?))
}
