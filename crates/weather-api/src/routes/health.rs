//! Health Routes

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Liveness response
#[derive(Debug, Serialize)]
pub struct LiveResponse {
    pub status: &'static str,
}

/// Readiness response
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub details: ReadyDetails,
    pub version: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct ReadyDetails {
    pub provider: &'static str,
    pub external_weather_api_reachable: bool,
    pub timestamp_utc: DateTime<Utc>,
}

/// Process is up
pub async fn live() -> Json<LiveResponse> {
    Json(LiveResponse { status: "ok" })
}

/// Process can serve requests. Normalization needs no collaborator, so this
/// always reports ready; provider availability is reported in the details.
pub async fn ready(State(state): State<Arc<AppState>>) -> Json<ReadyResponse> {
    Json(ReadyResponse {
        status: "ready",
        details: ReadyDetails {
            provider: state.provider.name(),
            external_weather_api_reachable: state.provider.is_configured(),
            timestamp_utc: Utc::now(),
        },
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
