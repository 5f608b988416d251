//! Batch Normalization Route

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use weather_normalizer::{
    CanonicalWeather, NormalizationFailure, NormalizationOutcome, RawReading, Source,
    ValidationError,
};

use super::record_outcome;
use crate::boundary::{json_rejection, parse_reading};
use crate::error::ApiError;
use crate::AppState;

/// Batch request body
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub items: Vec<BatchItem>,
}

/// One keyed reading; the reading is parsed per item so a malformed item
/// fails alone
#[derive(Debug, Deserialize)]
pub struct BatchItem {
    /// Caller-supplied key, echoed back unchanged (string, number, ...)
    pub id: serde_json::Value,
    pub reading: serde_json::Value,
}

/// Per-item result; exactly one of `data` and `error` is set
#[derive(Debug, Serialize)]
pub struct BatchItemResult {
    pub id: serde_json::Value,
    pub data: Option<CanonicalWeather>,
    pub error: Option<String>,
}

impl BatchItemResult {
    fn new(id: serde_json::Value, outcome: NormalizationOutcome) -> Self {
        match outcome {
            Ok(weather) => Self {
                id,
                data: Some(weather),
                error: None,
            },
            Err(failure) => Self {
                id,
                data: None,
                error: Some(failure.to_string()),
            },
        }
    }
}

/// Response for the batch endpoint
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchItemResult>,
    pub succeeded: usize,
    pub failed: usize,
}

/// Normalize a batch of keyed readings
pub async fn normalize_batch(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, ApiError> {
    let Json(request) = payload.map_err(json_rejection)?;

    let max_items = state.batch.max_items;
    if request.items.len() > max_items {
        return Err(ValidationError::InvalidFormat {
            field: "items".to_string(),
            reason: format!(
                "batch of {} items exceeds the limit of {}",
                request.items.len(),
                max_items
            ),
        }
        .into());
    }

    let count = request.items.len();
    let mut ids = Vec::with_capacity(count);
    let mut slots: Vec<Option<NormalizationOutcome>> = Vec::with_capacity(count);
    let mut readings: Vec<(usize, RawReading)> = Vec::with_capacity(count);

    for (index, item) in request.items.into_iter().enumerate() {
        ids.push(item.id);
        match parse_reading(item.reading) {
            Ok(raw) => {
                readings.push((index, raw));
                slots.push(None);
            }
            Err(failure) => slots.push(Some(Err(failure))),
        }
    }

    let parallel = readings.len() >= state.batch.parallel_threshold;
    let outcomes = if parallel {
        state.normalizer.normalize_batch_parallel(readings, &Source::CLIENT)
    } else {
        state.normalizer.normalize_batch(readings, &Source::CLIENT)
    };
    for (index, outcome) in outcomes {
        slots[index] = Some(outcome);
    }

    let results: Vec<BatchItemResult> = ids
        .into_iter()
        .zip(slots)
        .map(|(id, slot)| {
            // Every slot holds either a parse failure or a normalizer outcome
            let outcome = slot.unwrap_or_else(|| {
                Err(NormalizationFailure::from(ValidationError::MissingField(
                    "reading".to_string(),
                )))
            });
            record_outcome(&outcome);
            BatchItemResult::new(id, outcome)
        })
        .collect();

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    info!(
        parallel,
        "Batch of {} readings normalized ({} failed)",
        results.len(),
        failed
    );

    Ok(Json(BatchResponse {
        succeeded: results.len() - failed,
        failed,
        results,
    }))
}
