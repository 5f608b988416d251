//! HTTP Route Handlers

pub mod batch;
pub mod health;
pub mod metrics;
pub mod weather;

use weather_normalizer::NormalizationOutcome;

/// Count one normalization by outcome
pub(crate) fn record_outcome(outcome: &NormalizationOutcome) {
    let label = match outcome {
        Ok(_) => "ok",
        Err(_) => "validation_error",
    };
    ::metrics::counter!("weather_normalizations_total", "outcome" => label).increment(1);
}
