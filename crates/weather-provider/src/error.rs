//! Provider Error Types

use thiserror::Error;
use weather_normalizer::ErrorKind;

/// Errors that can occur while fetching from the weather provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No API key configured
    #[error("Weather provider '{0}' is not configured (missing API key)")]
    NotConfigured(&'static str),

    /// Timeout waiting for the provider
    #[error("Timeout waiting for weather provider after {0}ms")]
    Timeout(u64),

    /// Connection or request error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("Provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Body could not be mapped to a reading
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Error taxonomy kind reported to API clients
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::Timeout(_) => ErrorKind::UpstreamTimeout,
            _ => ErrorKind::UpstreamError,
        }
    }
}
