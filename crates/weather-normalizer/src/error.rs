//! Validation Error Types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors during weather reading validation.
///
/// Every message starts with the offending field name so that a failure
/// renders as `"<field>: <reason>"`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value outside an inclusive range
    #[error("{field}: value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Value outside a range whose upper bound is exclusive
    #[error("{field}: value {value} is out of range [{min}, {max})")]
    OutOfHalfOpenRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite value
    #[error("{field}: value {value} is not a finite number")]
    NotFinite { field: &'static str, value: f64 },

    /// Invalid data format
    #[error("{field}: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Missing required field
    #[error("{0}: field required")]
    MissingField(String),
}

impl ValidationError {
    /// Name of the field the error refers to
    pub fn field(&self) -> &str {
        match self {
            ValidationError::OutOfRange { field, .. }
            | ValidationError::OutOfHalfOpenRange { field, .. }
            | ValidationError::NotFinite { field, .. } => *field,
            ValidationError::InvalidFormat { field, .. } => field.as_str(),
            ValidationError::MissingField(field) => field.as_str(),
        }
    }
}

/// Error taxonomy shared by the core and its collaborators.
///
/// Only [`ErrorKind::Validation`] originates from normalization; the upstream
/// kinds are produced by the provider client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
    #[serde(rename = "UPSTREAM_TIMEOUT")]
    UpstreamTimeout,
    #[serde(rename = "UPSTREAM_ERROR")]
    UpstreamError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            ErrorKind::UpstreamError => "UPSTREAM_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed failure half of a normalization outcome.
///
/// Renders as `"<ERROR_KIND>: <field>: <reason>"`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {error}")]
pub struct NormalizationFailure {
    pub kind: ErrorKind,
    #[source]
    pub error: ValidationError,
}

impl NormalizationFailure {
    /// Human-readable `"<field>: <reason>"` message, without the kind prefix
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// Field the failure refers to
    pub fn field(&self) -> &str {
        self.error.field()
    }
}

impl From<ValidationError> for NormalizationFailure {
    fn from(error: ValidationError) -> Self {
        Self {
            kind: ErrorKind::Validation,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message_names_field_value_and_bounds() {
        let err = ValidationError::OutOfRange {
            field: "humidity_percent",
            value: 150.0,
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(
            err.to_string(),
            "humidity_percent: value 150 is out of range [0, 100]"
        );
        assert_eq!(err.field(), "humidity_percent");
    }

    #[test]
    fn test_half_open_range_message() {
        let err = ValidationError::OutOfHalfOpenRange {
            field: "wind_direction_deg",
            value: 360.0,
            min: 0.0,
            max: 360.0,
        };
        assert_eq!(
            err.to_string(),
            "wind_direction_deg: value 360 is out of range [0, 360)"
        );
    }

    #[test]
    fn test_failure_display_has_kind_prefix() {
        let failure = NormalizationFailure::from(ValidationError::MissingField(
            "temperature".to_string(),
        ));
        assert_eq!(failure.kind, ErrorKind::Validation);
        assert_eq!(failure.message(), "temperature: field required");
        assert_eq!(
            failure.to_string(),
            "VALIDATION_ERROR: temperature: field required"
        );
    }

    #[test]
    fn test_error_kind_serializes_as_wire_name() {
        let json = serde_json::to_string(&ErrorKind::UpstreamTimeout).unwrap();
        assert_eq!(json, "\"UPSTREAM_TIMEOUT\"");
    }
}
