//! Request Boundary Parsing
//!
//! Structural validation of incoming JSON: unknown unit tags, missing
//! required fields and wrong types are turned into `VALIDATION_ERROR`
//! failures here, before any reading reaches the normalizer.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use weather_normalizer::{NormalizationFailure, RawReading, ValidationError};

const MISSING_FIELD_MARKER: &str = "missing field `";

/// Parse one reading from an already-decoded JSON value
pub fn parse_reading(value: serde_json::Value) -> Result<RawReading, NormalizationFailure> {
    serde_json::from_value(value).map_err(|e| structural_error("reading", &e.to_string()).into())
}

/// Convert a rejected JSON body into a validation failure
pub fn json_rejection(rejection: JsonRejection) -> NormalizationFailure {
    structural_error("body", &rejection.body_text()).into()
}

/// Convert a rejected query string into a validation failure
pub fn query_rejection(rejection: QueryRejection) -> NormalizationFailure {
    structural_error("query", &rejection.body_text()).into()
}

fn structural_error(scope: &str, message: &str) -> ValidationError {
    match missing_field(message) {
        Some(field) => ValidationError::MissingField(field.to_string()),
        None => ValidationError::InvalidFormat {
            field: scope.to_string(),
            reason: message.to_string(),
        },
    }
}

/// Extract the field name from a serde "missing field `x`" message
fn missing_field(message: &str) -> Option<&str> {
    let start = message.find(MISSING_FIELD_MARKER)? + MISSING_FIELD_MARKER.len();
    let len = message[start..].find('`')?;
    Some(&message[start..start + len])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> serde_json::Value {
        json!({
            "temperature": 20.0,
            "wind_speed": 3.0,
            "humidity": 40,
            "lat": 0.0,
            "lon": 0.0,
            "timestamp": "2025-01-01T00:00:00Z"
        })
    }

    #[test]
    fn test_parse_valid_reading() {
        assert!(parse_reading(valid()).is_ok());
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut value = valid();
        value.as_object_mut().unwrap().remove("lat");
        let failure = parse_reading(value).unwrap_err();
        assert_eq!(failure.field(), "lat");
        assert_eq!(failure.to_string(), "VALIDATION_ERROR: lat: field required");
    }

    #[test]
    fn test_unknown_unit_tag() {
        let mut value = valid();
        value["temp_unit"] = json!("rankine");
        let failure = parse_reading(value).unwrap_err();
        assert_eq!(failure.field(), "reading");
        assert!(failure.message().contains("rankine"));
    }

    #[test]
    fn test_bad_timestamp() {
        let mut value = valid();
        value["timestamp"] = json!("not a time");
        let failure = parse_reading(value).unwrap_err();
        assert!(failure.message().contains("timestamp"));
    }

    #[test]
    fn test_missing_field_extraction() {
        assert_eq!(
            missing_field("Failed to deserialize: missing field `humidity` at line 1 column 2"),
            Some("humidity")
        );
        assert_eq!(missing_field("invalid type: string"), None);
    }
}
