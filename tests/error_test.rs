//! Tests for error types

use trailmark::{Error, InputField};

#[test]
fn test_validation_error_lists_fields() {
    let error = Error::Validation {
        fields: vec![InputField::Distance, InputField::Cadence],
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid input: distance, cadence"));
    assert!(error_str.contains("positive numbers"));
    assert_eq!(
        error.invalid_fields(),
        &[InputField::Distance, InputField::Cadence]
    );
}

#[test]
fn test_deserialization_error() {
    let error = Error::Deserialization("slot is not a JSON array".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Deserialization error"));
    assert!(error_str.contains("JSON array"));
    assert!(error.invalid_fields().is_empty());
}

#[test]
fn test_unknown_kind_error() {
    let error = Error::UnknownKind("skiing".to_string());
    assert_eq!(format!("{error}"), "Unknown workout kind: \"skiing\"");
}

#[test]
fn test_storage_unavailable_error() {
    let error = Error::StorageUnavailable("disk full".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Storage unavailable: disk full"));
    assert!(error_str.contains("kept in memory"));
}

#[test]
fn test_location_unavailable_error() {
    let error = Error::LocationUnavailable;
    assert!(format!("{error}").contains("no reference coordinates"));
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<u32>("nope").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").starts_with("JSON error"));
}

#[test]
fn test_input_field_display() {
    assert_eq!(InputField::ElevationGain.to_string(), "elevation gain");
    assert_eq!(InputField::Kind.to_string(), "kind");
}

#[test]
fn test_result_type_alias_error() {
    fn returns_error() -> trailmark::Result<i32> {
        Err(Error::LocationUnavailable)
    }

    let result = returns_error();
    assert!(result.is_err());
}
