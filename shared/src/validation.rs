//! Validation utilities for the R4C robot factory

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use validator::{ValidationError, ValidationErrors};

/// Field name to error messages, as returned to API clients
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Date-time layouts accepted for the `created` field
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a robot production timestamp.
///
/// A bare date is read as midnight. RFC 3339 input keeps its wall-clock
/// time and drops the offset.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// `validator` hook for timestamp fields
pub fn validate_timestamp(value: &str) -> Result<(), ValidationError> {
    if parse_timestamp(value).is_some() {
        return Ok(());
    }
    let mut error = ValidationError::new("timestamp");
    error.message = Some(Cow::from("Enter a valid date/time."));
    error.add_param(Cow::from("value"), &value);
    Err(error)
}

/// Flatten `validator` output into a field to messages map
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| error.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Validate a customer email address (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err("Invalid email format"),
    }
}
