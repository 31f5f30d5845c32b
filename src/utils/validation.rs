use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};
use crate::errors::{AppError, FieldErrors};
use crate::utils::time::parse_activity_date;

lazy_static! {
    /// `HH:MM`, 24-hour clock.
    pub static ref CLOCK_TIME: Regex = Regex::new(r"^([0-1]\d|2[0-3]):([0-5]\d)$").unwrap();
}

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|err| AppError::Validation(field_errors(&err)))
}

/// Flattens validator output into `{ "fieldName": ["message", ...] }`, with
/// field names converted to the camelCase the JSON payload uses.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| match &e.message {
                Some(msg) => msg.to_string(),
                None => e.code.to_string(),
            })
            .collect();
        fields.insert(to_camel_case(field), messages);
    }
    fields
}

pub fn validate_activity_date(date: &str) -> Result<(), ValidationError> {
    if parse_activity_date(date).is_none() {
        let mut err = ValidationError::new("invalid_date");
        err.message = Some(Cow::from("Invalid date format"));
        return Err(err);
    }
    Ok(())
}

/// Blank is allowed; anything else must be `HH:MM`.
pub fn validate_clock_time(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || CLOCK_TIME.is_match(value) {
        return Ok(());
    }
    let mut err = ValidationError::new("invalid_time");
    err.message = Some(Cow::from("Invalid time format, expected HH:MM"));
    Err(err)
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_cases_field_names() {
        assert_eq!(to_camel_case("understanding_level"), "understandingLevel");
        assert_eq!(to_camel_case("date"), "date");
        assert_eq!(to_camel_case("start_time"), "startTime");
    }

    #[test]
    fn clock_time_pattern() {
        assert!(CLOCK_TIME.is_match("00:00"));
        assert!(CLOCK_TIME.is_match("23:59"));
        assert!(!CLOCK_TIME.is_match("24:00"));
        assert!(!CLOCK_TIME.is_match("9:30"));
        assert!(!CLOCK_TIME.is_match("12:60"));
    }

    #[test]
    fn rejects_unparsable_date() {
        let err = validate_activity_date("yesterday").unwrap_err();
        assert_eq!(err.code, "invalid_date");
        assert!(validate_activity_date("2024-12-31").is_ok());
    }

    #[test]
    fn clock_time_may_be_blank() {
        assert!(validate_clock_time("").is_ok());
        assert!(validate_clock_time("18:45").is_ok());
        assert_eq!(validate_clock_time("6pm").unwrap_err().code, "invalid_time");
    }
}
