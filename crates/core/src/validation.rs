//! Field-level validation helpers shared by the record payloads.
//!
//! Each helper returns [`CoreError::Validation`] with a message naming the
//! offending field, so handlers can surface it verbatim as a 400.

use chrono::NaiveDate;
use validator::ValidateEmail;

use crate::error::CoreError;

/// Require a non-blank text value.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Validate an optional email address. `None` and blank strings pass.
pub fn validate_email(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value.map(str::trim) {
        Some(email) if !email.is_empty() && !email.validate_email() => Err(
            CoreError::Validation(format!("{field} must be a valid email address")),
        ),
        _ => Ok(()),
    }
}

/// Require `end` to be on or after `start`.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
    if end < start {
        Err(CoreError::Validation(format!(
            "end_date ({end}) must not be before start_date ({start})"
        )))
    } else {
        Ok(())
    }
}

/// Reject negative monetary amounts.
pub fn validate_non_negative(field: &str, value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(amount) if amount.is_nan() || amount < 0.0 => Err(CoreError::Validation(
            format!("{field} must be a non-negative number"),
        )),
        _ => Ok(()),
    }
}

/// Reject negative counts.
pub fn validate_non_negative_count(field: &str, value: Option<i32>) -> Result<(), CoreError> {
    match value {
        Some(count) if count < 0 => Err(CoreError::Validation(format!(
            "{field} must not be negative"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_matches!(require_text("regno", "  "), Err(CoreError::Validation(msg)) if msg == "regno is required");
        assert!(require_text("regno", "21CS001").is_ok());
    }

    #[test]
    fn email_checks_only_present_values() {
        assert!(validate_email("tutor_email", None).is_ok());
        assert!(validate_email("tutor_email", Some("")).is_ok());
        assert!(validate_email("tutor_email", Some("tutor@x.edu")).is_ok());
        assert!(validate_email("tutor_email", Some("not-an-email")).is_err());
    }

    #[test]
    fn date_range_allows_same_day() {
        assert!(validate_date_range(date(2024, 6, 1), date(2024, 6, 1)).is_ok());
        assert!(validate_date_range(date(2024, 6, 2), date(2024, 6, 1)).is_err());
    }

    #[test]
    fn negative_amounts_fail() {
        assert!(validate_non_negative("stipend_amount", None).is_ok());
        assert!(validate_non_negative("stipend_amount", Some(0.0)).is_ok());
        assert!(validate_non_negative("stipend_amount", Some(-1.0)).is_err());
        assert!(validate_non_negative("stipend_amount", Some(f64::NAN)).is_err());
        assert!(validate_non_negative_count("participants", Some(-3)).is_err());
    }
}
