//! Validation utilities shared by request handling and reporting

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use thiserror::Error;
use validator::ValidationError;

// ============================================================================
// Dates
// ============================================================================

/// A date that is not in ISO-8601 form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid date format. Please use ISO date format (YYYY-MM-DD).")]
pub struct InvalidDate {
    pub input: String,
}

impl InvalidDate {
    fn of(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Parse an ISO-8601 calendar date.
///
/// Accepts `YYYY-MM-DD` and full date-times (`YYYY-MM-DDTHH:MM:SS`, with or
/// without fractional seconds or an offset); the time part is dropped.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, InvalidDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(input)
        .map(|datetime| datetime.date_naive())
        .map_err(|_| InvalidDate::of(input))
}

/// Parse `YYYY-MM` into the first day of that month
pub fn parse_month(input: &str) -> Result<NaiveDate, InvalidDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(&format!("{input}-01"), "%Y-%m-%d").map_err(|_| InvalidDate::of(input))
}

// ============================================================================
// Request fields
// ============================================================================

/// Reject names that are empty once trimmed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Exclusive upper bound of a `NUMERIC(12,2)` money column
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// Prices and sale amounts: non-negative and small enough to store
pub fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative"));
    }
    if *value >= MAX_AMOUNT {
        return Err(ValidationError::new("out_of_range"));
    }
    Ok(())
}
