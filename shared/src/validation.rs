//! Validation utilities for prediction requests
//!
//! Quantities and dates are checked here before any adjustment step runs.

use chrono::{DateTime, NaiveDate};

use crate::error::RequestError;

// ============================================================================
// Quantity Validations
// ============================================================================

/// A quantity must be finite and strictly positive to take part in density math
pub fn validate_positive_quantity(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Quantity must be a finite number");
    }
    if value <= 0.0 {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

// ============================================================================
// Date Validations
// ============================================================================

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_calendar_date(field: &'static str, value: &str) -> Result<NaiveDate, RequestError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_| RequestError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// A supplier expiry that precedes manufacture yields a non-positive shelf span
pub fn expiry_precedes_manufacture(manufacture: NaiveDate, expiry: Option<NaiveDate>) -> bool {
    expiry.map(|e| e < manufacture).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_quantity() {
        assert!(validate_positive_quantity(1.0).is_ok());
        assert!(validate_positive_quantity(0.001).is_ok());
        assert!(validate_positive_quantity(0.0).is_err());
        assert!(validate_positive_quantity(-5.0).is_err());
        assert!(validate_positive_quantity(f64::NAN).is_err());
        assert!(validate_positive_quantity(f64::INFINITY).is_err());
    }

    #[test]
    fn test_parse_calendar_date_plain() {
        let date = parse_calendar_date("manufactureDate", "2025-01-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_calendar_date_timestamp() {
        let date = parse_calendar_date("expiryDate", "2026-01-15T10:30:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_calendar_date_invalid() {
        let err = parse_calendar_date("manufactureDate", "15/01/2025").unwrap_err();
        assert_eq!(err.field(), "manufactureDate");
        assert!(matches!(err, RequestError::InvalidDate { .. }));
    }

    #[test]
    fn test_expiry_precedes_manufacture() {
        let m = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert!(expiry_precedes_manufacture(m, NaiveDate::from_ymd_opt(2025, 2, 1)));
        assert!(!expiry_precedes_manufacture(m, NaiveDate::from_ymd_opt(2025, 3, 1)));
        assert!(!expiry_precedes_manufacture(m, None));
    }
}
