//! Validation of caller-supplied arguments
//!
//! Query parameters arrive as raw strings. They are parsed here so that a bad
//! category, month or date is rejected with a validation error before any
//! scoring happens.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{Month, TemperatureCategory};

/// Date format accepted for by-date queries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a required temperature category
pub fn parse_category(raw: Option<&str>) -> EngineResult<TemperatureCategory> {
    match raw.map(str::trim) {
        None | Some("") => Err(EngineError::validation("category", "Category is required")),
        Some(value) => value.parse(),
    }
}

/// Parse a required calendar date in `YYYY-MM-DD` form
pub fn parse_date(raw: Option<&str>) -> EngineResult<NaiveDate> {
    let value = match raw.map(str::trim) {
        None | Some("") => return Err(EngineError::validation("date", "Date is required")),
        Some(value) => value,
    };

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        EngineError::validation(
            "date",
            format!("Invalid date '{}'. Expected format YYYY-MM-DD", value),
        )
    })
}

/// Parse an optional month number, falling back to `default` when absent
pub fn parse_month(raw: Option<&str>, default: Month) -> EngineResult<Month> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => {
            let number: u32 = value.parse().map_err(|_| {
                EngineError::validation("month", format!("Invalid month '{}'", value))
            })?;
            Month::from_number(number)
        }
    }
}

/// Parse a `;`-separated list of month numbers (e.g. "6;7;8"). Empty input
/// is an empty list.
pub fn parse_month_list(raw: &str) -> EngineResult<Vec<Month>> {
    raw.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let number: u32 = part.parse().map_err(|_| {
                EngineError::validation("month", format!("Invalid month '{}'", part))
            })?;
            Month::from_number(number)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category(Some("cold")).unwrap(), TemperatureCategory::Cold);
        assert!(parse_category(None).is_err());
        assert!(parse_category(Some("  ")).is_err());
        assert!(parse_category(Some("warm")).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2026-10-19")).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
        );
        assert!(parse_date(None).is_err());
        assert!(parse_date(Some("19/10/2026")).is_err());
        assert!(parse_date(Some("2026-02-30")).is_err());
    }

    #[test]
    fn test_parse_month_defaults_when_absent() {
        assert_eq!(parse_month(None, Month::May).unwrap(), Month::May);
        assert_eq!(parse_month(Some(""), Month::May).unwrap(), Month::May);
        assert_eq!(parse_month(Some("12"), Month::May).unwrap(), Month::December);
        assert!(parse_month(Some("0"), Month::May).is_err());
        assert!(parse_month(Some("july"), Month::May).is_err());
    }

    #[test]
    fn test_parse_month_list() {
        assert_eq!(
            parse_month_list("6; 7;8").unwrap(),
            vec![Month::June, Month::July, Month::August]
        );
        assert!(parse_month_list("").unwrap().is_empty());
        assert!(parse_month_list("1;13").is_err());
    }

    #[test]
    fn test_validation_errors_name_the_field() {
        match parse_date(Some("tomorrow")) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "date"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
