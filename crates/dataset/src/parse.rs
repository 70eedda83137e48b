//! Field-level parsers. Each returns a human-readable reason on failure; the
//! loader attaches row and column context.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parses a calendar date. Timestamps are accepted and truncated to their date.
pub(crate) fn date(raw: &str) -> Result<NaiveDate, String> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(datetime.date());
        }
    }
    Err("expected a calendar date such as 2024-01-31".to_string())
}

/// Parses a non-negative integer count. Integral decimals like `12.0` are accepted.
pub(crate) fn count(raw: &str) -> Result<u64, String> {
    if let Ok(value) = raw.parse::<u64>() {
        return Ok(value);
    }
    let value = Decimal::from_str(raw).map_err(|_| "expected a non-negative integer".to_string())?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err("must not be negative".to_string());
    }
    if !value.fract().is_zero() {
        return Err("expected a whole number".to_string());
    }
    value
        .trunc()
        .to_u64()
        .ok_or_else(|| "value out of range".to_string())
}

/// Parses a decimal that must be zero or greater.
pub(crate) fn non_negative_decimal(raw: &str) -> Result<Decimal, String> {
    let value = Decimal::from_str(raw).map_err(|_| "expected a decimal number".to_string())?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err("must not be negative".to_string());
    }
    Ok(value)
}

/// Parses a decimal that must be strictly greater than zero.
pub(crate) fn positive_decimal(raw: &str) -> Result<Decimal, String> {
    let value = Decimal::from_str(raw).map_err(|_| "expected a decimal number".to_string())?;
    if value <= Decimal::ZERO {
        return Err("must be greater than zero".to_string());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn dates_accept_plain_and_timestamp_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(date("2024-01-02"), Ok(expected));
        assert_eq!(date("2024/01/02"), Ok(expected));
        assert_eq!(date("2024-01-02 00:00:00"), Ok(expected));
        assert_eq!(date("2024-01-02T13:45:00"), Ok(expected));
        assert!(date("02-01-2024x").is_err());
        assert!(date("2024-02-30").is_err());
    }

    #[test]
    fn counts_reject_negative_and_fractional_values() {
        assert_eq!(count("12"), Ok(12));
        assert_eq!(count("12.0"), Ok(12));
        assert_eq!(count("0"), Ok(0));
        assert!(count("-3").is_err());
        assert!(count("2.5").is_err());
        assert!(count("many").is_err());
    }

    #[test]
    fn decimals_enforce_sign_rules() {
        assert_eq!(non_negative_decimal("0"), Ok(Decimal::ZERO));
        assert_eq!(non_negative_decimal("33.50"), Ok(dec!(33.50)));
        assert!(non_negative_decimal("-0.01").is_err());
        assert_eq!(positive_decimal("2.0"), Ok(dec!(2.0)));
        assert!(positive_decimal("0").is_err());
        assert!(positive_decimal("abc").is_err());
    }
}
