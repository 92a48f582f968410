//! Number and date formatting

use crate::{FormatError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt::Write;

/// Largest supported number of fraction digits
const MAX_FRACTION_DIGITS: u8 = 6;

/// Format a number with thousands separators, for display only
///
/// Rounds to at most `max_fraction_digits` decimals and drops trailing
/// zeros, so whole amounts print without a fraction.
///
/// # Examples
/// ```
/// use doc_format::format_grouped;
/// assert_eq!(format_grouped(1000.0, 2), "1,000");
/// assert_eq!(format_grouped(2500.5, 2), "2,500.5");
/// assert_eq!(format_grouped(0.125, 2), "0.13");
/// ```
pub fn format_grouped(n: f64, max_fraction_digits: u8) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let mut digits = max_fraction_digits.min(MAX_FRACTION_DIGITS);
    let mut scaled = (n.abs() * 10_f64.powi(digits as i32)).round();
    if scaled.is_infinite() {
        digits = 0;
        scaled = n.abs().round();
    }

    // `scaled` is integral, so this prints its exact digits at any magnitude
    let all_digits = format!("{:0>width$.0}", scaled, width = digits as usize + 1);
    let (int_digits, frac_digits) = all_digits.split_at(all_digits.len() - digits as usize);

    let int_str = group_digits(int_digits, ',');
    let frac_str = frac_digits.trim_end_matches('0');

    let sign = if n < 0.0 && scaled != 0.0 { "-" } else { "" };

    if frac_str.is_empty() {
        format!("{sign}{int_str}")
    } else {
        format!("{sign}{int_str}.{frac_str}")
    }
}

/// Insert `sep` between groups of three digits
fn group_digits(digits: &str, sep: char) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }

    result
}

/// Parse a quotation date
///
/// Accepts RFC 3339 timestamps (as produced by JSON serializers), naive
/// `YYYY-MM-DDTHH:MM:SS` timestamps and plain `YYYY-MM-DD` dates.
pub fn parse_quote_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime.date());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| FormatError::InvalidDate(text.to_string()))
}

/// Check that a strftime pattern can format a calendar date
///
/// Rejects unknown specifiers and specifiers that need a time of day or an
/// offset (`%H`, `%M`, `%z`, ...), which a date alone cannot supply.
pub fn check_date_pattern(pattern: &str) -> Result<()> {
    let invalid = || FormatError::InvalidPattern(pattern.to_string());

    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let sample = NaiveDate::from_ymd_opt(2000, 1, 1).ok_or_else(invalid)?;
    let mut out = String::new();
    write!(out, "{}", sample.format(pattern)).map_err(|_| invalid())?;
    Ok(())
}

/// Format a quotation date with a strftime pattern
///
/// Text that is not a recognizable date, or a pattern the date cannot be
/// formatted with, returns the text unchanged, so free-form dates entered
/// upstream still print.
///
/// # Examples
/// ```
/// use doc_format::format_quote_date;
/// assert_eq!(format_quote_date("2025-01-22", "%d %b %Y"), "22 Jan 2025");
/// assert_eq!(format_quote_date("next week", "%d %b %Y"), "next week");
/// ```
pub fn format_quote_date(text: &str, pattern: &str) -> String {
    let Ok(date) = parse_quote_date(text) else {
        return text.to_string();
    };

    let mut out = String::new();
    match write!(out, "{}", date.format(pattern)) {
        Ok(()) => out,
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_grouped_whole_numbers() {
        assert_eq!(format_grouped(0.0, 2), "0");
        assert_eq!(format_grouped(999.0, 2), "999");
        assert_eq!(format_grouped(1000.0, 2), "1,000");
        assert_eq!(format_grouped(1234567.0, 2), "1,234,567");
    }

    #[test]
    fn test_format_grouped_fractions() {
        assert_eq!(format_grouped(1234.56, 2), "1,234.56");
        assert_eq!(format_grouped(2500.5, 2), "2,500.5");
        assert_eq!(format_grouped(0.1 + 0.2, 2), "0.3");
        assert_eq!(format_grouped(19.999, 2), "20");
    }

    #[test]
    fn test_format_grouped_digit_limit() {
        assert_eq!(format_grouped(1.23456, 0), "1");
        assert_eq!(format_grouped(1.23456, 3), "1.235");
        assert_eq!(format_grouped(1.123456789, 12), "1.123457");
    }

    #[test]
    fn test_format_grouped_negative() {
        assert_eq!(format_grouped(-1500.25, 2), "-1,500.25");
        assert_eq!(format_grouped(-0.001, 2), "0");
    }

    #[test]
    fn test_format_grouped_special() {
        assert_eq!(format_grouped(f64::NAN, 2), "NaN");
        assert_eq!(format_grouped(f64::INFINITY, 2), "∞");
        assert_eq!(format_grouped(f64::NEG_INFINITY, 2), "-∞");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1000", ','), "1,000");
        assert_eq!(group_digits("1000000", ','), "1,000,000");
        assert_eq!(group_digits("100", ','), "100");
        assert_eq!(group_digits("12345", ' '), "12 345");
    }

    #[test]
    fn test_format_grouped_beyond_u64() {
        assert_eq!(format_grouped(1e20, 2), "100,000,000,000,000,000,000");
        assert_eq!(format_grouped(-2e19, 0), "-20,000,000,000,000,000,000");
        assert!(format_grouped(f64::MAX, 2).starts_with("179,769,313"));
    }

    #[test]
    fn test_parse_quote_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();
        assert_eq!(parse_quote_date("2025-01-22").unwrap(), expected);
        assert_eq!(parse_quote_date("2025-01-22T10:30:00Z").unwrap(), expected);
        assert_eq!(
            parse_quote_date("2025-01-22T10:30:00.000+03:00").unwrap(),
            expected
        );
        assert_eq!(parse_quote_date("2025-01-22T10:30:00").unwrap(), expected);
        assert_eq!(parse_quote_date(" 2025-01-22 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_quote_date_invalid() {
        assert!(parse_quote_date("2025-13-01").is_err());
        assert!(parse_quote_date("").is_err());
        assert!(matches!(
            parse_quote_date("22/01/2025"),
            Err(FormatError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_format_quote_date() {
        assert_eq!(format_quote_date("2025-01-22", "%d %b %Y"), "22 Jan 2025");
        assert_eq!(format_quote_date("2025-01-22", "%Y/%m/%d"), "2025/01/22");
        assert_eq!(
            format_quote_date("2024-12-05T08:00:00.000Z", "%d %B %Y"),
            "05 December 2024"
        );
    }

    #[test]
    fn test_format_quote_date_passthrough() {
        assert_eq!(format_quote_date("TBD", "%d %b %Y"), "TBD");
        assert_eq!(format_quote_date("", "%d %b %Y"), "");
    }

    #[test]
    fn test_format_quote_date_unformattable_pattern() {
        assert_eq!(format_quote_date("2025-01-22", "%d %b %Y %H:%M"), "2025-01-22");
        assert_eq!(format_quote_date("2025-01-22", "%Q"), "2025-01-22");
    }

    #[test]
    fn test_check_date_pattern() {
        assert!(check_date_pattern("%d %b %Y").is_ok());
        assert!(check_date_pattern("%Y-%m-%d").is_ok());
        assert!(check_date_pattern("Issued %A, %e %B").is_ok());

        for pattern in ["%d %b %Y %H:%M", "%z", "%Q", "%"] {
            assert!(
                matches!(check_date_pattern(pattern), Err(FormatError::InvalidPattern(_))),
                "{pattern} accepted"
            );
        }
    }
}
