//! Numeric normalization utilities.

use ica_model::NumericFormat;

/// Outcome of parsing one locale-formatted cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocaleNumber {
    /// `NaN`.
    Missing,
    Value(f64),
    /// Not a number after separator rewriting, blank strings included.
    Invalid,
}

/// Parses a locale-formatted string such as `1.234,56` into an `f64`.
///
/// The thousands separator (if any) is removed, the decimal separator is
/// replaced by `.` and surrounding whitespace is trimmed before parsing.
/// A blank string is not a number; null cells never reach this function.
pub fn parse_locale_f64(raw: &str, format: &NumericFormat) -> LocaleNumber {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return LocaleNumber::Invalid;
    }
    match format.normalize(trimmed).parse::<f64>() {
        Ok(value) if value.is_nan() => LocaleNumber::Missing,
        Ok(value) => LocaleNumber::Value(value),
        Err(_) => LocaleNumber::Invalid,
    }
}

/// Parses a string as i64, returning None for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<i64>().ok()
}

/// Converts a float to i64 when it holds a whole number in range.
pub fn whole_f64_to_i64(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e18 {
        Some(value as i64)
    } else {
        None
    }
}
