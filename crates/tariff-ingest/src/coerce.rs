//! Cell coercion for the typed tariff columns.
//!
//! Unparseable values become `None`; they never fail the load.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// Parses a rate cell, returning None for empty, non-numeric, or NaN values.
pub fn parse_rate(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Parses a date cell. Accepts date-only forms and date-times (the time is
/// dropped). Returns None for anything else.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|dt| dt.date())
        })
}

static SOURCE_YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20[12][0-9]").expect("valid year regex"));

/// Extracts the first year in 2010..=2029 from a file name.
pub fn source_year_from_name(name: &str) -> Option<i32> {
    SOURCE_YEAR_REGEX
        .find(name)
        .and_then(|m| m.as_str().parse::<i32>().ok())
}
