//! Date labels for tables, charts, and the entry form.
//!
//! Timestamps are epoch seconds and are rendered in UTC.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{Result, SdkError};

fn to_datetime(timestamp: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp, 0)
}

/// `"15 Jan 2025"` -- two-digit day, short month, full year.
pub fn format_date(timestamp: i64) -> String {
    match to_datetime(timestamp) {
        Some(dt) => dt.format("%d %b %Y").to_string(),
        None => timestamp.to_string(),
    }
}

/// `"Jan 5, 2024"` -- medium date style, no time component.
pub fn format_medium_date(timestamp: i64) -> String {
    match to_datetime(timestamp) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => timestamp.to_string(),
    }
}

/// `"2024-01-05"`, the value of a date input.
pub fn format_date_for_input(timestamp: i64) -> String {
    match to_datetime(timestamp) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// Parse a `YYYY-MM-DD` date input to epoch seconds at midnight UTC.
pub fn parse_input_date(input: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| SdkError::InvalidArgument(format!("Invalid date '{}': {}", input, e)))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| SdkError::InvalidArgument(format!("Invalid date '{}'", input)))?;
    Ok(midnight.and_utc().timestamp())
}

/// Current time as epoch seconds.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}
