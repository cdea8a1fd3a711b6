//! Display formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const UNKNOWN_DATE: &str = "Unknown date";

/// Long-form US date, e.g. `"January 5, 2024"`.
///
/// Accepts RFC 3339 timestamps (shown in UTC), plain `YYYY-MM-DD` dates and
/// `YYYY-MM-DDTHH:MM:SS` datetimes. Anything else yields [`UNKNOWN_DATE`].
pub fn format_date(input: &str) -> String {
    match parse_date(input.trim()) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => UNKNOWN_DATE.to_string(),
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }

    if let Ok(datetime) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime.date());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}
