//! Date formatting for labels and request parameters.

use chrono::{NaiveDate, NaiveDateTime};

/// Datetime format the backend expects in query strings.
pub const API_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// `Mon, Jan 6, 2025`
pub fn format_session_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// `9:00 AM`
pub fn format_time(at: NaiveDateTime) -> String {
    at.format("%-I:%M %p").to_string()
}

/// `9:00 AM – 9:30 AM`
pub fn format_time_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} – {}", format_time(start), format_time(end))
}

/// `2025-01-06`
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
