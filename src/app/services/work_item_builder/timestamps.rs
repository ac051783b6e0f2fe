//! Timestamp normalization
//!
//! Jira exports dates in several shapes depending on locale settings and
//! export path. Everything that parses is converted to a single ISO-8601 UTC
//! form with millisecond precision, e.g. `2024-01-02T00:00:00.000Z`.
//!
//! Values without an offset are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Output format for normalized timestamps
const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Local date-time layouts, tried in order
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    // Jira export format, e.g. `02/Jan/24 10:15 AM`
    "%d/%b/%y %I:%M %p",
    "%d/%b/%Y %I:%M %p",
];

/// Date-time layouts carrying a numeric offset
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parse a date or date-time string into UTC
///
/// Returns `None` for empty or unrecognised input.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(text, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

/// Format a UTC timestamp in the canonical output form
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(OUTPUT_FORMAT).to_string()
}

/// Parse and re-format a timestamp, `None` when the input is empty or invalid
pub fn normalize_timestamp(text: &str) -> Option<String> {
    parse_timestamp(text).map(|timestamp| format_timestamp(&timestamp))
}
