//! Date/time helpers for GlobalSign `xs:dateTime` values
//!
//! - Requests: `DateTime<Utc>` -> `2024-01-31T00:00:00.000+00:00`
//! - Responses: RFC3339 with any offset, or a bare local timestamp treated as UTC

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Formats a timestamp the way the query service expects `FromDate` / `ToDate`.
pub fn format_vendor_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, false)
}

/// Parses a timestamp returned by GlobalSign.
///
/// Returns `None` for empty or unrecognized values; order dates are informational and a
/// malformed one should not fail the whole response.
pub fn parse_vendor_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    // Without an offset
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}
