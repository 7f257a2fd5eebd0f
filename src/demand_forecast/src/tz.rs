//! Timestamp parsing and the calendar-day rule.
//!
//! What this module provides:
//! - [`parse_ts_to_utc`]: Parse RFC-3339 timestamps with an explicit offset and convert to UTC.
//! - [`parse_stored_ts`]: Lenient parser for values read back from the store. Accepts RFC-3339,
//!   or SQLite's `YYYY-MM-DD HH:MM:SS[.fff]` text which is taken to be UTC.
//! - [`utc_day`]: Truncate an instant to its UTC calendar day.
//! - [`to_rfc3339_millis`]: Canonical text form written to the store.
//!
//! Notes:
//! - Purchases are grouped by **UTC** calendar day. The host's local time zone never
//!   participates.
//! - A purchase at 23:30 at -05:00 belongs to the *next* UTC day.
//!
//! Examples
//! - "2024-03-10T09:30:00-05:00" -> "2024-03-10T14:30:00Z" -> day 2024-03-10
//! - "2024-03-10T23:30:00-05:00" -> "2024-03-11T04:30:00Z" -> day 2024-03-11

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// RFC-3339 with offset -> UTC.
///
/// Example:
/// - "2024-03-10T09:30:00-05:00" -> "2024-03-10T14:30:00Z"
pub fn parse_ts_to_utc(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let dt = DateTime::parse_from_rfc3339(s).with_context(|| format!("bad rfc3339: {s}"))?;
    Ok(dt.with_timezone(&Utc))
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a timestamp read from the store.
///
/// RFC-3339 values keep their offset. Naive values (no offset) are interpreted as UTC.
pub fn parse_stored_ts(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = parse_ts_to_utc(s) {
        return Ok(dt);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
        .with_context(|| format!("unrecognized timestamp: {s}"))
}

/// UTC calendar day of an instant (time of day discarded).
pub fn utc_day(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Format a UTC datetime as an RFC-3339 string with millisecond precision.
pub fn to_rfc3339_millis(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
