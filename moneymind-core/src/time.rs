//! Date normalization: every stored date ends up as a calendar date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::error::{Result, StatsError};

/// Parse a stored date into a calendar date.
///
/// Accepted shapes:
/// - `2024-01-15`
/// - RFC 3339 timestamps (`2024-01-15T23:30:00Z`), converted into `tz` first
/// - naive timestamps (`2024-01-15T23:30:00`, `2024-01-15 23:30:00`), taken as local
///
/// `id` is the owning transaction, for errors.
pub fn parse_date(raw: &str, tz: Tz, id: &str) -> Result<NaiveDate> {
    let s = raw.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&tz).date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ndt.date());
        }
    }

    Err(StatsError::InvalidDate {
        id: id.to_string(),
        value: raw.to_string(),
    })
}

/// Parse an IANA timezone name like "Europe/Berlin".
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse().ok()
}
