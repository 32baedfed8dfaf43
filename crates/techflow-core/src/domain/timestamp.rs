//! Lenient timestamp parsing for server-assigned dates.
//!
//! The API mixes full RFC 3339 instants (`createdAt`) with bare calendar
//! dates (`dueDate`). Anything unparseable maps to `None` so a single bad
//! field never fails a whole list response.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Parse an RFC 3339 instant, an offset-less ISO datetime, or a bare
/// `YYYY-MM-DD` date (midnight UTC).
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    parse_with_offset(raw).map(|at| at.with_timezone(&Utc))
}

/// Like [`parse`], but keeps the sender's offset so the calendar date
/// reads the same as on the wire. Offset-less values are taken as UTC.
pub fn parse_with_offset(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// `deserialize_with` adapter for optional timestamp fields.
pub fn lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse))
}

/// `deserialize_with` adapter for calendar-date fields such as `dueDate`.
pub fn lenient_local<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_with_offset))
}
