//! Lenient date parsing for API records.
//!
//! The API is not consistent about how it renders dates. A `date` column
//! may come back as `"2025-03-01"` or, when the server casts it, as a full
//! timestamp like `"2025-03-01T00:00:00.000000Z"`. Timestamps may be RFC 3339
//! or the database's `"2025-03-01 18:30:00"` form. These helpers accept all
//! of them so that a formatting change on the server does not turn every
//! list call into a decode error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    parse_datetime(raw).map(|dt| dt.date_naive())
}

pub(crate) fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    // A bare date means midnight UTC.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// `#[serde(deserialize_with = "...")]` target for required dates.
pub(crate) fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("unrecognized date: {raw:?}"))
    })
}

/// `#[serde(deserialize_with = "...")]` target for optional timestamps.
///
/// `null`, a missing field, and an empty string all map to `None`.
pub(crate) fn optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_datetime(text).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("unrecognized timestamp: {text:?}"))
        }),
    }
}
