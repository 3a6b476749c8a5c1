//! Time-of-day and calendar-date normalization.
//!
//! Schedule records arrive from the repository as plain text fields written
//! by humans and import tooling, so times show up as `"9:5"`, `"09:05"`, or
//! `"09:05:00"` interchangeably. Everything downstream of this module works
//! on parsed [`NaiveTime`]/[`NaiveDate`] values — parsing happens once, at
//! the ingestion boundary, and the resolver never branches on string shape.
//!
//! All values are naive local wall-clock times already normalized to a
//! single zone; this crate performs no timezone conversion.

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::entry::Weekday;
use crate::error::TimetableError;

/// Canonicalize a time-of-day string to `HH:MM:SS`.
///
/// Accepts `HH:MM` or `HH:MM:SS`; single-digit components are zero-padded
/// and a missing seconds component becomes `00`.
///
/// # Errors
///
/// Returns [`TimetableError::MalformedTime`] if the input is not 2–3
/// colon-separated numeric components in range.
///
/// # Examples
///
/// ```
/// use timetable_engine::normalize::normalize;
///
/// assert_eq!(normalize("9:5").unwrap(), "09:05:00");
/// assert_eq!(normalize("09:05:30").unwrap(), "09:05:30");
/// ```
pub fn normalize(time: &str) -> Result<String, TimetableError> {
    let t = parse_time(time)?;
    Ok(t.format("%H:%M:%S").to_string())
}

/// Parse a time-of-day string into a [`NaiveTime`].
///
/// The typed form backing [`normalize`]; the same grammar applies.
///
/// # Errors
///
/// Returns [`TimetableError::MalformedTime`] if the input is not 2–3
/// colon-separated numeric components in range.
pub fn parse_time(time: &str) -> Result<NaiveTime, TimetableError> {
    let trimmed = time.trim();
    if trimmed.is_empty() {
        return Err(TimetableError::MalformedTime("empty time string".to_string()));
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(TimetableError::MalformedTime(format!(
            "expected HH:MM or HH:MM:SS, got '{trimmed}'"
        )));
    }

    let mut components = [0u32; 3];
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimetableError::MalformedTime(format!(
                "non-numeric component '{part}' in '{trimmed}'"
            )));
        }
        components[i] = part.parse().map_err(|_| {
            TimetableError::MalformedTime(format!("invalid number '{part}' in '{trimmed}'"))
        })?;
    }

    let [hour, minute, second] = components;
    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
        TimetableError::MalformedTime(format!("component out of range in '{trimmed}'"))
    })
}

/// Parse a calendar date string (`YYYY-MM-DD`) into a [`NaiveDate`].
///
/// # Errors
///
/// Returns [`TimetableError::MalformedDate`] if the input is not a valid
/// ISO 8601 calendar date.
pub fn parse_date(date: &str) -> Result<NaiveDate, TimetableError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| TimetableError::MalformedDate(format!("'{}': {}", date.trim(), e)))
}

/// The weekday code of a calendar date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use timetable_engine::entry::Weekday;
/// use timetable_engine::normalize::weekday_of;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// assert_eq!(weekday_of(date), Weekday::Mon);
/// ```
pub fn weekday_of(date: NaiveDate) -> Weekday {
    Weekday::from(date.weekday())
}

// ── serde helpers ───────────────────────────────────────────────────────────

/// serde adapter for [`NaiveTime`] fields on repository records.
///
/// Serializes as canonical `HH:MM:SS`; deserializes through [`parse_time`],
/// so `"8:30"` and `"08:30:00"` both ingest.
pub mod lenient_time {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::parse_time;

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse_time(&raw).map_err(de::Error::custom)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
