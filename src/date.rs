//! Conversion between `MM/DD/YYYY` entry text and canonical UTC instants.
//!
//! Stored dates are ISO 8601 instants at UTC midnight with a literal `Z`
//! (`2022-04-25T00:00:00Z`). Entry text is always read as a calendar date in
//! UTC, never in the local timezone, so a date entered west of UTC is not
//! shifted to the previous day.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

use crate::error::{AppError, Result};

/// Display and entry format.
pub const DISPLAY_FORMAT: &str = "%m/%d/%Y";

/// Convert `MM/DD/YYYY` entry text into an ISO instant string.
pub fn encode(raw: &str) -> Result<String> {
    let date = parse_display(raw).ok_or_else(|| AppError::invalid_date(raw.trim()))?;
    Ok(to_instant(date))
}

/// Convert a stored ISO instant into `MM/DD/YYYY` display text.
pub fn decode(iso: &str) -> Result<String> {
    let date = parse_instant(iso).ok_or_else(|| AppError::invalid_date(iso.trim()))?;
    Ok(date.format(DISPLAY_FORMAT).to_string())
}

/// Parse `MM/DD/YYYY` (or `MM-DD-YYYY`) entry text into a calendar date.
pub fn parse_display(raw: &str) -> Option<NaiveDate> {
    let normalized = raw.trim().replace('-', "/");

    // `%Y` alone would take `95` as the year 95.
    let year = normalized.rsplit('/').next()?;
    let four_digits = year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit());
    if normalized.matches('/').count() != 2 || !four_digits {
        return None;
    }

    let date = NaiveDate::parse_from_str(&normalized, DISPLAY_FORMAT).ok()?;
    (1..=9999).contains(&date.year()).then_some(date)
}

/// Render a calendar date as an ISO instant at UTC midnight.
pub fn to_instant(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Read the UTC calendar date of a stored instant.
///
/// Offsets other than `Z` are converted to UTC first. Instants without an
/// offset, and bare `YYYY-MM-DD` dates, are taken as UTC.
pub fn parse_instant(iso: &str) -> Option<NaiveDate> {
    let iso = iso.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").ok()
}
