//! Last-resort parsing of timestamps and English written dates.
//!
//! Only a fixed list of layouts is recognised so the result never depends
//! on the host locale or timezone. Time of day and offsets are dropped;
//! the date is taken as written in the string's own offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::consts::{DATETIME_FORMATS, WRITTEN_FORMATS};

/// Parses `s` with the fallback layouts, first match wins.
pub(crate) fn parse_written(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            WRITTEN_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}
