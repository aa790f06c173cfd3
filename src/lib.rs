//! Free-form meeting date parsing.
//!
//! Users type dates the way they think of them: `20250101`, `2025/1/5`,
//! `2025-01-03~2025-01-05`, several at once separated by commas or
//! spaces. This crate turns that text into an ordered, de-duplicated list
//! of [`CanonicalDate`]s and keeps a small per-day meeting log on top.
//!
//! The three parsing operations are pure and infallible: input that cannot
//! be read as a date is left out of the result rather than reported.

mod config;
mod consts;
mod input;
mod meetings;
mod prelude;
mod range;
mod types;
mod written;

pub use config::{ConfigError, Settings};
pub use consts::*;
pub use input::parse_input_to_dates;
pub use meetings::{InsertReport, LogError, Meeting, MeetingLog, MeetingPage, MeetingStore, MemoryStore, StoreError};
pub use range::expand;
pub use types::{CanonicalDate, ParseError};

use consts::{COMPACT_MONTH_DIGITS, COMPACT_YEAR_DIGITS};

/// Converts one date-like string into a [`CanonicalDate`].
///
/// Tried in order, first match wins:
///
/// 1. Compact: if stripping every non-digit leaves exactly eight digits they
///    are read as `YYYYMMDD`. Month must be 1-12 and day 1-31, otherwise the
///    next reading is tried.
/// 2. Separated: the input split on `/`, `-` or `.` into exactly three
///    non-empty numeric parts, read as year, month, day in that order. The
///    values are not range checked.
/// 3. Written: RFC 3339 / RFC 2822 timestamps, naive ISO datetimes and
///    English written dates such as `January 5, 2025`.
///
/// Returns `None` for empty or unreadable input.
pub fn normalize(raw: &str) -> Option<CanonicalDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    let compact = (digits.len() == COMPACT_DIGITS)
        .then(|| parse_compact(&digits))
        .flatten();

    compact.or_else(|| parse_separated(trimmed)).or_else(|| {
        let date = written::parse_written(trimmed)?;
        tracing::debug!(input = trimmed, %date, "parsed written date");
        Some(CanonicalDate::from(date))
    })
}

/// `YYYYMMDD`, already reduced to exactly eight ASCII digits
fn parse_compact(digits: &str) -> Option<CanonicalDate> {
    let (year, rest) = digits.split_at(COMPACT_YEAR_DIGITS);
    let (month, day) = rest.split_at(COMPACT_MONTH_DIGITS);

    let year = year.parse::<i32>().ok()?;
    let month = month.parse::<u32>().ok()?;
    let day = day.parse::<u32>().ok()?;

    if !(MIN_MONTH..=MAX_MONTH).contains(&month) || !(MIN_DAY..=MAX_DAY).contains(&day) {
        tracing::trace!(digits, month, day, "compact date out of range");
        return None;
    }
    Some(CanonicalDate::new(year, month, day))
}

/// `year<sep>month<sep>day` with any of [`COMPONENT_SEPARATORS`]
fn parse_separated(s: &str) -> Option<CanonicalDate> {
    let parts: Vec<&str> = s
        .split(COMPONENT_SEPARATORS)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let [year, month, day] = parts.as_slice() else {
        return None;
    };

    Some(CanonicalDate::new(
        year.parse().ok()?,
        month.parse().ok()?,
        day.parse().ok()?,
    ))
}
