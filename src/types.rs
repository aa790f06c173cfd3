use crate::consts::DATE_SEPARATOR;
use crate::prelude::*;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A calendar date in the `YYYY-MM-DD` interchange form.
///
/// Month and day are stored as given by the parser that produced them,
/// so a value such as `2025-13-40` is representable. Use
/// [`CanonicalDate::resolve`] to find the UTC calendar day it denotes.
///
/// Ordering compares `(year, month, day)` numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}-{:02}-{:02}", "year", "month", "day")]
pub struct CanonicalDate {
    year: i32,
    month: u32,
    day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid canonical date: {_0} (expected YYYY-MM-DD)")]
    InvalidFormat(String),
    #[display(fmt = "Date component out of range: {_0}")]
    OutOfRange(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CanonicalDate {
    /// Creates a date from raw components without any calendar check
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    pub const fn day(&self) -> u32 {
        self.day
    }

    /// The UTC calendar day this value denotes.
    ///
    /// Components overflow the way UTC calendar arithmetic does: month 13
    /// is January of the next year, month 0 is December of the previous
    /// one, day 0 is the last day of the previous month and days past the
    /// end of a month carry into the following months.
    ///
    /// Returns `None` if the result falls outside the representable calendar.
    pub fn resolve(&self) -> Option<NaiveDate> {
        let months = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let year = i32::try_from(months.div_euclid(12)).ok()?;
        let month = u32::try_from(months.rem_euclid(12)).ok()? + 1;
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;

        match self.day {
            0 => first.checked_sub_days(Days::new(1)),
            day => first.checked_add_days(Days::new(u64::from(day) - 1)),
        }
    }

    /// Whether the stored components already name a real calendar day
    pub fn is_calendar_valid(&self) -> bool {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).is_some()
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl FromStr for CanonicalDate {
    type Err = ParseError;

    /// Parses the exact form produced by `Display`.
    ///
    /// Shape is strict (three non-empty digit fields joined by `-`), values
    /// are not range checked.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month, day] = *parts.as_slice() else {
            return Err(ParseError::InvalidFormat(trimmed.to_owned()));
        };

        let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if !(all_digits(year) && all_digits(month) && all_digits(day)) {
            return Err(ParseError::InvalidFormat(trimmed.to_owned()));
        }

        let out_of_range = |_: std::num::ParseIntError| ParseError::OutOfRange(trimmed.to_owned());
        Ok(Self::new(
            year.parse().map_err(out_of_range)?,
            month.parse().map_err(out_of_range)?,
            day.parse().map_err(out_of_range)?,
        ))
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CanonicalDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("test date must be valid")
    }

    #[test]
    fn test_display_pads_month_and_day() {
        assert_eq!(CanonicalDate::new(2025, 1, 5).to_string(), "2025-01-05");
        assert_eq!(CanonicalDate::new(2025, 12, 31).to_string(), "2025-12-31");
    }

    #[test]
    fn test_display_keeps_oversized_components() {
        assert_eq!(CanonicalDate::new(2025, 13, 99).to_string(), "2025-13-99");
        assert_eq!(CanonicalDate::new(2025, 1, 100).to_string(), "2025-01-100");
    }

    #[test]
    fn test_display_does_not_pad_year() {
        assert_eq!(CanonicalDate::new(25, 1, 5).to_string(), "25-01-05");
    }

    #[test]
    fn test_from_str() {
        let date: CanonicalDate = "2025-01-05".parse().expect("canonical date should parse");
        assert_eq!(date, CanonicalDate::new(2025, 1, 5));
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 5);
    }

    #[test]
    fn test_from_str_accepts_unchecked_values() {
        let date: CanonicalDate = "2025-13-99".parse().expect("shape is valid");
        assert_eq!(date, CanonicalDate::new(2025, 13, 99));
        assert!(!date.is_calendar_valid());
    }

    #[test]
    fn test_from_str_rejects_bad_shapes() {
        assert_eq!("".parse::<CanonicalDate>(), Err(ParseError::EmptyInput));
        assert_eq!("   ".parse::<CanonicalDate>(), Err(ParseError::EmptyInput));

        for bad in ["2025/01/05", "2025-01", "2025-01-05-01", "2025--05", "2025-0a-05", "+2025-01-05"] {
            assert!(
                matches!(bad.parse::<CanonicalDate>(), Err(ParseError::InvalidFormat(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_str_out_of_range() {
        let result = "99999999999-01-01".parse::<CanonicalDate>();
        assert!(matches!(result, Err(ParseError::OutOfRange(_))));
    }

    #[test]
    fn test_display_parse_agree() {
        let date = CanonicalDate::new(1991, 8, 15);
        assert_eq!(date.to_string().parse::<CanonicalDate>(), Ok(date));
    }

    #[test]
    fn test_ordering() {
        let a = CanonicalDate::new(2024, 12, 31);
        let b = CanonicalDate::new(2025, 1, 1);
        let c = CanonicalDate::new(2025, 1, 2);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_resolve_valid_date() {
        assert_eq!(CanonicalDate::new(2024, 2, 29).resolve(), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn test_resolve_overflow_cases() {
        struct TestCase {
            date: CanonicalDate,
            expected: NaiveDate,
            description: &'static str,
        }

        let cases = [
            TestCase {
                date: CanonicalDate::new(2025, 1, 32),
                expected: ymd(2025, 2, 1),
                description: "day past end of month",
            },
            TestCase {
                date: CanonicalDate::new(2025, 1, 99),
                expected: ymd(2025, 4, 9),
                description: "day spanning several months",
            },
            TestCase {
                date: CanonicalDate::new(2025, 13, 1),
                expected: ymd(2026, 1, 1),
                description: "month 13",
            },
            TestCase {
                date: CanonicalDate::new(2025, 0, 1),
                expected: ymd(2024, 12, 1),
                description: "month 0",
            },
            TestCase {
                date: CanonicalDate::new(2025, 3, 0),
                expected: ymd(2025, 2, 28),
                description: "day 0",
            },
            TestCase {
                date: CanonicalDate::new(2023, 2, 29),
                expected: ymd(2023, 3, 1),
                description: "Feb 29 in a common year",
            },
            TestCase {
                date: CanonicalDate::new(2025, 4, 31),
                expected: ymd(2025, 5, 1),
                description: "April 31",
            },
        ];

        for case in &cases {
            assert_eq!(
                case.date.resolve(),
                Some(case.expected),
                "{} ({})",
                case.date,
                case.description
            );
        }
    }

    #[test]
    fn test_resolve_unrepresentable() {
        assert_eq!(CanonicalDate::new(i32::MAX, 12, 31).resolve(), None);
    }

    #[test]
    fn test_from_naive_date() {
        assert_eq!(CanonicalDate::from(ymd(2000, 2, 29)), CanonicalDate::new(2000, 2, 29));
    }

    #[test]
    fn test_serde_string_format() {
        let date = CanonicalDate::new(2025, 1, 5);
        let json = serde_json::to_string(&date).expect("failed to serialize date");
        assert_eq!(json, r#""2025-01-05""#);

        let parsed: CanonicalDate = serde_json::from_str(&json).expect("failed to deserialize date");
        assert_eq!(date, parsed);
    }

    #[test]
    fn test_serde_rejects_non_canonical() {
        let result: Result<CanonicalDate, _> = serde_json::from_str(r#""2025/01/05""#);
        assert!(result.is_err());
    }
}
