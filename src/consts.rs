/// Smallest month accepted by the compact `YYYYMMDD` form
pub const MIN_MONTH: u32 = 1;
/// Largest month accepted by the compact `YYYYMMDD` form
pub const MAX_MONTH: u32 = 12;

/// Smallest day accepted by the compact `YYYYMMDD` form
pub const MIN_DAY: u32 = 1;
/// Largest day accepted by the compact `YYYYMMDD` form (no per-month check)
pub const MAX_DAY: u32 = 31;

/// Number of digits in the compact `YYYYMMDD` form
pub const COMPACT_DIGITS: usize = 8;
/// Digits taken by the year in the compact form
pub(crate) const COMPACT_YEAR_DIGITS: usize = 4;
/// Digits taken by the month in the compact form
pub(crate) const COMPACT_MONTH_DIGITS: usize = 2;

/// Separator used when rendering a canonical date
pub const DATE_SEPARATOR: char = '-';

/// Separators accepted between year, month and day in free-form input
pub const COMPONENT_SEPARATORS: [char; 3] = ['/', '-', '.'];

/// ASCII range marker, every other range marker is rewritten to this one
pub const RANGE_MARKER: char = '~';

/// Characters treated as range markers.
///
/// ASCII `-` is deliberately absent: it separates date components.
pub const RANGE_MARKERS: [char; 5] = [
    '~',        // ASCII tilde
    '\u{301C}', // wave dash
    '\u{FF5E}', // fullwidth tilde
    '\u{2013}', // en dash
    '\u{2014}', // em dash
];

/// Separators between independent date entries
pub const ENTRY_SEPARATORS: [char; 5] = [
    ',',        // comma
    ';',        // semicolon
    '\u{FF1B}', // fullwidth semicolon
    '\u{3001}', // ideographic comma
    '\n',
];

/// Naive datetime layouts tried by the written-form fallback
pub(crate) const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// English written date layouts tried by the written-form fallback.
/// `%B` also accepts abbreviated month names when parsing.
pub(crate) const WRITTEN_FORMATS: [&str; 6] = [
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%a %B %d %Y",
    "%a, %B %d, %Y",
];

/// Rows returned by a meeting page when no limit is given
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Most dates a single [`crate::MeetingLog::record`] call may insert, about
/// ten years of days
pub const DEFAULT_MAX_DATES_PER_RECORD: usize = 3660;

/// Prefix of environment variables read by [`crate::Settings::load`]
pub const ENV_PREFIX: &str = "MEETING_DAYS";
