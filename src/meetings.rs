//! Per-day meeting log built on top of the date parser.
//!
//! Persistence lives behind [`MeetingStore`]. The store owns the
//! "one meeting per day" rule: [`MeetingStore::insert_if_absent`] must check
//! and insert atomically so concurrent submissions of the same day cannot
//! both succeed.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_DATES_PER_RECORD, DEFAULT_PAGE_SIZE};
use crate::input::parse_input_within;
use crate::{normalize, CanonicalDate, ConfigError, Settings};

/// One logged meeting. Dates are unique within a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: u64,
    pub date: CanonicalDate,
    pub note: String,
}

/// Outcome of [`MeetingLog::record`]: new rows, and dates that already had one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InsertReport {
    pub inserted: Vec<Meeting>,
    pub skipped: Vec<CanonicalDate>,
}

/// A page of meetings, newest first, with the total row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingPage {
    pub rows: Vec<Meeting>,
    pub total: usize,
}

/// Error type for meeting store backends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A writer panicked while holding the store lock.
    #[error("Meeting store lock poisoned")]
    Poisoned,

    /// Backend-specific failure.
    #[error("Meeting store error: {0}")]
    Backend(String),
}

/// Error type for meeting log operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// Input held no readable date at all.
    #[error("No valid dates parsed from input")]
    NoValidDates,

    /// A single date was required and could not be read.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Input expands to more dates than one call may record.
    #[error("Input expands to more than {0} dates")]
    TooManyDates(usize),

    /// No meeting has the given id.
    #[error("Meeting not found: {0}")]
    NotFound(u64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Storage for meetings, keyed by date.
pub trait MeetingStore: Send + Sync {
    /// Inserts a meeting for `date` unless one exists.
    ///
    /// Returns the new row, or `None` if the date was already taken. The
    /// check and the insert must be a single atomic step.
    fn insert_if_absent(&self, date: CanonicalDate, note: &str) -> Result<Option<Meeting>, StoreError>;

    /// Meetings ordered by date descending, then id descending.
    fn page(&self, limit: usize, offset: usize) -> Result<Vec<Meeting>, StoreError>;

    fn count(&self) -> Result<usize, StoreError>;

    /// Date of the oldest meeting by resolved calendar day.
    ///
    /// Stored dates may be unchecked (`2025-01-99` is 2025-04-09), so this is
    /// not the smallest key. Dates that do not resolve sort after every
    /// resolvable one, and among themselves by component order.
    fn earliest(&self) -> Result<Option<CanonicalDate>, StoreError>;

    /// Returns `false` if no meeting has `id`.
    fn update_note(&self, id: u64, note: &str) -> Result<bool, StoreError>;

    /// Returns `false` if no meeting has `id`.
    fn remove(&self, id: u64) -> Result<bool, StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory [`MeetingStore`] guarded by a single mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    last_id: u64,
    by_date: BTreeMap<CanonicalDate, Meeting>,
    dates_by_id: HashMap<u64, CanonicalDate>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryInner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl MeetingStore for MemoryStore {
    fn insert_if_absent(&self, date: CanonicalDate, note: &str) -> Result<Option<Meeting>, StoreError> {
        let mut inner = self.lock()?;
        if inner.by_date.contains_key(&date) {
            return Ok(None);
        }

        inner.last_id += 1;
        let meeting = Meeting {
            id: inner.last_id,
            date,
            note: note.to_owned(),
        };
        inner.dates_by_id.insert(meeting.id, date);
        inner.by_date.insert(date, meeting.clone());
        Ok(Some(meeting))
    }

    fn page(&self, limit: usize, offset: usize) -> Result<Vec<Meeting>, StoreError> {
        // one row per date, so date order alone settles the id tiebreak
        Ok(self
            .lock()?
            .by_date
            .values()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.by_date.len())
    }

    fn earliest(&self) -> Result<Option<CanonicalDate>, StoreError> {
        let inner = self.lock()?;
        let earliest = inner.by_date.keys().min_by_key(|date| {
            let resolved = date.resolve();
            (resolved.is_none(), resolved, **date)
        });
        Ok(earliest.copied())
    }

    fn update_note(&self, id: u64, note: &str) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        let Some(date) = inner.dates_by_id.get(&id).copied() else {
            return Ok(false);
        };
        let Some(meeting) = inner.by_date.get_mut(&date) else {
            return Ok(false);
        };
        meeting.note = note.to_owned();
        Ok(true)
    }

    fn remove(&self, id: u64) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        let Some(date) = inner.dates_by_id.remove(&id) else {
            return Ok(false);
        };
        Ok(inner.by_date.remove(&date).is_some())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.by_date.clear();
        inner.dates_by_id.clear();
        Ok(())
    }
}

/// Meeting log operations over a [`MeetingStore`].
#[derive(Debug)]
pub struct MeetingLog<S> {
    store: S,
    first_meeting: Option<CanonicalDate>,
    page_size: usize,
    max_dates_per_record: usize,
}

impl<S: MeetingStore> MeetingLog<S> {
    pub const fn new(store: S) -> Self {
        Self {
            store,
            first_meeting: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_dates_per_record: DEFAULT_MAX_DATES_PER_RECORD,
        }
    }

    /// Creates a log using the first meeting date, page size and per-record
    /// date cap from `settings`.
    ///
    /// # Errors
    /// Returns `ConfigError` if the settings do not validate.
    pub fn with_settings(store: S, settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            store,
            first_meeting: settings.first_meeting_date()?,
            page_size: settings.page_size,
            max_dates_per_record: settings.max_dates_per_record,
        })
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Parses `input` and logs a meeting for every date not already present.
    ///
    /// A range such as `0/1/1~262142/12/31` names tens of millions of days.
    /// Input holding more dates than the per-record cap is rejected whole,
    /// before any range is expanded or any row stored.
    ///
    /// # Errors
    /// Returns `LogError::NoValidDates` if nothing in `input` reads as a date,
    /// `LogError::TooManyDates` if it expands past the cap, or
    /// `LogError::Store` if the backend fails part way. Rows inserted before a
    /// backend failure stay inserted.
    pub fn record(&self, input: &str, note: &str) -> Result<InsertReport, LogError> {
        let max = self.max_dates_per_record;
        let Some(dates) = parse_input_within(input, max) else {
            tracing::warn!(max, "too many dates in one record");
            return Err(LogError::TooManyDates(max));
        };
        if dates.is_empty() {
            return Err(LogError::NoValidDates);
        }

        let mut report = InsertReport::default();
        for date in dates {
            match self.store.insert_if_absent(date, note)? {
                Some(meeting) => report.inserted.push(meeting),
                None => report.skipped.push(date),
            }
        }

        tracing::info!(
            inserted = report.inserted.len(),
            skipped = report.skipped.len(),
            "recorded meetings"
        );
        Ok(report)
    }

    /// Sets the date the day counter starts from.
    ///
    /// # Errors
    /// Returns `LogError::InvalidDate` if `raw` does not normalize.
    pub fn set_first_meeting(&mut self, raw: &str) -> Result<CanonicalDate, LogError> {
        let date = normalize(raw).ok_or_else(|| LogError::InvalidDate(raw.to_owned()))?;
        tracing::info!(%date, "first meeting set");
        self.first_meeting = Some(date);
        Ok(date)
    }

    /// The configured first meeting, else the oldest logged one.
    ///
    /// # Errors
    /// Returns `LogError::Store` if the backend fails.
    pub fn first_meeting(&self) -> Result<Option<CanonicalDate>, LogError> {
        match self.first_meeting {
            Some(date) => Ok(Some(date)),
            None => Ok(self.store.earliest()?),
        }
    }

    /// Whole days from the first meeting to `today`.
    ///
    /// Zero when there is no first meeting or it does not resolve to a
    /// calendar day; negative when it lies after `today`.
    ///
    /// # Errors
    /// Returns `LogError::Store` if the backend fails.
    pub fn days_since_first(&self, today: NaiveDate) -> Result<i64, LogError> {
        Ok(self
            .first_meeting()?
            .and_then(|date| date.resolve())
            .map_or(0, |first| today.signed_duration_since(first).num_days()))
    }

    /// [`Self::days_since_first`] counted to the current UTC date.
    ///
    /// # Errors
    /// Returns `LogError::Store` if the backend fails.
    pub fn days_since_first_today(&self) -> Result<i64, LogError> {
        self.days_since_first(Utc::now().date_naive())
    }

    /// Newest meetings first. A `limit` of `None` or zero uses the page size.
    ///
    /// # Errors
    /// Returns `LogError::Store` if the backend fails.
    pub fn page(&self, limit: Option<usize>, offset: usize) -> Result<MeetingPage, LogError> {
        let limit = limit.filter(|&l| l > 0).unwrap_or(self.page_size);
        Ok(MeetingPage {
            rows: self.store.page(limit, offset)?,
            total: self.store.count()?,
        })
    }

    /// # Errors
    /// Returns `LogError::NotFound` for an unknown id.
    pub fn update_note(&self, id: u64, note: &str) -> Result<(), LogError> {
        if self.store.update_note(id, note)? {
            Ok(())
        } else {
            Err(LogError::NotFound(id))
        }
    }

    /// # Errors
    /// Returns `LogError::NotFound` for an unknown id.
    pub fn remove(&self, id: u64) -> Result<(), LogError> {
        if self.store.remove(id)? {
            Ok(())
        } else {
            Err(LogError::NotFound(id))
        }
    }

    /// Removes every meeting. The first meeting setting is kept.
    ///
    /// # Errors
    /// Returns `LogError::Store` if the backend fails.
    pub fn clear(&self) -> Result<(), LogError> {
        self.store.clear()?;
        tracing::info!("cleared meetings");
        Ok(())
    }
}
