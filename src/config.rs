//! Meeting log settings.
//!
//! Sources, later ones winning: built-in defaults, an optional TOML file,
//! then `MEETING_DAYS_*` environment variables (`MEETING_DAYS_PAGE_SIZE`,
//! `MEETING_DAYS_FIRST_MEETING`, `MEETING_DAYS_MAX_DATES_PER_RECORD`).

use std::path::Path;

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::consts::{DEFAULT_MAX_DATES_PER_RECORD, DEFAULT_PAGE_SIZE, ENV_PREFIX};
use crate::{CanonicalDate, normalize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Free-form date the day counter starts from.
    #[serde(default)]
    pub first_meeting: Option<String>,

    /// Rows per meeting page when the caller gives no limit.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Most dates one record call may expand to.
    #[serde(default = "default_max_dates_per_record")]
    pub max_dates_per_record: usize,
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const fn default_max_dates_per_record() -> usize {
    DEFAULT_MAX_DATES_PER_RECORD
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            first_meeting: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_dates_per_record: DEFAULT_MAX_DATES_PER_RECORD,
        }
    }
}

/// Error type for loading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid first meeting date: {0}")]
    InvalidFirstMeeting(String),

    #[error("Page size must be at least 1")]
    InvalidPageSize,

    #[error("Max dates per record must be at least 1")]
    InvalidMaxDates,
}

impl Settings {
    /// Loads settings from `path` (if given and present) and the environment.
    ///
    /// # Errors
    /// Returns `ConfigError` if a source cannot be read or the result does not validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        Self::finish(builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true)))
    }

    /// Loads settings from a TOML document, ignoring the environment.
    ///
    /// # Errors
    /// Returns `ConfigError` if the document is malformed or does not validate.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::finish(Self::defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let page_size = i64::try_from(DEFAULT_PAGE_SIZE).map_err(|_| ConfigError::InvalidPageSize)?;
        let max_dates = i64::try_from(DEFAULT_MAX_DATES_PER_RECORD).map_err(|_| ConfigError::InvalidMaxDates)?;
        Ok(Config::builder()
            .set_default("page_size", page_size)?
            .set_default("max_dates_per_record", max_dates)?)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        tracing::debug!(settings = ?settings, "settings loaded");
        Ok(settings)
    }

    /// Checks both limits are non-zero and that `first_meeting`, if set, normalizes.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        if self.max_dates_per_record == 0 {
            return Err(ConfigError::InvalidMaxDates);
        }
        self.first_meeting_date().map(|_| ())
    }

    /// `first_meeting` run through [`normalize`].
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidFirstMeeting` if it is set but unreadable.
    pub fn first_meeting_date(&self) -> Result<Option<CanonicalDate>, ConfigError> {
        self.first_meeting
            .as_deref()
            .map(|raw| normalize(raw).ok_or_else(|| ConfigError::InvalidFirstMeeting(raw.to_owned())))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml("").expect("empty document should load");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(settings.max_dates_per_record, DEFAULT_MAX_DATES_PER_RECORD);
        assert_eq!(settings.first_meeting_date().expect("unset is fine"), None);
    }

    #[test]
    fn test_from_toml() {
        let settings = Settings::from_toml("first_meeting = \"20240214\"\npage_size = 20")
            .expect("document should load");
        assert_eq!(settings.page_size, 20);
        assert_eq!(
            settings.first_meeting_date().expect("date should normalize"),
            Some(CanonicalDate::new(2024, 2, 14))
        );
    }

    #[test]
    fn test_invalid_first_meeting() {
        let result = Settings::from_toml("first_meeting = \"someday\"");
        assert!(matches!(result, Err(ConfigError::InvalidFirstMeeting(raw)) if raw == "someday"));
    }

    #[test]
    fn test_zero_page_size() {
        let result = Settings::from_toml("page_size = 0");
        assert!(matches!(result, Err(ConfigError::InvalidPageSize)));
    }

    #[test]
    fn test_max_dates_per_record() {
        let settings = Settings::from_toml("max_dates_per_record = 31").expect("document should load");
        assert_eq!(settings.max_dates_per_record, 31);

        let result = Settings::from_toml("max_dates_per_record = 0");
        assert!(matches!(result, Err(ConfigError::InvalidMaxDates)));
    }

    #[test]
    fn test_malformed_toml() {
        let result = Settings::from_toml("page_size = = 3");
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("meeting_days_settings_that_do_not_exist.toml");
        let settings = Settings::load(Some(&path)).expect("missing file is optional");
        assert!(settings.page_size > 0);
    }
}
