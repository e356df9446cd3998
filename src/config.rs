use crate::error::{ProcessingError, Result};
use crate::models::DateRange;
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, DEFAULT_LOG_LEVEL, ENV_PREFIX};
use ::config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

/// Settings shared by every command, layered from defaults, an optional
/// config file and `STATION_STATS_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct Settings {
    #[serde(default = "default_has_headers")]
    pub has_headers: bool,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    #[serde(default)]
    pub use_mmap: bool,

    #[serde(default = "default_buffer_size")]
    #[validate(range(min = 1024))]
    pub buffer_size: usize,

    #[serde(default)]
    pub start_date: Option<f64>,

    #[serde(default)]
    pub end_date: Option<f64>,

    #[serde(default = "default_log_level")]
    #[validate(length(min = 1))]
    pub log_level: String,
}

fn default_has_headers() -> bool {
    true
}

fn default_delimiter() -> char {
    ','
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            has_headers: default_has_headers(),
            delimiter: default_delimiter(),
            use_mmap: false,
            buffer_size: default_buffer_size(),
            start_date: None,
            end_date: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (if given) and the environment, then validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.check()?;
        Ok(settings)
    }

    /// Replace the configured date bounds, e.g. from command-line flags.
    pub fn with_dates(mut self, start_date: Option<f64>, end_date: Option<f64>) -> Result<Self> {
        if start_date.is_some() || end_date.is_some() {
            self.start_date = start_date;
            self.end_date = end_date;
        }
        self.check()?;
        Ok(self)
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if !self.delimiter.is_ascii() {
            return Err(ProcessingError::Config(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }

        match (self.start_date, self.end_date) {
            (None, None) => Ok(()),
            (Some(start), Some(end)) => {
                if !start.is_finite() || !end.is_finite() {
                    return Err(ProcessingError::Config(format!(
                        "Date bounds must be finite, got [{}, {}]",
                        start, end
                    )));
                }
                if start > end {
                    return Err(ProcessingError::Config(format!(
                        "Start date {} is after end date {}",
                        start, end
                    )));
                }
                Ok(())
            }
            _ => Err(ProcessingError::Config(
                "Start and end dates must be given together".to_string(),
            )),
        }
    }

    pub fn delimiter_byte(&self) -> u8 {
        // `check` guarantees an ASCII delimiter.
        self.delimiter as u8
    }

    pub fn date_range(&self) -> Option<DateRange> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        }
    }
}
