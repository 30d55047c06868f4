//! Configuration structures
//!
//! Every section has serde defaults, so a config file only needs the keys it
//! wants to change.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CALENDAR_DAYS, DEFAULT_TOP_TAGS_LIMIT, DEFAULT_TOP_TASKS_LIMIT};
use crate::errors::{Result, TempoError};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub analytics: AnalyticsConfig,
    pub logging: LoggingConfig,
}

/// SQLite storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "tempo.db".to_string(), pool_size: 4 }
    }
}

/// Analytics bucketing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// IANA zone name used to derive calendar days and hours
    pub timezone: String,
    pub calendar_days: u32,
    pub top_tasks_limit: usize,
    pub top_tags_limit: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            calendar_days: DEFAULT_CALENDAR_DAYS,
            top_tasks_limit: DEFAULT_TOP_TASKS_LIMIT,
            top_tags_limit: DEFAULT_TOP_TAGS_LIMIT,
        }
    }
}

impl AnalyticsConfig {
    /// Parsed time zone
    ///
    /// # Errors
    ///
    /// Returns [`TempoError::Config`] when `timezone` is not a known IANA name.
    pub fn time_zone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| TempoError::Config(format!("Invalid timezone {:?}: {e}", self.timezone)))
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` overrides it
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
