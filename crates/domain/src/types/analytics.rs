//! Analytics report types
//!
//! Everything here is a plain serialisable value produced by the analytics
//! engine. Durations are whole seconds.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, TempoError};

/* -------------------------------------------------------------------------- */
/* Period */
/* -------------------------------------------------------------------------- */

/// Reporting period selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Today, by hour
    Day,
    /// Last seven days, by day
    #[default]
    Week,
    /// Last four calendar weeks, by week
    Month,
}

crate::impl_domain_status_conversions!(Period {
    Day => "day",
    Week => "week",
    Month => "month",
});

impl Period {
    /// Parse a caller-supplied identifier into a period
    ///
    /// # Errors
    ///
    /// Returns [`TempoError::InvalidPeriod`] for anything other than `day`,
    /// `week` or `month` (any case).
    pub fn parse(raw: &str) -> Result<Self> {
        raw.parse().map_err(|_| TempoError::InvalidPeriod(raw.to_string()))
    }

    /// Number of buckets in the breakdown
    pub const fn bucket_count(self) -> usize {
        match self {
            Self::Day => 24,
            Self::Week => 7,
            Self::Month => 4,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Period report */
/* -------------------------------------------------------------------------- */

/// One hour, day or week slice of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    /// Local calendar date the slice starts on
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_duration: i64,
    pub task_count: u32,
}

/// Summed duration for one task name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTotal {
    pub task_name: String,
    pub duration: i64,
}

/// Period breakdown with totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub period: Period,
    pub breakdown: Vec<Bucket>,
    pub total_time: i64,
    pub total_tasks: u32,
    pub top_tasks: Vec<TaskTotal>,
}

impl AnalyticsReport {
    /// Buckets that saw at least one timer
    pub fn active_buckets(&self) -> usize {
        self.breakdown.iter().filter(|bucket| bucket.task_count > 0).count()
    }
}

/// Per-tag totals; a timer's full duration counts toward each of its tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStat {
    pub name: String,
    pub duration: i64,
    pub count: u32,
}

/* -------------------------------------------------------------------------- */
/* Streaks */
/* -------------------------------------------------------------------------- */

/// Activity on one calendar day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    pub count: u32,
    pub duration: i64,
}

/// Streak figures and the trailing activity calendar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakData {
    /// Distinct active dates, ascending
    pub dates: Vec<NaiveDate>,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Dense, zero-filled, oldest first
    pub calendar_data: BTreeMap<NaiveDate, DayActivity>,
}

/* -------------------------------------------------------------------------- */
/* Dashboards */
/* -------------------------------------------------------------------------- */

/// Counts over every timer a user owns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerStats {
    pub total_timers: u32,
    pub active_timers: u32,
    pub completed_timers: u32,
    pub total_duration: i64,
}

/// Landing-page overview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Running or paused timers, newest first
    pub active_timers: Vec<Uuid>,
    /// Finished timers, most recently updated first
    pub recent_timers: Vec<Uuid>,
    pub total_time_today: i64,
    pub timer_count: u32,
    pub active_timer_count: u32,
    pub stats: TimerStats,
}

/// Everything the analytics page shows for one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsDashboard {
    pub period: Period,
    pub total_time: i64,
    pub total_tasks: u32,
    pub breakdown: Vec<Bucket>,
    pub top_tasks: Vec<TaskTotal>,
    pub tag_breakdown: Vec<TagStat>,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub calendar_data: BTreeMap<NaiveDate, DayActivity>,
    pub productivity_score: u32,
}
