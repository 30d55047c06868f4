//! Analytics engine
//!
//! Pure aggregation over timer snapshots. Every operation takes `now`
//! explicitly and never fails on empty input.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tempo_domain::constants::{DEFAULT_CALENDAR_DAYS, DEFAULT_TOP_TAGS_LIMIT, DEFAULT_TOP_TASKS_LIMIT};
use tempo_domain::{
    AnalyticsConfig, AnalyticsDashboard, AnalyticsReport, DashboardSummary, DateRange, Period,
    Result, StreakData, TagStat, Timer, TimerStats,
};

use super::{buckets, report, score, streak, summary};

/// Aggregates timers into reports in one time zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEngine {
    tz: Tz,
    calendar_days: u32,
    top_tasks_limit: usize,
    top_tags_limit: usize,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl AnalyticsEngine {
    /// Engine with default limits in `tz`
    pub const fn new(tz: Tz) -> Self {
        Self {
            tz,
            calendar_days: DEFAULT_CALENDAR_DAYS,
            top_tasks_limit: DEFAULT_TOP_TASKS_LIMIT,
            top_tags_limit: DEFAULT_TOP_TAGS_LIMIT,
        }
    }

    /// Engine configured from the analytics section of the config
    ///
    /// # Errors
    ///
    /// Returns `TempoError::Config` for an unknown time zone name.
    pub fn from_config(config: &AnalyticsConfig) -> Result<Self> {
        Ok(Self {
            tz: config.time_zone()?,
            calendar_days: config.calendar_days.max(1),
            top_tasks_limit: config.top_tasks_limit,
            top_tags_limit: config.top_tags_limit,
        })
    }

    pub const fn time_zone(&self) -> Tz {
        self.tz
    }

    /// Window covered by the period's buckets
    pub fn period_range(&self, period: Period, now: DateTime<Utc>) -> DateRange {
        buckets::period_range(period, self.tz, now)
    }

    /// Trailing calendar window used for streak heatmaps
    pub fn calendar_range(&self, now: DateTime<Utc>) -> DateRange {
        buckets::trailing_days_range(self.tz, now, self.calendar_days)
    }

    pub fn analytics_for(&self, period: Period, timers: &[Timer], now: DateTime<Utc>) -> AnalyticsReport {
        report::analytics_for(period, timers, self.tz, now, self.top_tasks_limit)
    }

    pub fn tag_analytics(&self, period: Period, timers: &[Timer], now: DateTime<Utc>) -> Vec<TagStat> {
        report::tag_analytics(period, timers, self.tz, now, self.top_tags_limit)
    }

    pub fn streak_data(&self, timers: &[Timer], now: DateTime<Utc>) -> StreakData {
        streak::streak_data(timers, self.tz, now, self.calendar_days)
    }

    pub fn productivity_score(report: &AnalyticsReport, current_streak: u32) -> u32 {
        score::productivity_score(report, current_streak)
    }

    pub fn summarize(&self, timers: &[Timer], now: DateTime<Utc>) -> DashboardSummary {
        summary::summarize(timers, self.tz, now)
    }

    pub fn total_time_today(&self, timers: &[Timer], now: DateTime<Utc>) -> i64 {
        summary::total_time_today(timers, self.tz, now)
    }

    pub fn total_time_tracked(timers: &[Timer]) -> i64 {
        summary::total_time_tracked(timers)
    }

    pub fn timer_stats(timers: &[Timer]) -> TimerStats {
        summary::timer_stats(timers)
    }

    pub fn timers_in_range(timers: &[Timer], range: DateRange) -> Vec<&Timer> {
        summary::timers_in_range(timers, range)
    }

    /// Every analytics-page figure for one period
    ///
    /// `timers` should be the owner's full history; streaks count every day
    /// present, while the period figures and calendar ignore timers outside
    /// their windows.
    pub fn dashboard(&self, period: Period, timers: &[Timer], now: DateTime<Utc>) -> AnalyticsDashboard {
        let report = self.analytics_for(period, timers, now);
        let tag_breakdown = self.tag_analytics(period, timers, now);
        let streak = self.streak_data(timers, now);
        let productivity_score = Self::productivity_score(&report, streak.current_streak);

        AnalyticsDashboard {
            period,
            total_time: report.total_time,
            total_tasks: report.total_tasks,
            breakdown: report.breakdown,
            top_tasks: report.top_tasks,
            tag_breakdown,
            current_streak: streak.current_streak,
            longest_streak: streak.longest_streak,
            calendar_data: streak.calendar_data,
            productivity_score,
        }
    }
}
