//! Dashboard overview figures

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tempo_domain::constants::{ACTIVE_TIMERS_LIMIT, RECENT_TIMERS_LIMIT};
use tempo_domain::{DashboardSummary, DateRange, Timer, TimerStats};

use super::buckets::{day_range, local_date};
use crate::timer::elapsed::calculate_duration;

/// Timers created inside `range`
pub fn timers_in_range(timers: &[Timer], range: DateRange) -> Vec<&Timer> {
    timers.iter().filter(|timer| range.contains(timer.created_at)).collect()
}

/// Sum of recorded durations
pub fn total_time_tracked(timers: &[Timer]) -> i64 {
    timers.iter().map(|timer| timer.duration.max(0)).sum()
}

/// Live duration of timers created today (local date)
pub fn total_time_today(timers: &[Timer], tz: Tz, now: DateTime<Utc>) -> i64 {
    timers_in_range(timers, day_range(tz, local_date(tz, now)))
        .into_iter()
        .map(|timer| calculate_duration(timer, now))
        .sum()
}

/// Counts over every timer
pub fn timer_stats(timers: &[Timer]) -> TimerStats {
    let count = |pred: fn(&Timer) -> bool| {
        u32::try_from(timers.iter().filter(|timer| pred(timer)).count()).unwrap_or(u32::MAX)
    };
    TimerStats {
        total_timers: count(|_| true),
        active_timers: count(Timer::is_active),
        completed_timers: count(|timer| timer.status.is_finished()),
        total_duration: total_time_tracked(timers),
    }
}

/// Landing-page overview of one user's timers
pub fn summarize(timers: &[Timer], tz: Tz, now: DateTime<Utc>) -> DashboardSummary {
    let mut active: Vec<&Timer> = timers.iter().filter(|timer| timer.is_active()).collect();
    active.sort_by_key(|timer| Reverse(timer.created_at));

    let mut recent: Vec<&Timer> = timers.iter().filter(|timer| timer.status.is_finished()).collect();
    recent.sort_by_key(|timer| Reverse(timer.updated_at));

    let stats = timer_stats(timers);
    DashboardSummary {
        active_timers: active.iter().take(ACTIVE_TIMERS_LIMIT).map(|timer| timer.id).collect(),
        recent_timers: recent.iter().take(RECENT_TIMERS_LIMIT).map(|timer| timer.id).collect(),
        total_time_today: total_time_today(timers, tz, now),
        timer_count: stats.total_timers,
        active_timer_count: stats.active_timers,
        stats,
    }
}
