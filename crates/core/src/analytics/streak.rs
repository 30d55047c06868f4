//! Activity streaks and the trailing calendar

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use tempo_domain::{DayActivity, StreakData, Timer};

use super::buckets::local_date;
use crate::timer::elapsed::calculate_duration;

/// Streak figures over every timer plus a dense `calendar_days` calendar
///
/// A day counts as active when at least one timer was created on it (local
/// date). The current streak ends today and is 0 when today is idle.
pub fn streak_data(timers: &[Timer], tz: Tz, now: DateTime<Utc>, calendar_days: u32) -> StreakData {
    let today = local_date(tz, now);
    let dates: BTreeSet<NaiveDate> = timers.iter().map(|timer| local_date(tz, timer.created_at)).collect();

    StreakData {
        current_streak: current_streak(&dates, today),
        longest_streak: longest_streak(&dates),
        calendar_data: calendar(timers, tz, now, today, calendar_days),
        dates: dates.into_iter().collect(),
    }
}

fn current_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while dates.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

fn longest_streak(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &date in dates {
        run = match previous {
            Some(prev) if date - prev == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }
    longest
}

fn calendar(
    timers: &[Timer],
    tz: Tz,
    now: DateTime<Utc>,
    today: NaiveDate,
    days: u32,
) -> BTreeMap<NaiveDate, DayActivity> {
    let first = today - Duration::days(i64::from(days.max(1)) - 1);
    let mut calendar: BTreeMap<NaiveDate, DayActivity> =
        first.iter_days().take_while(|date| *date <= today).map(|date| (date, DayActivity::default())).collect();

    for timer in timers {
        if let Some(day) = calendar.get_mut(&local_date(tz, timer.created_at)) {
            day.count += 1;
            day.duration += calculate_duration(timer, now);
        }
    }
    calendar
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempo_domain::TimerKind;
    use uuid::Uuid;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 5, 14, 0, 0).unwrap()
    }

    fn created(days_ago: i64) -> Timer {
        let mut timer =
            Timer::new(Uuid::nil(), "Work", TimerKind::Stopwatch, now() - Duration::days(days_ago));
        timer.duration = 60;
        timer
    }

    #[test]
    fn test_three_consecutive_days() {
        let timers = vec![created(2), created(1), created(0)];
        let data = streak_data(&timers, Tz::UTC, now(), 90);

        assert_eq!(data.current_streak, 3);
        assert_eq!(data.longest_streak, 3);
        assert_eq!(data.dates.len(), 3);
    }

    #[test]
    fn test_idle_today_breaks_current_streak() {
        let timers = vec![created(3), created(2), created(1)];
        let data = streak_data(&timers, Tz::UTC, now(), 90);

        assert_eq!(data.current_streak, 0);
        assert_eq!(data.longest_streak, 3);
    }

    #[test]
    fn test_longest_run_with_gaps() {
        let timers = vec![created(10), created(9), created(8), created(7), created(3), created(0), created(0)];
        let data = streak_data(&timers, Tz::UTC, now(), 90);

        assert_eq!(data.longest_streak, 4);
        assert_eq!(data.current_streak, 1);
        assert_eq!(data.dates.len(), 6);
    }

    #[test]
    fn test_no_timers() {
        let data = streak_data(&[], Tz::UTC, now(), 90);

        assert_eq!(data.current_streak, 0);
        assert_eq!(data.longest_streak, 0);
        assert_eq!(data.calendar_data.len(), 90);
        assert!(data.calendar_data.values().all(|day| *day == DayActivity::default()));
    }

    #[test]
    fn test_calendar_is_dense_and_bounded() {
        let timers = vec![created(0), created(0), created(89), created(90)];
        let data = streak_data(&timers, Tz::UTC, now(), 90);

        let today = now().date_naive();
        assert_eq!(data.calendar_data.len(), 90);
        assert_eq!(data.calendar_data.keys().next(), Some(&(today - Duration::days(89))));
        assert_eq!(data.calendar_data[&today], DayActivity { count: 2, duration: 0 });
        assert_eq!(data.calendar_data[&(today - Duration::days(89))].count, 1);
    }
}
