//! Elapsed and remaining time arithmetic
//!
//! Every function here is a pure read of a timer at an explicit instant.
//! Analytics reuses [`calculate_duration`] so reports and the live display
//! always agree. Negative spans (clock skew, a start time in the future)
//! clamp to zero instead of failing.

use chrono::{DateTime, Utc};
use tempo_common::time::format_hms;
use tempo_domain::{Timer, TimerKind, TimerStatus};

/// Whole seconds from `earlier` to `later`, truncated toward zero
fn seconds_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    (later - earlier).num_seconds()
}

/// Elapsed seconds for the timer as of `now`
///
/// - no start time: 0
/// - end time recorded: `end - start`
/// - running: `now - start`
/// - otherwise the stored duration
pub fn calculate_duration(timer: &Timer, now: DateTime<Utc>) -> i64 {
    let Some(start) = timer.start_time else {
        return 0;
    };

    match timer.end_time {
        Some(end) => seconds_between(end, start).max(0),
        None if timer.status == TimerStatus::Running => seconds_between(now, start).max(0),
        None => timer.duration.max(0),
    }
}

/// Seconds left on a countdown as of `now`; always 0 for a stopwatch
pub fn calculate_remaining_time(timer: &Timer, now: DateTime<Utc>) -> i64 {
    let TimerKind::Countdown { target_duration, remaining_duration } = timer.kind else {
        return 0;
    };

    match timer.status {
        TimerStatus::Running => {
            let elapsed = timer.start_time.map_or(0, |start| seconds_between(now, start));
            (remaining_duration - elapsed).clamp(0, target_duration.max(0))
        }
        TimerStatus::Paused => remaining_duration.clamp(0, target_duration.max(0)),
        TimerStatus::Expired => 0,
        TimerStatus::Pending | TimerStatus::Stopped | TimerStatus::Completed => target_duration,
    }
}

/// Countdown progress in percent, rounded to two decimals
pub fn progress_percentage(timer: &Timer, now: DateTime<Utc>) -> f64 {
    let Some(target) = timer.target_duration().filter(|target| *target > 0) else {
        return 0.0;
    };

    let elapsed = target - calculate_remaining_time(timer, now);
    #[allow(clippy::cast_precision_loss)]
    let percent = (elapsed as f64 / target as f64 * 100.0).clamp(0.0, 100.0);
    (percent * 100.0).round() / 100.0
}

/// Countdown that has run out (or was already marked expired)
pub fn is_expired(timer: &Timer, now: DateTime<Utc>) -> bool {
    timer.status == TimerStatus::Expired || should_expire(timer, now)
}

/// Running countdown with no time left; the trigger for `expire`
pub fn should_expire(timer: &Timer, now: DateTime<Utc>) -> bool {
    timer.is_countdown()
        && timer.status == TimerStatus::Running
        && calculate_remaining_time(timer, now) <= 0
}

/// Remaining seconds for a countdown, elapsed seconds for a stopwatch
pub fn display_time(timer: &Timer, now: DateTime<Utc>) -> i64 {
    if timer.is_countdown() {
        calculate_remaining_time(timer, now)
    } else {
        calculate_duration(timer, now)
    }
}

/// `HH:MM:SS` of the value a timer card shows
///
/// Countdowns show the time left. A running stopwatch shows live elapsed
/// time; any other stopwatch shows its recorded duration.
pub fn formatted_duration(timer: &Timer, now: DateTime<Utc>) -> String {
    let seconds = match timer.kind {
        TimerKind::Countdown { .. } => calculate_remaining_time(timer, now),
        TimerKind::Stopwatch if timer.status == TimerStatus::Running => {
            calculate_duration(timer, now)
        }
        TimerKind::Stopwatch => timer.duration,
    };
    format_hms(seconds)
}

/// `HH:MM:SS` of the countdown time left
pub fn formatted_remaining_time(timer: &Timer, now: DateTime<Utc>) -> String {
    format_hms(calculate_remaining_time(timer, now))
}
