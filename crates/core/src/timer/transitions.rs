//! Timer state machine
//!
//! Each transition reads the current timer and returns the next version of
//! it, or the reason the move is not allowed. The input is never touched,
//! so a rejected transition leaves the caller's timer exactly as it was.
//!
//! | action | allowed from         | result   |
//! |--------|----------------------|----------|
//! | start  | not running/paused   | running  |
//! | pause  | running              | paused   |
//! | resume | paused               | running  |
//! | stop   | running, paused      | stopped  |
//! | reset  | any                  | stopped  |
//! | expire | running countdown    | expired  |

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tempo_domain::{Timer, TimerKind, TimerStatus, TransitionError};

use super::elapsed::{calculate_duration, calculate_remaining_time};

/// Outcome of a transition function
pub type TransitionResult = Result<Timer, TransitionError>;

/// Lifecycle operation requested by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerAction {
    Start,
    Pause,
    Resume,
    Stop,
    Reset,
    Expire,
}

tempo_domain::impl_domain_status_conversions!(TimerAction {
    Start => "start",
    Pause => "pause",
    Resume => "resume",
    Stop => "stop",
    Reset => "reset",
    Expire => "expire",
});

/// Dispatch `action` to its transition function
pub fn apply(timer: &Timer, action: TimerAction, now: DateTime<Utc>) -> TransitionResult {
    match action {
        TimerAction::Start => Ok(start(timer, now)),
        TimerAction::Pause => pause(timer, now),
        TimerAction::Resume => resume(timer, now),
        TimerAction::Stop => stop(timer, now),
        TimerAction::Reset => Ok(reset(timer, now)),
        TimerAction::Expire => expire(timer, now),
    }
}

/// Begin a new running interval
///
/// Allowed from any status; an active timer restarts from `now`. Countdowns
/// are refilled to their full target.
pub fn start(timer: &Timer, now: DateTime<Utc>) -> Timer {
    let mut next = timer.clone();
    next.status = TimerStatus::Running;
    next.start_time = Some(now);
    next.end_time = None;
    if let TimerKind::Countdown { target_duration, ref mut remaining_duration } = next.kind {
        *remaining_duration = target_duration;
    }
    next.updated_at = now;
    next
}

/// Freeze elapsed time, and remaining time for a countdown
pub fn pause(timer: &Timer, now: DateTime<Utc>) -> TransitionResult {
    if timer.status != TimerStatus::Running {
        return Err(TransitionError::NotRunning);
    }

    let remaining = calculate_remaining_time(timer, now);
    let mut next = timer.clone();
    next.duration = calculate_duration(timer, now).max(0);
    if let TimerKind::Countdown { ref mut remaining_duration, .. } = next.kind {
        *remaining_duration = remaining.max(0);
    }
    next.status = TimerStatus::Paused;
    next.updated_at = now;
    Ok(next)
}

/// Continue a paused timer
///
/// A stopwatch is re-anchored at `now - duration` so that `now - start`
/// keeps counting from the paused total. A countdown starts a fresh interval
/// against its stored remaining seconds.
pub fn resume(timer: &Timer, now: DateTime<Utc>) -> TransitionResult {
    if timer.status != TimerStatus::Paused {
        return Err(TransitionError::NotPaused);
    }

    let mut next = timer.clone();
    next.status = TimerStatus::Running;
    next.end_time = None;
    next.start_time = Some(match timer.kind {
        TimerKind::Countdown { .. } => now,
        TimerKind::Stopwatch => now - Duration::seconds(timer.duration.max(0)),
    });
    next.updated_at = now;
    Ok(next)
}

/// Finish the current session and record its duration
pub fn stop(timer: &Timer, now: DateTime<Utc>) -> TransitionResult {
    if !timer.is_active() {
        return Err(TransitionError::NotActive);
    }

    let mut next = timer.clone();
    next.duration = calculate_duration(timer, now).max(0);
    next.status = TimerStatus::Stopped;
    next.end_time = Some(now);
    next.updated_at = now;
    Ok(next)
}

/// Clear all progress; always allowed
pub fn reset(timer: &Timer, now: DateTime<Utc>) -> Timer {
    let mut next = timer.clone();
    next.status = TimerStatus::Stopped;
    next.start_time = None;
    next.end_time = None;
    next.duration = 0;
    if let TimerKind::Countdown { target_duration, ref mut remaining_duration } = next.kind {
        *remaining_duration = target_duration;
        next.completed_at = None;
    }
    next.updated_at = now;
    next
}

/// Mark a running countdown as finished
pub fn expire(timer: &Timer, now: DateTime<Utc>) -> TransitionResult {
    let TimerKind::Countdown { target_duration, .. } = timer.kind else {
        return Err(TransitionError::NotRunningCountdown);
    };
    if timer.status != TimerStatus::Running {
        return Err(TransitionError::NotRunningCountdown);
    }

    let mut next = timer.clone();
    next.status = TimerStatus::Expired;
    next.end_time = Some(now);
    next.completed_at = Some(now);
    next.duration = target_duration;
    next.kind = TimerKind::Countdown { target_duration, remaining_duration: 0 };
    next.updated_at = now;
    Ok(next)
}
