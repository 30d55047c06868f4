//! Rendered timer snapshot

use chrono::{DateTime, Utc};
use tempo_domain::{Timer, TimerView};

use super::elapsed;

/// Snapshot `timer` at `now` with every derived field computed once
pub fn to_view(timer: &Timer, now: DateTime<Utc>) -> TimerView {
    TimerView {
        id: timer.id,
        task_name: timer.task_name.clone(),
        status: timer.status,
        timer_type: timer.timer_type(),
        start_time: timer.start_time,
        end_time: timer.end_time,
        duration: timer.duration,
        target_duration: timer.target_duration(),
        remaining_duration: timer.remaining_duration(),
        remaining_time: elapsed::calculate_remaining_time(timer, now),
        formatted_duration: elapsed::formatted_duration(timer, now),
        progress_percentage: elapsed::progress_percentage(timer, now),
        is_expired: elapsed::is_expired(timer, now),
        is_countdown: timer.is_countdown(),
        tags: timer.tags.clone(),
        notes: timer.notes.clone(),
    }
}
