//! Fluent builders for timer fixtures

use chrono::{DateTime, Duration, Utc};
use tempo_domain::{Timer, TimerKind, TimerStatus};
use uuid::Uuid;

/// Builder for timers in any state without running transitions
pub struct TimerBuilder {
    timer: Timer,
}

impl TimerBuilder {
    pub fn stopwatch(owner_id: Uuid, task: &str, created_at: DateTime<Utc>) -> Self {
        Self { timer: Timer::new(owner_id, task, TimerKind::Stopwatch, created_at) }
    }

    pub fn countdown(owner_id: Uuid, task: &str, target: i64, created_at: DateTime<Utc>) -> Self {
        Self { timer: Timer::new(owner_id, task, TimerKind::countdown(target), created_at) }
    }

    /// Stopped timer that ran from `created_at` for `seconds`
    pub fn finished(mut self, seconds: i64) -> Self {
        let start = self.timer.created_at;
        self.timer.status = TimerStatus::Stopped;
        self.timer.start_time = Some(start);
        self.timer.end_time = Some(start + Duration::seconds(seconds));
        self.timer.duration = seconds;
        self.timer.updated_at = start + Duration::seconds(seconds);
        self
    }

    /// Running since `created_at`
    pub fn running(mut self) -> Self {
        self.timer.status = TimerStatus::Running;
        self.timer.start_time = Some(self.timer.created_at);
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.timer.tags = tags.iter().map(ToString::to_string).collect();
        self
    }

    pub fn build(self) -> Timer {
        self.timer
    }
}
