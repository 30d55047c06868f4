//! Timer records and their rendered form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Pending,
    Running,
    Paused,
    Stopped,
    Completed,
    Expired,
}

crate::impl_domain_status_conversions!(TimerStatus {
    Pending => "pending",
    Running => "running",
    Paused => "paused",
    Stopped => "stopped",
    Completed => "completed",
    Expired => "expired",
});

impl TimerStatus {
    /// Running or paused
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }

    /// Stopped, completed or expired; these show up in "recent timers"
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Stopped | Self::Completed | Self::Expired)
    }
}

/// Counting mode, derived from [`TimerKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerType {
    Stopwatch,
    Countdown,
}

crate::impl_domain_status_conversions!(TimerType {
    Stopwatch => "stopwatch",
    Countdown => "countdown",
});

/// Counting mode together with the countdown-only fields
///
/// Target and remaining seconds exist only on countdown timers, so a
/// stopwatch can never carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimerKind {
    Stopwatch,
    Countdown { target_duration: i64, remaining_duration: i64 },
}

impl TimerKind {
    /// Fresh countdown with the full target remaining
    pub const fn countdown(target_duration: i64) -> Self {
        Self::Countdown { target_duration, remaining_duration: target_duration }
    }

    pub const fn timer_type(&self) -> TimerType {
        match self {
            Self::Stopwatch => TimerType::Stopwatch,
            Self::Countdown { .. } => TimerType::Countdown,
        }
    }

    pub const fn target_duration(&self) -> Option<i64> {
        match self {
            Self::Stopwatch => None,
            Self::Countdown { target_duration, .. } => Some(*target_duration),
        }
    }

    pub const fn remaining_duration(&self) -> Option<i64> {
        match self {
            Self::Stopwatch => None,
            Self::Countdown { remaining_duration, .. } => Some(*remaining_duration),
        }
    }
}

/// A single tracked timer owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub task_name: String,
    pub kind: TimerKind,
    pub status: TimerStatus,
    /// Beginning of the current running interval
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Accumulated elapsed seconds, recorded at pause and stop
    pub duration: i64,
    pub completed_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Timer {
    /// New pending timer with a fresh v7 id
    pub fn new(
        owner_id: Uuid,
        task_name: impl Into<String>,
        kind: TimerKind,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            owner_id,
            task_name: task_name.into(),
            kind,
            status: TimerStatus::Pending,
            start_time: None,
            end_time: None,
            duration: 0,
            completed_at: None,
            tags: Vec::new(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub const fn timer_type(&self) -> TimerType {
        self.kind.timer_type()
    }

    pub const fn is_countdown(&self) -> bool {
        matches!(self.kind, TimerKind::Countdown { .. })
    }

    pub const fn is_stopwatch(&self) -> bool {
        matches!(self.kind, TimerKind::Stopwatch)
    }

    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.status, TimerStatus::Running)
    }

    pub const fn is_paused(&self) -> bool {
        matches!(self.status, TimerStatus::Paused)
    }

    pub const fn target_duration(&self) -> Option<i64> {
        self.kind.target_duration()
    }

    pub const fn remaining_duration(&self) -> Option<i64> {
        self.kind.remaining_duration()
    }
}

/// Serialisable snapshot of a timer with every derived value filled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub id: Uuid,
    pub task_name: String,
    pub status: TimerStatus,
    pub timer_type: TimerType,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_duration: Option<i64>,
    pub remaining_time: i64,
    pub formatted_duration: String,
    pub progress_percentage: f64,
    pub is_expired: bool,
    pub is_countdown: bool,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

/// Something a caller may want to surface after a timer operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    Expired { timer_id: Uuid, owner_id: Uuid, at: DateTime<Utc> },
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_new_timer_is_pending() {
        let now = Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap();
        let timer = Timer::new(Uuid::nil(), "Write report", TimerKind::Stopwatch, now);

        assert_eq!(timer.status, TimerStatus::Pending);
        assert_eq!(timer.duration, 0);
        assert_eq!(timer.created_at, now);
        assert!(timer.is_stopwatch());
        assert_eq!(timer.target_duration(), None);
    }

    #[test]
    fn test_countdown_kind_starts_full() {
        let kind = TimerKind::countdown(300);
        assert_eq!(kind.target_duration(), Some(300));
        assert_eq!(kind.remaining_duration(), Some(300));
        assert_eq!(kind.timer_type(), TimerType::Countdown);
    }

    #[test]
    fn test_status_groups() {
        assert!(TimerStatus::Running.is_active());
        assert!(TimerStatus::Paused.is_active());
        assert!(!TimerStatus::Pending.is_active());
        assert!(TimerStatus::Expired.is_finished());
        assert!(!TimerStatus::Pending.is_finished());
    }

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!("Paused".parse::<TimerStatus>().unwrap(), TimerStatus::Paused);
        assert_eq!("COUNTDOWN".parse::<TimerType>().unwrap(), TimerType::Countdown);
        assert!("ticking".parse::<TimerStatus>().is_err());
    }

    #[test]
    fn test_kind_serializes_flat() {
        let json = serde_json::to_value(TimerKind::countdown(60)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "countdown", "target_duration": 60, "remaining_duration": 60 })
        );
    }
}
