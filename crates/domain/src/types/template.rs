//! Reusable timer presets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timer::TimerType;

/// Counting mode stored on a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateKind {
    Stopwatch,
    Countdown { target_duration: i64 },
}

impl TemplateKind {
    pub const fn timer_type(&self) -> TimerType {
        match self {
            Self::Stopwatch => TimerType::Stopwatch,
            Self::Countdown { .. } => TimerType::Countdown,
        }
    }

    pub const fn target_duration(&self) -> Option<i64> {
        match self {
            Self::Stopwatch => None,
            Self::Countdown { target_duration } => Some(*target_duration),
        }
    }
}

/// Named preset a user instantiates into new timers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerTemplate {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Unique per owner
    pub name: String,
    pub task_name: Option<String>,
    pub kind: TemplateKind,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub usage_count: u32,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimerTemplate {
    pub fn new(
        owner_id: Uuid,
        name: impl Into<String>,
        kind: TemplateKind,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            owner_id,
            name: name.into(),
            task_name: None,
            kind,
            tags: Vec::new(),
            notes: None,
            usage_count: 0,
            last_used_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub const fn timer_type(&self) -> TimerType {
        self.kind.timer_type()
    }

    pub const fn is_countdown(&self) -> bool {
        matches!(self.kind, TemplateKind::Countdown { .. })
    }
}

/// Per-instantiation values that replace the template's own
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerOverrides {
    pub task_name: Option<String>,
    /// Raw comma-delimited tags
    pub tags: Option<String>,
    pub notes: Option<String>,
}
