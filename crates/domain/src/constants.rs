//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Field limits
pub const MAX_TASK_NAME_LENGTH: usize = 255;
pub const MAX_NOTES_LENGTH: usize = 2000;
pub const MAX_TEMPLATE_TAGS_LENGTH: usize = 1000;

// Timer defaults
pub const DEFAULT_TASK_NAME: &str = "New Timer";
pub const COUNTDOWN_DURATION_REQUIRED: &str = "Please set a duration for the countdown timer";
pub const COUNTDOWN_DURATION_TOO_LONG: &str = "is too long";

// Tags
pub const DEFAULT_TAG_COLOR: &str = "#6B7280";
pub const TAG_COLOR_PATTERN: &str = r"\A#[0-9a-fA-F]{6}\z";
pub const UNTAGGED_LABEL: &str = "Untagged";

// Analytics
pub const DEFAULT_CALENDAR_DAYS: u32 = 90;
pub const DEFAULT_TOP_TASKS_LIMIT: usize = 5;
pub const DEFAULT_TOP_TAGS_LIMIT: usize = 10;
pub const ACTIVE_TIMERS_LIMIT: usize = 5;
pub const RECENT_TIMERS_LIMIT: usize = 10;
pub const MAX_PRODUCTIVITY_SCORE: u32 = 200;

// Rendering
pub const NO_TARGET_PLACEHOLDER: &str = "\u{2014}";
