//! Domain types and models

pub mod analytics;
pub mod range;
pub mod tag;
pub mod template;
pub mod timer;

// Re-export for convenience
pub use analytics::{
    AnalyticsDashboard, AnalyticsReport, Bucket, DashboardSummary, DayActivity, Period,
    StreakData, TagStat, TaskTotal, TimerStats,
};
pub use range::DateRange;
pub use tag::Tag;
pub use template::{TemplateKind, TimerOverrides, TimerTemplate};
pub use timer::{Timer, TimerEvent, TimerKind, TimerStatus, TimerType, TimerView};
