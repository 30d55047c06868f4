//! Analytics over historical timers
//!
//! - [`buckets`]: calendar windows in the configured time zone
//! - [`report`]: period and tag breakdowns
//! - [`streak`]: streaks and the activity calendar
//! - [`score`]: productivity score
//! - [`summary`]: dashboard counts
//! - [`engine`]: configured entry point over all of the above
//! - [`service`]: repository-backed orchestration

pub mod buckets;
pub mod engine;
pub mod report;
pub mod score;
pub mod service;
pub mod streak;
pub mod summary;

pub use engine::AnalyticsEngine;
pub use service::AnalyticsService;
