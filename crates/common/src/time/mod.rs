//! Time utilities and abstractions
//!
//! This module provides the time handling shared by the engines:
//! - **[`clock`]**: Wall-clock abstraction with a real and a mock
//!   implementation, so tests can freeze and advance virtual time
//! - **[`format`]**: Clock-style (`HH:MM:SS`) and human-readable duration
//!   formatting
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "runtime")]
//! # {
//! use chrono::{TimeZone, Utc};
//! use tempo_common::time::{format_hms, Clock, MockClock};
//!
//! assert_eq!(format_hms(3665), "01:01:05");
//!
//! let clock = MockClock::new(Utc.with_ymd_and_hms(2025, 7, 10, 9, 0, 0).unwrap());
//! clock.advance_secs(30);
//! assert_eq!(clock.now(), Utc.with_ymd_and_hms(2025, 7, 10, 9, 0, 30).unwrap());
//! # }
//! ```

pub mod clock;
pub mod format;

// Re-export commonly used items
pub use clock::{Clock, MockClock, SharedClock, SystemClock};
pub use format::{format_duration, format_hms};
