//! Testing utilities and helpers
//!
//! Downstream crates enable the `test-utils` feature to get:
//! - **[`time`]**: frozen-clock constructors and UTC timestamp shorthands
//! - **[`assertions`]**: float and error assertions used by engine tests
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "test-utils")]
//! # {
//! use tempo_common::testing::{frozen_clock, utc};
//! use tempo_common::time::Clock;
//!
//! let clock = frozen_clock(utc(2025, 7, 10, 9, 0, 0));
//! clock.advance_secs(30);
//! assert_eq!(clock.now(), utc(2025, 7, 10, 9, 0, 30));
//! # }
//! ```

pub mod assertions;
pub mod time;

// Re-export commonly used items
pub use assertions::assert_approx_eq;
pub use time::{frozen_clock, utc};

pub use crate::time::{Clock, MockClock, SystemClock};
