//! Time fixtures for deterministic tests

// Allow missing panics docs for test utilities - invalid fixture dates are
// programmer errors and should fail the test immediately
#![allow(clippy::missing_panics_doc)]

use chrono::{DateTime, TimeZone, Utc};

use crate::time::MockClock;

/// Build a UTC timestamp from calendar components
///
/// Panics on an impossible date, which is what a fixture should do.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(year, month, day, hour, minute, second) {
        chrono::LocalResult::Single(instant) => instant,
        _ => panic!("invalid fixture timestamp {year}-{month}-{day} {hour}:{minute}:{second}"),
    }
}

/// Mock clock frozen at `instant`
pub fn frozen_clock(instant: DateTime<Utc>) -> MockClock {
    MockClock::new(instant)
}
