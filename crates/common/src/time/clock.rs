//! Wall-clock abstraction for testability
//!
//! Engines never read the global clock directly. They receive a [`Clock`]
//! (or an explicit timestamp), which lets tests freeze time and advance it
//! by exact amounts.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "runtime")]
//! # {
//! use chrono::{Duration, TimeZone, Utc};
//! use tempo_common::time::{Clock, MockClock, SystemClock};
//!
//! // Use system clock in production
//! let clock = SystemClock;
//! let _now = clock.now();
//!
//! // Use mock clock in tests
//! let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
//! let mock = MockClock::new(start);
//! mock.advance(Duration::seconds(5));
//! assert_eq!(mock.now() - start, Duration::seconds(5));
//! # }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Trait for wall-clock reads
///
/// Implementations must be cheap to call; engines read the clock once per
/// operation and reuse the value for every derived field.
pub trait Clock: Send + Sync {
    /// Current wall-clock time in UTC
    fn now(&self) -> DateTime<Utc>;

    /// Seconds since the UNIX epoch
    fn unix_seconds(&self) -> i64 {
        self.now().timestamp()
    }
}

/// Shared, dynamically dispatched clock handle used by services
pub type SharedClock = Arc<dyn Clock>;

/// Real system clock implementation
///
/// Use this in production code.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Mock clock for deterministic testing
///
/// The clock is frozen at a fixed instant until it is advanced or set.
/// Clones share the same underlying time, so a test can hand one clone to a
/// service and keep another to move time forward.
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    /// Create a mock clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { current: Arc::new(Mutex::new(start)) }
    }

    /// Create a mock clock frozen at the current real time
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Advance the mock clock by a duration
    ///
    /// Negative durations move the clock backwards, which is useful for
    /// simulating clock skew.
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock();
        *current += duration;
    }

    /// Advance the mock clock by whole seconds
    pub fn advance_secs(&self, seconds: i64) {
        self.advance(Duration::seconds(seconds));
    }

    /// Set the mock clock to an absolute instant
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock() = instant;
    }

    /// Wrap this clock in a [`SharedClock`] handle
    pub fn shared(&self) -> SharedClock {
        Arc::new(self.clone())
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::starting_now()
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}
