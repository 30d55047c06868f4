//! Half-open time windows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `[start, end)` window over UTC instants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Every representable instant
    pub const fn unbounded() -> Self {
        Self { start: DateTime::<Utc>::MIN_UTC, end: DateTime::<Utc>::MAX_UTC }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Smallest range covering both
    pub fn union(&self, other: &Self) -> Self {
        Self { start: self.start.min(other.start), end: self.end.max(other.end) }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let range = DateRange::new(start, start + Duration::days(1));

        assert!(range.contains(start));
        assert!(range.contains(start + Duration::hours(23)));
        assert!(!range.contains(start + Duration::days(1)));
        assert!(!range.contains(start - Duration::seconds(1)));
    }

    #[test]
    fn test_union_spans_both() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let a = DateRange::new(start, start + Duration::days(1));
        let b = DateRange::new(start - Duration::days(5), start);

        let merged = a.union(&b);
        assert_eq!(merged.start, start - Duration::days(5));
        assert_eq!(merged.end, start + Duration::days(1));
        assert!(!merged.is_empty());
        assert!(DateRange::unbounded().contains(start));
    }
}
