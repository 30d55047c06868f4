//! Calendar bucketing in the configured time zone
//!
//! Buckets are half-open `[start, end)` windows in UTC whose edges fall on
//! local midnights or local hour marks. A timer belongs to the bucket that
//! contains its `created_at`.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};
use chrono_tz::Tz;
use tempo_domain::{DateRange, Period};

/// Edges and label of one bucket before any timers are counted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketWindow {
    pub label: String,
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Local wall-clock time to UTC
///
/// Ambiguous times (clocks going back) resolve to the earlier instant.
/// Times inside a spring-forward gap are shifted by the zone's offset just
/// after the gap.
pub fn local_to_utc(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(instant) | LocalResult::Ambiguous(instant, _) => {
            instant.with_timezone(&Utc)
        }
        LocalResult::None => {
            let offset = tz.offset_from_utc_datetime(&local).fix();
            Utc.from_utc_datetime(&(local - Duration::seconds(i64::from(offset.local_minus_utc()))))
        }
    }
}

/// UTC instant of local midnight starting `date`
pub fn start_of_day(tz: Tz, date: NaiveDate) -> DateTime<Utc> {
    local_to_utc(tz, date.and_time(NaiveTime::MIN))
}

/// Local calendar date of a UTC instant
pub fn local_date(tz: Tz, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// `[midnight, next midnight)` for one local date
pub fn day_range(tz: Tz, date: NaiveDate) -> DateRange {
    DateRange::new(start_of_day(tz, date), start_of_day(tz, date + Duration::days(1)))
}

/// Twelve-hour label such as `12 AM`, `9 AM` or `3 PM`
pub fn hour_label(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display} {suffix}")
}

/// Buckets for `period` as of `now`, oldest first
pub fn period_buckets(period: Period, tz: Tz, now: DateTime<Utc>) -> Vec<BucketWindow> {
    let today = local_date(tz, now);
    match period {
        Period::Day => hourly(tz, today),
        Period::Week => daily(tz, today),
        Period::Month => weekly(tz, today),
    }
}

/// Union of the period's buckets
pub fn period_range(period: Period, tz: Tz, now: DateTime<Utc>) -> DateRange {
    let today = local_date(tz, now);
    match period {
        Period::Day => day_range(tz, today),
        Period::Week => DateRange::new(
            start_of_day(tz, today - Duration::days(6)),
            start_of_day(tz, today + Duration::days(1)),
        ),
        Period::Month => {
            let monday = week_start(today);
            DateRange::new(
                start_of_day(tz, monday - Duration::weeks(3)),
                start_of_day(tz, monday + Duration::weeks(1)),
            )
        }
    }
}

/// Trailing `days` local dates ending today, as a range
pub fn trailing_days_range(tz: Tz, now: DateTime<Utc>, days: u32) -> DateRange {
    let today = local_date(tz, now);
    let first = today - Duration::days(i64::from(days.max(1)) - 1);
    DateRange::new(start_of_day(tz, first), start_of_day(tz, today + Duration::days(1)))
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn hourly(tz: Tz, today: NaiveDate) -> Vec<BucketWindow> {
    let day_end = start_of_day(tz, today + Duration::days(1));
    let mut starts: Vec<(u32, DateTime<Utc>)> = (0..24)
        .filter_map(|hour| {
            NaiveTime::from_hms_opt(hour, 0, 0)
                .map(|time| (hour, local_to_utc(tz, today.and_time(time))))
        })
        .collect();
    starts.push((24, day_end));

    starts
        .windows(2)
        .map(|pair| BucketWindow {
            label: hour_label(pair[0].0),
            date: today,
            start: pair[0].1,
            end: pair[1].1.max(pair[0].1),
        })
        .collect()
}

fn daily(tz: Tz, today: NaiveDate) -> Vec<BucketWindow> {
    (0..7)
        .rev()
        .map(|days_ago| {
            let date = today - Duration::days(days_ago);
            let range = day_range(tz, date);
            BucketWindow {
                label: date.format("%a").to_string(),
                date,
                start: range.start,
                end: range.end,
            }
        })
        .collect()
}

fn weekly(tz: Tz, today: NaiveDate) -> Vec<BucketWindow> {
    let current = week_start(today);
    (0..4)
        .rev()
        .map(|weeks_ago| {
            let monday = current - Duration::weeks(weeks_ago);
            BucketWindow {
                label: format!("Week of {}", monday.format("%b %d")),
                date: monday,
                start: start_of_day(tz, monday),
                end: start_of_day(tz, monday + Duration::weeks(1)),
            }
        })
        .collect()
}
