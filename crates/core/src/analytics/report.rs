//! Period and tag breakdowns
//!
//! One bucket-and-sum pass serves every granularity: the period decides the
//! bucket windows, and each timer in the window adds its duration to the
//! bucket containing its `created_at`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tempo_domain::constants::UNTAGGED_LABEL;
use tempo_domain::{AnalyticsReport, Bucket, Period, TagStat, TaskTotal, Timer};

use super::buckets::{period_buckets, BucketWindow};
use crate::timer::elapsed::calculate_duration;

/// Summed duration and count keyed by name, in first-seen order
#[derive(Debug, Default)]
pub(crate) struct Tally {
    entries: Vec<(String, i64, u32)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub(crate) fn add(&mut self, name: &str, duration: i64) {
        if let Some(&idx) = self.index.get(name) {
            let entry = &mut self.entries[idx];
            entry.1 += duration;
            entry.2 += 1;
        } else {
            self.index.insert(name.to_string(), self.entries.len());
            self.entries.push((name.to_string(), duration, 1));
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Largest durations first; equal durations keep first-seen order
    pub(crate) fn top(mut self, limit: usize) -> Vec<(String, i64, u32)> {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries.truncate(limit);
        self.entries
    }
}

/// Index of the bucket containing `instant`, if any
fn bucket_index(windows: &[BucketWindow], instant: DateTime<Utc>) -> Option<usize> {
    let idx = windows.partition_point(|window| window.end <= instant);
    windows.get(idx).filter(|window| window.start <= instant && instant < window.end).map(|_| idx)
}

/// Timers in the period's window paired with their bucket and duration
fn bucketed<'a>(
    windows: &'a [BucketWindow],
    timers: &'a [Timer],
    now: DateTime<Utc>,
) -> impl Iterator<Item = (usize, &'a Timer, i64)> + 'a {
    timers.iter().filter_map(move |timer| {
        bucket_index(windows, timer.created_at)
            .map(|idx| (idx, timer, calculate_duration(timer, now)))
    })
}

/// Period breakdown with totals and top tasks
pub fn analytics_for(
    period: Period,
    timers: &[Timer],
    tz: Tz,
    now: DateTime<Utc>,
    top_tasks_limit: usize,
) -> AnalyticsReport {
    let windows = period_buckets(period, tz, now);
    let mut breakdown: Vec<Bucket> = windows
        .iter()
        .map(|window| Bucket {
            label: window.label.clone(),
            date: window.date,
            start: window.start,
            end: window.end,
            total_duration: 0,
            task_count: 0,
        })
        .collect();

    let mut tasks = Tally::default();
    let mut total_time = 0;
    let mut total_tasks = 0;
    for (idx, timer, duration) in bucketed(&windows, timers, now) {
        breakdown[idx].total_duration += duration;
        breakdown[idx].task_count += 1;
        total_time += duration;
        total_tasks += 1;
        tasks.add(&timer.task_name, duration);
    }

    let top_tasks = tasks
        .top(top_tasks_limit)
        .into_iter()
        .map(|(task_name, duration, _)| TaskTotal { task_name, duration })
        .collect();

    AnalyticsReport { period, breakdown, total_time, total_tasks, top_tasks }
}

/// Per-tag totals over the period's window
///
/// A timer's full duration counts toward each of its tags. Timers without
/// tags count toward `Untagged`.
pub fn tag_analytics(
    period: Period,
    timers: &[Timer],
    tz: Tz,
    now: DateTime<Utc>,
    top_tags_limit: usize,
) -> Vec<TagStat> {
    let windows = period_buckets(period, tz, now);
    let mut tags = Tally::default();

    for (_, timer, duration) in bucketed(&windows, timers, now) {
        if timer.tags.is_empty() {
            tags.add(UNTAGGED_LABEL, duration);
        }
        for tag in &timer.tags {
            tags.add(tag, duration);
        }
    }

    tags.top(top_tags_limit)
        .into_iter()
        .map(|(name, duration, count)| TagStat { name, duration, count })
        .collect()
}
