//! Timer creation and detail edits
//!
//! Both paths validate every field first and only then build the record, so
//! a rejected request never produces a half-initialised timer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempo_common::validation::{StringValidator, Validator};
use tempo_domain::constants::{
    COUNTDOWN_DURATION_REQUIRED, COUNTDOWN_DURATION_TOO_LONG, MAX_NOTES_LENGTH,
    MAX_TASK_NAME_LENGTH,
};
use tempo_domain::{Result, Timer, TimerKind, TimerStatus, TimerType};
use uuid::Uuid;

use super::tags::parse_tags;
use crate::validation::finish;

/// Countdown length as entered on a form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownInput {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownInput {
    pub const fn new(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self { hours, minutes, seconds }
    }

    pub const fn from_seconds(seconds: i64) -> Self {
        Self { hours: 0, minutes: 0, seconds }
    }

    /// Combined length in seconds, `None` when it does not fit in an `i64`
    pub fn total_seconds(&self) -> Option<i64> {
        self.hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)
    }
}

/// Request to create a timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimer {
    pub task_name: String,
    pub timer_type: TimerType,
    /// Required for countdowns, ignored for stopwatches
    pub countdown: Option<CountdownInput>,
    /// Raw comma-delimited tags
    pub tags: Option<String>,
    pub notes: Option<String>,
    /// `pending` for direct creation, `stopped` for form and template flows
    pub initial_status: TimerStatus,
    /// Also snapshot the new timer as a template named "<task> Template"
    #[serde(default)]
    pub save_as_template: bool,
}

impl NewTimer {
    pub fn stopwatch(task_name: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            timer_type: TimerType::Stopwatch,
            countdown: None,
            tags: None,
            notes: None,
            initial_status: TimerStatus::Pending,
            save_as_template: false,
        }
    }

    pub fn countdown(task_name: impl Into<String>, length: CountdownInput) -> Self {
        Self { timer_type: TimerType::Countdown, countdown: Some(length), ..Self::stopwatch(task_name) }
    }

    #[must_use]
    pub fn with_tags(mut self, raw: impl Into<String>) -> Self {
        self.tags = Some(raw.into());
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: TimerStatus) -> Self {
        self.initial_status = status;
        self
    }

    #[must_use]
    pub const fn saved_as_template(mut self) -> Self {
        self.save_as_template = true;
        self
    }

    fn countdown_seconds(&self) -> Option<i64> {
        self.countdown.map_or(Some(0), |input| input.total_seconds())
    }
}

/// Edit of a timer's descriptive fields; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerUpdate {
    pub task_name: Option<String>,
    /// Raw comma-delimited tags; an empty string clears them
    pub tags: Option<String>,
    /// An empty string clears the notes
    pub notes: Option<String>,
}

fn check_task_name(validator: &mut Validator, task_name: &str) {
    let rule = StringValidator::new().not_empty().max_length(MAX_TASK_NAME_LENGTH);
    validator.validate_field("task_name", task_name, &rule);
}

fn check_notes(validator: &mut Validator, notes: Option<&str>) {
    if let Some(notes) = notes {
        let rule = StringValidator::new().max_length(MAX_NOTES_LENGTH).trim(false);
        validator.validate_field("notes", notes, &rule);
    }
}

/// Check a creation request without building anything
///
/// # Errors
///
/// Returns `TempoError::Validation` listing every offending field.
pub fn validate_new_timer(new: &NewTimer) -> Result<()> {
    let mut validator = Validator::new();
    check_task_name(&mut validator, &new.task_name);
    check_notes(&mut validator, new.notes.as_deref());
    validator.ensure(
        matches!(new.initial_status, TimerStatus::Pending | TimerStatus::Stopped),
        "status",
        "is not included in the list",
    );
    if new.timer_type == TimerType::Countdown {
        match new.countdown_seconds() {
            Some(seconds) => {
                validator.ensure(seconds > 0, "target_duration", COUNTDOWN_DURATION_REQUIRED);
            }
            None => validator.add_error("target_duration", COUNTDOWN_DURATION_TOO_LONG),
        }
    }
    finish(validator)
}

/// Validate and build a new timer owned by `owner_id`
///
/// # Errors
///
/// Returns `TempoError::Validation` when any field is invalid.
pub fn create_timer(new: NewTimer, owner_id: Uuid, now: DateTime<Utc>) -> Result<Timer> {
    validate_new_timer(&new)?;

    let kind = match new.timer_type {
        TimerType::Stopwatch => TimerKind::Stopwatch,
        TimerType::Countdown => TimerKind::countdown(new.countdown_seconds().unwrap_or_default()),
    };

    let mut timer = Timer::new(owner_id, new.task_name.trim(), kind, now);
    timer.status = new.initial_status;
    timer.tags = new.tags.as_deref().map(parse_tags).unwrap_or_default();
    timer.notes = new.notes.filter(|notes| !notes.is_empty());
    Ok(timer)
}

/// Apply a detail edit, returning the edited copy
///
/// # Errors
///
/// Returns `TempoError::Validation` when the edited fields are invalid; the
/// input timer is not modified either way.
pub fn update_details(timer: &Timer, update: TimerUpdate, now: DateTime<Utc>) -> Result<Timer> {
    let mut validator = Validator::new();
    if let Some(task_name) = update.task_name.as_deref() {
        check_task_name(&mut validator, task_name);
    }
    check_notes(&mut validator, update.notes.as_deref());
    finish(validator)?;

    let mut next = timer.clone();
    if let Some(task_name) = update.task_name {
        next.task_name = task_name.trim().to_string();
    }
    if let Some(raw) = update.tags {
        next.tags = parse_tags(&raw);
    }
    if let Some(notes) = update.notes {
        next.notes = Some(notes).filter(|notes| !notes.is_empty());
    }
    next.updated_at = now;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempo_domain::{FieldViolation, TempoError};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 10, 9, 0, 0).unwrap()
    }

    fn violations(result: Result<Timer>) -> Vec<FieldViolation> {
        match result {
            Err(TempoError::Validation(violations)) => violations,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_stopwatch() {
        let timer = create_timer(
            NewTimer::stopwatch("  Write report ").with_tags("work, urgent").with_notes("draft"),
            Uuid::nil(),
            now(),
        )
        .unwrap();

        assert_eq!(timer.task_name, "Write report");
        assert_eq!(timer.status, TimerStatus::Pending);
        assert_eq!(timer.tags, vec!["work", "urgent"]);
        assert_eq!(timer.notes.as_deref(), Some("draft"));
        assert!(timer.is_stopwatch());
    }

    #[test]
    fn test_create_countdown_from_parts() {
        let new = NewTimer::countdown("Tea", CountdownInput::new(0, 4, 30))
            .with_status(TimerStatus::Stopped);
        let timer = create_timer(new, Uuid::nil(), now()).unwrap();

        assert_eq!(timer.target_duration(), Some(270));
        assert_eq!(timer.remaining_duration(), Some(270));
        assert_eq!(timer.status, TimerStatus::Stopped);
    }

    #[test]
    fn test_zero_countdown_rejected() {
        let found = violations(create_timer(
            NewTimer::countdown("Tea", CountdownInput::default()),
            Uuid::nil(),
            now(),
        ));
        assert_eq!(
            found,
            vec![FieldViolation::new("target_duration", COUNTDOWN_DURATION_REQUIRED)]
        );
    }

    #[test]
    fn test_oversized_countdown_rejected() {
        let huge = CountdownInput::new(i64::MAX / 1000, 0, 0);
        assert_eq!(huge.total_seconds(), None);

        let found = violations(create_timer(NewTimer::countdown("Tea", huge), Uuid::nil(), now()));
        assert_eq!(
            found,
            vec![FieldViolation::new("target_duration", COUNTDOWN_DURATION_TOO_LONG)]
        );

        let edge = CountdownInput::new(0, 0, i64::MAX);
        assert_eq!(edge.total_seconds(), Some(i64::MAX));
        assert_eq!(CountdownInput::new(0, i64::MAX, 0).total_seconds(), None);
    }

    #[test]
    fn test_all_violations_reported_together() {
        let new = NewTimer {
            countdown: None,
            ..NewTimer::countdown("   ", CountdownInput::default())
        }
        .with_notes("x".repeat(MAX_NOTES_LENGTH + 1));

        let fields: Vec<String> =
            violations(create_timer(new, Uuid::nil(), now())).into_iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["task_name", "notes", "target_duration"]);
    }

    #[test]
    fn test_task_name_length_limit() {
        let long = "a".repeat(MAX_TASK_NAME_LENGTH + 1);
        let found = violations(create_timer(NewTimer::stopwatch(long), Uuid::nil(), now()));
        assert_eq!(found[0].message, "is too long (maximum is 255 characters)");
    }

    #[test]
    fn test_active_initial_status_rejected() {
        let new = NewTimer::stopwatch("Plan").with_status(TimerStatus::Running);
        let found = violations(create_timer(new, Uuid::nil(), now()));
        assert_eq!(found[0].field, "status");
    }

    #[test]
    fn test_update_details() {
        let timer = create_timer(NewTimer::stopwatch("Plan").with_notes("old"), Uuid::nil(), now())
            .unwrap();
        let later = now() + chrono::Duration::minutes(5);

        let edited = update_details(
            &timer,
            TimerUpdate { task_name: Some("Plan sprint".into()), tags: Some("team".into()), notes: Some(String::new()) },
            later,
        )
        .unwrap();

        assert_eq!(edited.task_name, "Plan sprint");
        assert_eq!(edited.tags, vec!["team"]);
        assert_eq!(edited.notes, None);
        assert_eq!(edited.updated_at, later);
        assert_eq!(timer.task_name, "Plan");
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let timer = create_timer(NewTimer::stopwatch("Plan"), Uuid::nil(), now()).unwrap();
        let result = update_details(
            &timer,
            TimerUpdate { task_name: Some(" ".into()), ..TimerUpdate::default() },
            now(),
        );
        assert_eq!(violations(result)[0].message, "can't be blank");
    }
}
