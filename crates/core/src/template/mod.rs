//! Timer templates
//!
//! A template is a named preset (task, mode, countdown length, tags) that
//! stamps out new timers and tracks how often it is used.

pub mod ports;
pub mod service;

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use tempo_common::time::format_hms;
use tempo_common::validation::{StringValidator, Validator};
use tempo_domain::constants::{
    COUNTDOWN_DURATION_REQUIRED, DEFAULT_TASK_NAME, MAX_NOTES_LENGTH, MAX_TASK_NAME_LENGTH,
    MAX_TEMPLATE_TAGS_LENGTH, NO_TARGET_PLACEHOLDER,
};
use tempo_domain::{
    Result, TemplateKind, Timer, TimerKind, TimerOverrides, TimerStatus, TimerTemplate, TimerType,
};
use uuid::Uuid;

pub use ports::TemplateRepository;
pub use service::TemplateService;

use crate::timer::factory::{create_timer, CountdownInput, NewTimer};
use crate::timer::tags::join_tags;
use crate::validation::finish;

/// Check a template before it is stored
///
/// # Errors
///
/// Returns `TempoError::Validation` listing every offending field.
pub fn validate_template(template: &TimerTemplate) -> Result<()> {
    let mut validator = Validator::new();
    validator.validate_field("name", template.name.as_str(), &StringValidator::new().not_empty());
    if let Some(task_name) = template.task_name.as_deref() {
        validator.validate_field(
            "task_name",
            task_name,
            &StringValidator::new().max_length(MAX_TASK_NAME_LENGTH).trim(false),
        );
    }
    validator.validate_field(
        "tags",
        join_tags(&template.tags).as_str(),
        &StringValidator::new().max_length(MAX_TEMPLATE_TAGS_LENGTH).trim(false),
    );
    if let Some(notes) = template.notes.as_deref() {
        validator.validate_field(
            "notes",
            notes,
            &StringValidator::new().max_length(MAX_NOTES_LENGTH).trim(false),
        );
    }
    if let TemplateKind::Countdown { target_duration } = template.kind {
        validator.ensure(target_duration > 0, "target_duration", COUNTDOWN_DURATION_REQUIRED);
    }
    finish(validator)
}

/// Stamp out a stopped timer from `template` and record the use
///
/// Overrides win over the template's own values. Usage is only recorded
/// when the resulting timer is valid.
///
/// # Errors
///
/// Returns `TempoError::Validation` when the combined values are invalid.
pub fn instantiate(
    template: &mut TimerTemplate,
    owner_id: Uuid,
    overrides: TimerOverrides,
    now: DateTime<Utc>,
) -> Result<Timer> {
    let task_name = overrides
        .task_name
        .or_else(|| template.task_name.clone())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TASK_NAME.to_string());

    let new = NewTimer {
        task_name,
        timer_type: template.timer_type(),
        countdown: template.kind.target_duration().map(CountdownInput::from_seconds),
        tags: overrides.tags.or_else(|| Some(join_tags(&template.tags))),
        notes: overrides.notes.or_else(|| template.notes.clone()),
        initial_status: TimerStatus::Stopped,
        save_as_template: false,
    };
    let timer = create_timer(new, owner_id, now)?;

    template.usage_count = template.usage_count.saturating_add(1);
    template.last_used_at = Some(now);
    template.updated_at = now;
    Ok(timer)
}

/// Name given to templates saved alongside a new timer
pub fn default_template_name(task_name: &str) -> String {
    format!("{task_name} Template")
}

/// Snapshot an existing timer as a new template
pub fn template_from_timer(timer: &Timer, name: impl Into<String>, now: DateTime<Utc>) -> TimerTemplate {
    let kind = match timer.kind {
        TimerKind::Stopwatch => TemplateKind::Stopwatch,
        TimerKind::Countdown { target_duration, .. } => TemplateKind::Countdown { target_duration },
    };

    let mut template = TimerTemplate::new(timer.owner_id, name, kind, now);
    template.task_name = Some(timer.task_name.clone());
    template.tags = timer.tags.clone();
    template.notes = timer.notes.clone();
    template
}

/// `HH:MM:SS` countdown length, or an em dash for stopwatch templates
pub fn formatted_target(template: &TimerTemplate) -> String {
    template
        .kind
        .target_duration()
        .map_or_else(|| NO_TARGET_PLACEHOLDER.to_string(), format_hms)
}

/// Highest usage first; ties keep their input order
pub fn most_used(mut templates: Vec<TimerTemplate>) -> Vec<TimerTemplate> {
    templates.sort_by_key(|template| Reverse(template.usage_count));
    templates
}

/// Most recently used first; never-used templates go last
pub fn recently_used(mut templates: Vec<TimerTemplate>) -> Vec<TimerTemplate> {
    templates.sort_by_key(|template| (template.last_used_at.is_none(), Reverse(template.last_used_at)));
    templates
}

/// Templates of one counting mode
pub fn by_type(templates: Vec<TimerTemplate>, timer_type: TimerType) -> Vec<TimerTemplate> {
    templates.into_iter().filter(|template| template.timer_type() == timer_type).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use tempo_domain::TempoError;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 10, 9, 0, 0).unwrap()
    }

    fn pomodoro() -> TimerTemplate {
        let mut template = TimerTemplate::new(
            Uuid::nil(),
            "Pomodoro",
            TemplateKind::Countdown { target_duration: 1500 },
            now(),
        );
        template.task_name = Some("Focus block".to_string());
        template.tags = vec!["focus".to_string(), "deep".to_string()];
        template
    }

    #[test]
    fn test_instantiate_copies_template() {
        let mut template = pomodoro();
        let later = now() + Duration::hours(1);

        let timer = instantiate(&mut template, Uuid::nil(), TimerOverrides::default(), later).unwrap();

        assert_eq!(timer.task_name, "Focus block");
        assert_eq!(timer.status, TimerStatus::Stopped);
        assert_eq!(timer.target_duration(), Some(1500));
        assert_eq!(timer.remaining_duration(), Some(1500));
        assert_eq!(timer.tags, vec!["focus", "deep"]);
        assert_eq!(template.usage_count, 1);
        assert_eq!(template.last_used_at, Some(later));
    }

    #[test]
    fn test_instantiate_overrides_win() {
        let mut template = pomodoro();
        let overrides = TimerOverrides {
            task_name: Some("Review PRs".to_string()),
            tags: Some("review".to_string()),
            notes: Some("two repos".to_string()),
        };

        let timer = instantiate(&mut template, Uuid::nil(), overrides, now()).unwrap();

        assert_eq!(timer.task_name, "Review PRs");
        assert_eq!(timer.tags, vec!["review"]);
        assert_eq!(timer.notes.as_deref(), Some("two repos"));
    }

    #[test]
    fn test_instantiate_default_task_name() {
        let mut template = TimerTemplate::new(Uuid::nil(), "Blank", TemplateKind::Stopwatch, now());
        let timer = instantiate(&mut template, Uuid::nil(), TimerOverrides::default(), now()).unwrap();
        assert_eq!(timer.task_name, "New Timer");
        assert!(timer.tags.is_empty());
    }

    #[test]
    fn test_invalid_instantiation_does_not_count_usage() {
        let mut template = pomodoro();
        let overrides = TimerOverrides { notes: Some("n".repeat(MAX_NOTES_LENGTH + 1)), ..Default::default() };

        assert!(matches!(
            instantiate(&mut template, Uuid::nil(), overrides, now()),
            Err(TempoError::Validation(_))
        ));
        assert_eq!(template.usage_count, 0);
    }

    #[test]
    fn test_validate_template_rules() {
        let mut template = pomodoro();
        template.name = " ".to_string();
        template.kind = TemplateKind::Countdown { target_duration: 0 };
        template.tags = vec!["t".repeat(MAX_TEMPLATE_TAGS_LENGTH + 1)];

        let Err(TempoError::Validation(violations)) = validate_template(&template) else {
            panic!("expected validation error");
        };
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "tags", "target_duration"]);
    }

    #[test]
    fn test_template_from_countdown_timer() {
        let timer = instantiate(&mut pomodoro(), Uuid::nil(), TimerOverrides::default(), now()).unwrap();
        let template = template_from_timer(&timer, default_template_name(&timer.task_name), now());

        assert_eq!(template.name, "Focus block Template");
        assert_eq!(template.kind, TemplateKind::Countdown { target_duration: 1500 });
        assert_eq!(template.usage_count, 0);
        assert!(validate_template(&template).is_ok());
    }

    #[test]
    fn test_formatted_target() {
        assert_eq!(formatted_target(&pomodoro()), "00:25:00");
        let stopwatch = TimerTemplate::new(Uuid::nil(), "Open", TemplateKind::Stopwatch, now());
        assert_eq!(formatted_target(&stopwatch), "\u{2014}");
    }

    #[test]
    fn test_sorting_helpers() {
        let mut a = TimerTemplate::new(Uuid::nil(), "a", TemplateKind::Stopwatch, now());
        a.usage_count = 1;
        a.last_used_at = Some(now());
        let mut b = pomodoro();
        b.usage_count = 5;
        b.last_used_at = Some(now() - Duration::days(1));
        let c = TimerTemplate::new(Uuid::nil(), "c", TemplateKind::Stopwatch, now());

        let names = |list: Vec<TimerTemplate>| list.into_iter().map(|t| t.name).collect::<Vec<_>>();
        let all = vec![a.clone(), b.clone(), c.clone()];

        assert_eq!(names(most_used(all.clone())), vec!["Pomodoro", "a", "c"]);
        assert_eq!(names(recently_used(vec![c, b, a])), vec!["a", "Pomodoro", "c"]);
        assert_eq!(names(by_type(all, TimerType::Stopwatch)), vec!["a", "c"]);
    }
}
