//! End-to-end coverage for the core services over the SQLite repositories.
//!
//! Each test operates on an isolated database with the schema applied and
//! drives time with a mock clock.

mod support;

use support::TestDatabase;
use tempo_common::testing::{frozen_clock, utc};
use tempo_core::{
    AnalyticsEngine, AnalyticsService, CountdownInput, NewTimer, TagRepository, TemplateService,
    TimerService, TimerUpdate,
};
use tempo_domain::{Period, TempoError, TimerOverrides, TimerStatus};
use uuid::Uuid;

#[tokio::test(flavor = "multi_thread")]
async fn timer_lifecycle_persists_through_sqlite() {
    let db = TestDatabase::new();
    let clock = frozen_clock(utc(2025, 3, 5, 9, 0, 0));
    let service = TimerService::new(db.timers(), db.tags(), clock.shared());
    let owner = Uuid::now_v7();

    let timer = service
        .create_timer(owner, NewTimer::stopwatch("Write report").with_tags("Work, writing"))
        .await
        .expect("timer created");

    service.start(owner, timer.id).await.expect("started");
    clock.advance_secs(30);
    service.pause(owner, timer.id).await.expect("paused");
    clock.advance_secs(30);
    service.resume(owner, timer.id).await.expect("resumed");
    clock.advance_secs(45);
    let stopped = service.stop(owner, timer.id).await.expect("stopped");

    let reloaded = service.get_timer(owner, timer.id).await.expect("reloaded");
    assert_eq!(reloaded, stopped);
    assert_eq!(reloaded.duration, 75);
    assert_eq!(reloaded.tags, vec!["Work".to_string(), "writing".to_string()]);

    let linked: Vec<String> =
        db.tags().tags_for_timer(timer.id).await.unwrap().into_iter().map(|tag| tag.name).collect();
    assert_eq!(linked, vec!["work".to_string(), "writing".to_string()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn countdown_expiry_is_written_back() {
    let db = TestDatabase::new();
    let clock = frozen_clock(utc(2025, 3, 5, 9, 0, 0));
    let service = TimerService::new(db.timers(), db.tags(), clock.shared());
    let owner = Uuid::now_v7();

    let timer = service
        .create_timer(owner, NewTimer::countdown("Tea", CountdownInput::new(0, 3, 0)))
        .await
        .expect("timer created");
    service.start(owner, timer.id).await.expect("started");

    clock.advance_secs(200);
    let events = service.refresh(owner).await.expect("refreshed");
    assert_eq!(events.len(), 1);

    let fresh = TimerService::new(db.timers(), db.tags(), clock.shared());
    let stored = fresh.get_timer(owner, timer.id).await.expect("reloaded");
    assert_eq!(stored.status, TimerStatus::Expired);
    assert_eq!(stored.duration, 180);
}

#[tokio::test(flavor = "multi_thread")]
async fn editing_tags_resyncs_links_and_delete_cascades() {
    let db = TestDatabase::new();
    let clock = frozen_clock(utc(2025, 3, 5, 9, 0, 0));
    let service = TimerService::new(db.timers(), db.tags(), clock.shared());
    let owner = Uuid::now_v7();

    let timer = service
        .create_timer(owner, NewTimer::stopwatch("Plan").with_tags("work, urgent"))
        .await
        .expect("timer created");
    service
        .update_details(
            owner,
            timer.id,
            TimerUpdate { tags: Some(String::new()), ..TimerUpdate::default() },
        )
        .await
        .expect("updated");
    assert_eq!(db.count("timer_tags"), 0);

    service
        .update_details(owner, timer.id, TimerUpdate { tags: Some("home".into()), ..TimerUpdate::default() })
        .await
        .expect("updated");
    assert_eq!(db.count("timer_tags"), 1);

    service.delete_timer(owner, timer.id).await.expect("deleted");
    assert_eq!(db.count("timer_tags"), 0);
    assert_eq!(db.count("tags"), 3);

    let err = service.get_timer(owner, timer.id).await.unwrap_err();
    assert!(matches!(err, TempoError::NotFound(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn template_instantiation_round_trip() {
    let db = TestDatabase::new();
    let clock = frozen_clock(utc(2025, 4, 1, 8, 0, 0));
    let timers = TimerService::new(db.timers(), db.tags(), clock.shared()).with_templates(db.templates());
    let templates = TemplateService::new(db.templates(), db.timers(), db.tags(), clock.shared());
    let owner = Uuid::now_v7();

    timers
        .create_timer(
            owner,
            NewTimer::countdown("Pomodoro", CountdownInput::new(0, 25, 0))
                .with_tags("focus")
                .saved_as_template(),
        )
        .await
        .expect("timer created");

    let saved = templates.most_used(owner).await.expect("listed");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].name, "Pomodoro Template");

    clock.advance_secs(3600);
    let timer = templates
        .instantiate(owner, saved[0].id, TimerOverrides::default())
        .await
        .expect("instantiated");
    assert_eq!(timer.status, TimerStatus::Stopped);
    assert_eq!(timer.target_duration(), Some(1500));

    let used = templates.recently_used(owner).await.expect("listed");
    assert_eq!(used[0].usage_count, 1);
    assert_eq!(used[0].last_used_at, Some(utc(2025, 4, 1, 9, 0, 0)));
}

#[tokio::test(flavor = "multi_thread")]
async fn analytics_over_sqlite_matches_in_memory_semantics() {
    let db = TestDatabase::new();
    let clock = frozen_clock(utc(2025, 3, 3, 9, 0, 0));
    let timers = TimerService::new(db.timers(), db.tags(), clock.shared());
    let owner = Uuid::now_v7();

    // One 20 minute session per day, Monday to Wednesday
    for (day, task) in [(3, "Write"), (4, "Write"), (5, "Review")] {
        clock.set(utc(2025, 3, day, 9, 0, 0));
        let timer = timers
            .create_timer(owner, NewTimer::stopwatch(task).with_tags("work"))
            .await
            .expect("created");
        timers.start(owner, timer.id).await.expect("started");
        clock.advance_secs(1200);
        timers.stop(owner, timer.id).await.expect("stopped");
    }
    clock.set(utc(2025, 3, 5, 18, 0, 0));

    let analytics = AnalyticsService::new(db.timers(), AnalyticsEngine::default(), clock.shared());
    let dashboard = analytics.dashboard(owner, Period::Week).await.expect("dashboard");

    assert_eq!(dashboard.total_time, 3600);
    assert_eq!(dashboard.total_tasks, 3);
    assert_eq!(dashboard.top_tasks[0].task_name, "Write");
    assert_eq!(dashboard.top_tasks[0].duration, 2400);
    assert_eq!(dashboard.tag_breakdown.len(), 1);
    assert_eq!(dashboard.current_streak, 3);

    let summary = analytics.summary(owner).await.expect("summary");
    assert_eq!(summary.timer_count, 3);
    assert_eq!(summary.total_time_today, 1200);
    assert_eq!(summary.recent_timers.len(), 3);
}
