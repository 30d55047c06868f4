//! Timer service - load, transition and persist timers

use std::sync::Arc;

use tempo_common::time::SharedClock;
use tempo_domain::{DateRange, Result, Tag, TempoError, Timer, TimerEvent, TimerView};
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::engine::TimerEngine;
use super::factory::{self, NewTimer, TimerUpdate};
use super::ports::{TagRepository, TimerNotifier, TimerRepository};
use super::tags::{normalize_tag_names, validate_tag};
use super::transitions::TimerAction;
use crate::template::ports::TemplateRepository;
use crate::template::service::ensure_unique_name;
use crate::template::{default_template_name, template_from_timer, validate_template};

/// Timer service
///
/// Every operation loads the timer scoped to its owner, applies the engine
/// and saves the result. Tag links are re-synced whenever a save changed
/// the tag list.
pub struct TimerService {
    timers: Arc<dyn TimerRepository>,
    tags: Arc<dyn TagRepository>,
    templates: Option<Arc<dyn TemplateRepository>>,
    notifier: Option<Arc<dyn TimerNotifier>>,
    engine: TimerEngine,
}

impl TimerService {
    /// Create a new timer service
    pub fn new(
        timers: Arc<dyn TimerRepository>,
        tags: Arc<dyn TagRepository>,
        clock: SharedClock,
    ) -> Self {
        Self { timers, tags, templates: None, notifier: None, engine: TimerEngine::new(clock) }
    }

    /// Store "save as template" requests through this repository
    pub fn with_templates(mut self, templates: Arc<dyn TemplateRepository>) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Forward expiry events to a notifier
    pub fn with_notifier(mut self, notifier: Arc<dyn TimerNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub const fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    /// Validate, build and store a new timer
    ///
    /// A failed "save as template" is logged and does not undo the timer.
    ///
    /// # Errors
    ///
    /// `TempoError::Validation` for invalid input; repository errors are
    /// passed through.
    pub async fn create_timer(&self, owner_id: Uuid, new: NewTimer) -> Result<Timer> {
        let save_as_template = new.save_as_template;
        let timer = factory::create_timer(new, owner_id, self.engine.now())?;

        self.timers.save(&timer).await?;
        self.sync_tags(&timer).await?;
        debug!(timer_id = %timer.id, owner_id = %owner_id, timer_type = %timer.timer_type(), "Timer created");

        if save_as_template {
            if let Err(err) = self.save_as_template(&timer).await {
                warn!(timer_id = %timer.id, error = %err, "Timer created, but failed to save template");
            }
        }
        Ok(timer)
    }

    /// Load a timer, expiring it first if its countdown ran out
    ///
    /// # Errors
    ///
    /// `TempoError::NotFound` when the owner has no such timer.
    pub async fn get_timer(&self, owner_id: Uuid, timer_id: Uuid) -> Result<Timer> {
        let mut timer = self.load(owner_id, timer_id).await?;
        self.expire_if_due(&mut timer).await?;
        Ok(timer)
    }

    /// Rendered snapshot of a timer
    ///
    /// # Errors
    ///
    /// As [`Self::get_timer`].
    pub async fn view_timer(&self, owner_id: Uuid, timer_id: Uuid) -> Result<TimerView> {
        let timer = self.get_timer(owner_id, timer_id).await?;
        Ok(self.engine.view(&timer))
    }

    /// Apply a lifecycle action and persist the result
    ///
    /// # Errors
    ///
    /// `TempoError::NotFound` for an unknown timer and
    /// `TempoError::InvalidTransition` when the action is not allowed; in
    /// both cases nothing is written.
    pub async fn perform(&self, owner_id: Uuid, timer_id: Uuid, action: TimerAction) -> Result<Timer> {
        let mut timer = self.load(owner_id, timer_id).await?;
        self.engine.apply(&mut timer, action)?;
        self.persist(&timer).await?;
        Ok(timer)
    }

    pub async fn start(&self, owner_id: Uuid, timer_id: Uuid) -> Result<Timer> {
        self.perform(owner_id, timer_id, TimerAction::Start).await
    }

    pub async fn pause(&self, owner_id: Uuid, timer_id: Uuid) -> Result<Timer> {
        self.perform(owner_id, timer_id, TimerAction::Pause).await
    }

    pub async fn resume(&self, owner_id: Uuid, timer_id: Uuid) -> Result<Timer> {
        self.perform(owner_id, timer_id, TimerAction::Resume).await
    }

    pub async fn stop(&self, owner_id: Uuid, timer_id: Uuid) -> Result<Timer> {
        self.perform(owner_id, timer_id, TimerAction::Stop).await
    }

    pub async fn reset(&self, owner_id: Uuid, timer_id: Uuid) -> Result<Timer> {
        self.perform(owner_id, timer_id, TimerAction::Reset).await
    }

    /// Expire a countdown on request, e.g. when a client saw it reach zero
    pub async fn expire(&self, owner_id: Uuid, timer_id: Uuid) -> Result<Timer> {
        let timer = self.perform(owner_id, timer_id, TimerAction::Expire).await?;
        self.notify_expired(&timer).await;
        Ok(timer)
    }

    /// Edit task name, tags or notes
    ///
    /// # Errors
    ///
    /// `TempoError::NotFound` or `TempoError::Validation`.
    pub async fn update_details(
        &self,
        owner_id: Uuid,
        timer_id: Uuid,
        update: TimerUpdate,
    ) -> Result<Timer> {
        let current = self.load(owner_id, timer_id).await?;
        let edited = factory::update_details(&current, update, self.engine.now())?;

        self.timers.save(&edited).await?;
        if edited.tags != current.tags {
            self.sync_tags(&edited).await?;
        }
        Ok(edited)
    }

    /// Delete a timer
    ///
    /// # Errors
    ///
    /// `TempoError::NotFound` when nothing was deleted.
    pub async fn delete_timer(&self, owner_id: Uuid, timer_id: Uuid) -> Result<()> {
        if self.timers.delete(owner_id, timer_id).await? {
            debug!(timer_id = %timer_id, owner_id = %owner_id, "Timer deleted");
            Ok(())
        } else {
            Err(TempoError::NotFound(format!("timer {timer_id}")))
        }
    }

    /// Store a tag under its normalised name
    ///
    /// An existing tag with the same name keeps its id and takes the new
    /// colour.
    ///
    /// # Errors
    ///
    /// `TempoError::Validation` for a blank name or a malformed colour.
    pub async fn save_tag(&self, mut tag: Tag) -> Result<Tag> {
        tag.name = tag.name.trim().to_lowercase();
        validate_tag(&tag)?;

        let stored = self.tags.save_tag(&tag).await?;
        debug!(tag_id = %stored.id, name = %stored.name, color = %stored.color, "Tag saved");
        Ok(stored)
    }

    /// Expire every overdue countdown the owner has running
    ///
    /// # Errors
    ///
    /// Repository errors are passed through.
    pub async fn refresh(&self, owner_id: Uuid) -> Result<Vec<TimerEvent>> {
        let timers = self.timers.load_timers_for_owner(owner_id, DateRange::unbounded()).await?;

        let mut events = Vec::new();
        for mut timer in timers.into_iter().filter(|timer| timer.is_running() && timer.is_countdown()) {
            if let Some(event) = self.expire_if_due(&mut timer).await? {
                events.push(event);
            }
        }
        Ok(events)
    }

    async fn load(&self, owner_id: Uuid, timer_id: Uuid) -> Result<Timer> {
        self.timers
            .find_timer(owner_id, timer_id)
            .await?
            .ok_or_else(|| TempoError::NotFound(format!("timer {timer_id}")))
    }

    async fn expire_if_due(&self, timer: &mut Timer) -> Result<Option<TimerEvent>> {
        let event = self.engine.poll_expiry(timer)?;
        if event.is_some() {
            self.persist(timer).await?;
            self.notify_expired(timer).await;
        }
        Ok(event)
    }

    async fn persist(&self, timer: &Timer) -> Result<()> {
        self.timers.save(timer).await.map_err(|err| {
            error!(timer_id = %timer.id, error = %err, "Failed to persist timer");
            err
        })
    }

    async fn sync_tags(&self, timer: &Timer) -> Result<()> {
        self.tags.sync_timer_tags(timer.id, &normalize_tag_names(&timer.tags)).await
    }

    async fn notify_expired(&self, timer: &Timer) {
        if let Some(notifier) = &self.notifier {
            if let Err(err) = notifier.timer_expired(timer).await {
                error!(timer_id = %timer.id, error = %err, "Failed to deliver expiry notification");
            }
        }
    }

    async fn save_as_template(&self, timer: &Timer) -> Result<()> {
        let Some(templates) = &self.templates else {
            return Err(TempoError::Internal("no template repository configured".to_string()));
        };

        let template = template_from_timer(timer, default_template_name(&timer.task_name), self.engine.now());
        validate_template(&template)?;
        ensure_unique_name(templates.as_ref(), &template).await?;
        templates.save_template(&template).await
    }
}
