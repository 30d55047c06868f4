//! Template service - create, list and instantiate templates

use std::sync::Arc;

use tempo_common::time::SharedClock;
use tempo_domain::{Result, TempoError, Timer, TimerOverrides, TimerTemplate};
use tracing::{debug, info};
use uuid::Uuid;

use super::ports::TemplateRepository;
use super::{instantiate, most_used, recently_used, template_from_timer, validate_template};
use crate::timer::ports::{TagRepository, TimerRepository};
use crate::timer::tags::normalize_tag_names;

/// Template service
pub struct TemplateService {
    templates: Arc<dyn TemplateRepository>,
    timers: Arc<dyn TimerRepository>,
    tags: Arc<dyn TagRepository>,
    clock: SharedClock,
}

impl TemplateService {
    /// Create a new template service
    pub fn new(
        templates: Arc<dyn TemplateRepository>,
        timers: Arc<dyn TimerRepository>,
        tags: Arc<dyn TagRepository>,
        clock: SharedClock,
    ) -> Self {
        Self { templates, timers, tags, clock }
    }

    /// Validate and store a new template
    ///
    /// # Errors
    ///
    /// `TempoError::Validation` for invalid fields or a name the owner
    /// already uses; repository errors are passed through.
    pub async fn create_template(&self, template: TimerTemplate) -> Result<TimerTemplate> {
        validate_template(&template)?;
        ensure_unique_name(self.templates.as_ref(), &template).await?;

        self.templates.save_template(&template).await?;
        info!(template_id = %template.id, owner_id = %template.owner_id, name = %template.name, "Template created");
        Ok(template)
    }

    /// Save an existing timer as a template
    ///
    /// # Errors
    ///
    /// `TempoError::NotFound` when the timer does not exist, otherwise as
    /// [`Self::create_template`].
    pub async fn create_from_timer(
        &self,
        owner_id: Uuid,
        timer_id: Uuid,
        name: &str,
    ) -> Result<TimerTemplate> {
        let timer = self
            .timers
            .find_timer(owner_id, timer_id)
            .await?
            .ok_or_else(|| TempoError::NotFound(format!("timer {timer_id}")))?;
        self.create_template(template_from_timer(&timer, name, self.clock.now())).await
    }

    /// All templates, highest usage first
    ///
    /// # Errors
    ///
    /// Repository errors are passed through.
    pub async fn most_used(&self, owner_id: Uuid) -> Result<Vec<TimerTemplate>> {
        Ok(most_used(self.templates.list_templates(owner_id).await?))
    }

    /// All templates, most recently used first
    ///
    /// # Errors
    ///
    /// Repository errors are passed through.
    pub async fn recently_used(&self, owner_id: Uuid) -> Result<Vec<TimerTemplate>> {
        Ok(recently_used(self.templates.list_templates(owner_id).await?))
    }

    /// Create and store a timer from a template, recording the use
    ///
    /// # Errors
    ///
    /// `TempoError::NotFound` for an unknown template,
    /// `TempoError::Validation` when overrides are invalid.
    pub async fn instantiate(
        &self,
        owner_id: Uuid,
        template_id: Uuid,
        overrides: TimerOverrides,
    ) -> Result<Timer> {
        let mut template = self.find(owner_id, template_id).await?;
        let timer = instantiate(&mut template, owner_id, overrides, self.clock.now())?;

        self.timers.save(&timer).await?;
        if !timer.tags.is_empty() {
            self.tags.sync_timer_tags(timer.id, &normalize_tag_names(&timer.tags)).await?;
        }
        self.templates.save_template(&template).await?;

        debug!(
            template_id = %template.id,
            timer_id = %timer.id,
            usage_count = template.usage_count,
            "Timer created from template"
        );
        Ok(timer)
    }

    /// Remove a template
    ///
    /// # Errors
    ///
    /// `TempoError::NotFound` when nothing was deleted.
    pub async fn delete_template(&self, owner_id: Uuid, template_id: Uuid) -> Result<()> {
        if self.templates.delete_template(owner_id, template_id).await? {
            Ok(())
        } else {
            Err(TempoError::NotFound(format!("template {template_id}")))
        }
    }

    async fn find(&self, owner_id: Uuid, template_id: Uuid) -> Result<TimerTemplate> {
        self.templates
            .find_template(owner_id, template_id)
            .await?
            .ok_or_else(|| TempoError::NotFound(format!("template {template_id}")))
    }
}

/// Template names are unique per owner
pub(crate) async fn ensure_unique_name(
    templates: &dyn TemplateRepository,
    template: &TimerTemplate,
) -> Result<()> {
    let existing = templates.list_templates(template.owner_id).await?;
    let taken = existing.iter().any(|other| other.id != template.id && other.name == template.name);
    if taken {
        return Err(TempoError::validation("name", "has already been taken"));
    }
    Ok(())
}
