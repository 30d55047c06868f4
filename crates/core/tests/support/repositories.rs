//! In-memory port implementations for testing
//!
//! Each mock keeps its state behind an `Arc<Mutex<_>>` so a test can hold a
//! clone and inspect what the service wrote.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempo_core::{TagRepository, TemplateRepository, TimerNotifier, TimerRepository};
use tempo_domain::{DateRange, Result as DomainResult, Tag, TempoError, Timer, TimerTemplate};
use uuid::Uuid;

/// In-memory mock for `TimerRepository`.
#[derive(Default, Clone)]
pub struct InMemoryTimerRepository {
    timers: Arc<Mutex<HashMap<Uuid, Timer>>>,
    saves: Arc<Mutex<usize>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl InMemoryTimerRepository {
    pub fn new(timers: Vec<Timer>) -> Self {
        let repo = Self::default();
        repo.timers.lock().unwrap().extend(timers.into_iter().map(|t| (t.id, t)));
        repo
    }

    pub fn get(&self, id: Uuid) -> Option<Timer> {
        self.timers.lock().unwrap().get(&id).cloned()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub fn fail_saves(&self) {
        *self.fail_saves.lock().unwrap() = true;
    }
}

#[async_trait]
impl TimerRepository for InMemoryTimerRepository {
    async fn find_timer(&self, owner_id: Uuid, id: Uuid) -> DomainResult<Option<Timer>> {
        Ok(self.timers.lock().unwrap().get(&id).filter(|t| t.owner_id == owner_id).cloned())
    }

    async fn load_timers_for_owner(
        &self,
        owner_id: Uuid,
        range: DateRange,
    ) -> DomainResult<Vec<Timer>> {
        let mut timers: Vec<Timer> = self
            .timers
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.owner_id == owner_id && range.contains(t.created_at))
            .cloned()
            .collect();
        timers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(timers)
    }

    async fn save(&self, timer: &Timer) -> DomainResult<()> {
        if *self.fail_saves.lock().unwrap() {
            return Err(TempoError::Database("disk full".to_string()));
        }
        *self.saves.lock().unwrap() += 1;
        self.timers.lock().unwrap().insert(timer.id, timer.clone());
        Ok(())
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> DomainResult<bool> {
        let mut timers = self.timers.lock().unwrap();
        if timers.get(&id).is_some_and(|t| t.owner_id == owner_id) {
            timers.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}

/// In-memory mock for `TagRepository`.
#[derive(Default, Clone)]
pub struct InMemoryTagRepository {
    links: Arc<Mutex<HashMap<Uuid, Vec<String>>>>,
    tags: Arc<Mutex<HashMap<String, Tag>>>,
}

impl InMemoryTagRepository {
    pub fn names_for(&self, timer_id: Uuid) -> Vec<String> {
        self.links.lock().unwrap().get(&timer_id).cloned().unwrap_or_default()
    }

    pub fn tag(&self, name: &str) -> Option<Tag> {
        self.tags.lock().unwrap().get(name).cloned()
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn sync_timer_tags(&self, timer_id: Uuid, names: &[String]) -> DomainResult<()> {
        self.links.lock().unwrap().insert(timer_id, names.to_vec());
        Ok(())
    }

    async fn tags_for_timer(&self, timer_id: Uuid) -> DomainResult<Vec<Tag>> {
        Ok(self.names_for(timer_id).into_iter().map(Tag::new).collect())
    }

    async fn save_tag(&self, tag: &Tag) -> DomainResult<Tag> {
        let mut tags = self.tags.lock().unwrap();
        let stored = tags
            .entry(tag.name.clone())
            .and_modify(|existing| existing.color.clone_from(&tag.color))
            .or_insert_with(|| tag.clone());
        Ok(stored.clone())
    }
}

/// In-memory mock for `TemplateRepository`.
#[derive(Default, Clone)]
pub struct InMemoryTemplateRepository {
    templates: Arc<Mutex<HashMap<Uuid, TimerTemplate>>>,
}

impl InMemoryTemplateRepository {
    pub fn all(&self) -> Vec<TimerTemplate> {
        self.templates.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn find_template(&self, owner_id: Uuid, id: Uuid) -> DomainResult<Option<TimerTemplate>> {
        Ok(self.templates.lock().unwrap().get(&id).filter(|t| t.owner_id == owner_id).cloned())
    }

    async fn list_templates(&self, owner_id: Uuid) -> DomainResult<Vec<TimerTemplate>> {
        let mut templates: Vec<TimerTemplate> = self
            .templates
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    async fn save_template(&self, template: &TimerTemplate) -> DomainResult<()> {
        self.templates.lock().unwrap().insert(template.id, template.clone());
        Ok(())
    }

    async fn delete_template(&self, owner_id: Uuid, id: Uuid) -> DomainResult<bool> {
        let mut templates = self.templates.lock().unwrap();
        if templates.get(&id).is_some_and(|t| t.owner_id == owner_id) {
            templates.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}

/// Notifier that records every expired timer id
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    expired: Arc<Mutex<Vec<Uuid>>>,
}

impl RecordingNotifier {
    pub fn expired(&self) -> Vec<Uuid> {
        self.expired.lock().unwrap().clone()
    }
}

#[async_trait]
impl TimerNotifier for RecordingNotifier {
    async fn timer_expired(&self, timer: &Timer) -> DomainResult<()> {
        self.expired.lock().unwrap().push(timer.id);
        Ok(())
    }
}
