//! Port interface for template persistence

use async_trait::async_trait;
use tempo_domain::{Result, TimerTemplate};
use uuid::Uuid;

/// Trait for persisting timer templates
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn find_template(&self, owner_id: Uuid, id: Uuid) -> Result<Option<TimerTemplate>>;

    /// All of the owner's templates ordered by name
    async fn list_templates(&self, owner_id: Uuid) -> Result<Vec<TimerTemplate>>;

    async fn save_template(&self, template: &TimerTemplate) -> Result<()>;

    async fn delete_template(&self, owner_id: Uuid, id: Uuid) -> Result<bool>;
}
