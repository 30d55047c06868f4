//! Port interfaces for timer persistence and notification
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use tempo_domain::{DateRange, Result, Tag, Timer};
use uuid::Uuid;

/// Trait for persisting timers
///
/// Every lookup is scoped to the owning user; a timer owned by someone else
/// is indistinguishable from a missing one.
#[async_trait]
pub trait TimerRepository: Send + Sync {
    /// Fetch one timer
    async fn find_timer(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Timer>>;

    /// Timers whose `created_at` falls inside `range`, newest first
    async fn load_timers_for_owner(&self, owner_id: Uuid, range: DateRange) -> Result<Vec<Timer>>;

    /// Insert or replace; the last write wins
    async fn save(&self, timer: &Timer) -> Result<()>;

    /// Remove a timer, returning whether it existed
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool>;
}

/// Trait for the normalised tag links behind each timer
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Replace the timer's links with `names`, creating missing tags
    async fn sync_timer_tags(&self, timer_id: Uuid, names: &[String]) -> Result<()>;

    /// Tags currently linked to the timer, by name
    async fn tags_for_timer(&self, timer_id: Uuid) -> Result<Vec<Tag>>;

    /// Create or recolour the tag with this name, returning the stored row
    async fn save_tag(&self, tag: &Tag) -> Result<Tag>;
}

/// Trait for telling the outside world a countdown ran out
#[async_trait]
pub trait TimerNotifier: Send + Sync {
    async fn timer_expired(&self, timer: &Timer) -> Result<()>;
}
