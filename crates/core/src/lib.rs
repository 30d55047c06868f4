//! # Tempo Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The timer state machine and elapsed-time arithmetic
//! - Timer templates
//! - The analytics aggregation engine
//! - Port interfaces (traits) and the services that drive them
//!
//! ## Architecture Principles
//! - Only depends on `tempo-common` and `tempo-domain`
//! - No database or platform code
//! - All external dependencies via traits
//! - Engines take `now` (or a clock) explicitly

pub mod analytics;
pub mod template;
pub mod timer;
pub mod validation;

// Re-export specific items to avoid ambiguity
pub use analytics::{AnalyticsEngine, AnalyticsService};
pub use template::ports::TemplateRepository;
pub use template::TemplateService;
pub use timer::ports::{TagRepository, TimerNotifier, TimerRepository};
pub use timer::{
    CountdownInput, NewTimer, TimerAction, TimerEngine, TimerService, TimerUpdate,
};
