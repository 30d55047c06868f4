//! Timer lifecycle
//!
//! - [`elapsed`]: pure duration and remaining-time reads
//! - [`transitions`]: pure state machine
//! - [`engine`]: clock-driven wrapper that commits transitions
//! - [`factory`]: validated creation and edits
//! - [`service`]: repository-backed orchestration

pub mod elapsed;
pub mod engine;
pub mod factory;
pub mod ports;
pub mod service;
pub mod tags;
pub mod transitions;
pub mod view;

pub use engine::TimerEngine;
pub use factory::{create_timer, update_details, CountdownInput, NewTimer, TimerUpdate};
pub use service::TimerService;
pub use transitions::TimerAction;
