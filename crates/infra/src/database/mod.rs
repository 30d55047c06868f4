//! Database implementations

pub mod manager;
mod rows;
pub mod tag_repository;
pub mod template_repository;
pub mod timer_repository;

pub use manager::*;
pub use tag_repository::*;
pub use template_repository::*;
pub use timer_repository::*;
