//! # Tempo Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite persistence for timers, tags and templates
//! - Configuration loading from environment and files
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `tempo-core`
//! - Contains all "impure" code (I/O, process environment)

pub mod config;
pub mod database;
pub mod errors;
pub mod observability;

// Re-export commonly used items
pub use database::{DbManager, SqliteTagRepository, SqliteTemplateRepository, SqliteTimerRepository};
pub use errors::InfraError;
pub use observability::init_tracing;
