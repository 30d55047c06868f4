//! Shared test helpers for `tempo-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight in-memory port
//! implementations so service tests can focus on behaviour instead of
//! boilerplate.

#![allow(dead_code)]

pub mod builders;
pub mod repositories;
