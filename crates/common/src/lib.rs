//! Modular common utilities shared across Tempo crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: field validation
//! - `runtime`: clock abstraction and duration formatting
//! - `test-utils`: helpers for deterministic tests in downstream crates

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod validation;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod time;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(all(feature = "runtime", any(feature = "test-utils", test)))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "runtime")]
pub use time::{format_hms, Clock, MockClock, SharedClock, SystemClock};
#[cfg(feature = "foundation")]
pub use validation::{
    FieldError, FieldValidator, RangeValidator, StringValidator, ValidationError,
    ValidationResult, Validator,
};
