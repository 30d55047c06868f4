//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Tempo
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum TempoError {
    #[error("Invalid transition: {0}")]
    InvalidTransition(#[from] TransitionError),

    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TempoError {
    /// Build a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldViolation::new(field, message)])
    }

    /// Short text suitable for showing to the person using the timer
    ///
    /// Transition failures carry their fixed sentence; ambient failures are
    /// collapsed so storage details never reach the presentation layer.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidTransition(err) => err.to_string(),
            Self::Validation(violations) => violations
                .first()
                .map_or_else(|| "Invalid input.".to_string(), FieldViolation::sentence),
            Self::InvalidPeriod(_) => "Unknown analytics period.".to_string(),
            Self::NotFound(_) => "Record not found.".to_string(),
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }

    /// Whether the caller can recover by changing its request
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransition(_)
                | Self::Validation(_)
                | Self::InvalidPeriod(_)
                | Self::NotFound(_)
        )
    }
}

/// A timer operation attempted from a state that does not allow it
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionError {
    #[error("Timer is not running.")]
    NotRunning,

    #[error("Timer is not paused.")]
    NotPaused,

    #[error("Timer is not active.")]
    NotActive,

    #[error("Timer is not a running countdown.")]
    NotRunningCountdown,
}

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }

    /// Human sentence such as `Task name can't be blank`
    ///
    /// Messages that already read as a full sentence are returned as-is.
    pub fn sentence(&self) -> String {
        if self.message.chars().next().is_some_and(char::is_uppercase) {
            return self.message.clone();
        }
        let mut label = self.field.replace('_', " ");
        if let Some(first) = label.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        format!("{label} {}", self.message)
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Result type alias for Tempo operations
pub type Result<T> = std::result::Result<T, TempoError>;
