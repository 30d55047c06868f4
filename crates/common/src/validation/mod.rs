// Validation Module - field-level validation collected before any mutation
use std::fmt;

use serde::{Deserialize, Serialize};

mod validators;

pub use validators::{FieldValidator, RangeValidator, StringValidator};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error with detailed field-level errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Create with a single field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.add_field_error(field, message);
        err
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Get errors for a specific field
    pub fn field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Merge another validation error into this one
    pub fn merge(&mut self, other: ValidationError) {
        self.errors.extend(other.errors);
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "Validation error with no specific field errors")?;
        } else if self.errors.len() == 1 {
            write!(f, "Validation failed: {}", self.errors[0])?;
        } else {
            write!(f, "Validation failed with {} errors: ", self.errors.len())?;
            for (i, error) in self.errors.iter().enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{error}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Individual field error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Collects field errors across several checks and reports them together
///
/// ```
/// # #[cfg(feature = "foundation")]
/// # {
/// use tempo_common::validation::{StringValidator, Validator};
///
/// let mut validator = Validator::new();
/// validator.validate_field("task_name", "", &StringValidator::new().not_empty());
/// validator.validate_min("target_duration", 0, 1);
///
/// let err = validator.finalize().unwrap_err();
/// assert_eq!(err.error_count(), 2);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationError,
    stop_on_first: bool,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self { errors: ValidationError::new(), stop_on_first: false }
    }

    /// Stop recording after the first error
    pub fn stop_on_first_error(mut self) -> Self {
        self.stop_on_first = true;
        self
    }

    fn should_short_circuit(&self) -> bool {
        self.stop_on_first && !self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        if self.should_short_circuit() {
            return;
        }
        self.errors.add_field_error(field, message);
    }

    /// Validate a field with a specific validator
    pub fn validate_field<T, V>(&mut self, field: &str, value: &T, validator: &V)
    where
        T: ?Sized,
        V: FieldValidator<T> + ?Sized,
    {
        if self.should_short_circuit() {
            return;
        }

        if let Err(msg) = validator.validate(value) {
            self.add_error(field, msg);
        }
    }

    /// Validate minimum value
    pub fn validate_min<T>(&mut self, field: &str, value: T, min: T)
    where
        T: PartialOrd + fmt::Display,
    {
        if value < min {
            self.add_error(field, format!("must be greater than or equal to {min}"));
        }
    }

    /// Validate maximum value
    pub fn validate_max<T>(&mut self, field: &str, value: T, max: T)
    where
        T: PartialOrd + fmt::Display,
    {
        if value > max {
            self.add_error(field, format!("must be less than or equal to {max}"));
        }
    }

    /// Record `message` against `field` when `condition` is false
    pub fn ensure(&mut self, condition: bool, field: &str, message: impl Into<String>) {
        if !condition {
            self.add_error(field, message);
        }
    }

    /// Check if validation has errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.errors.error_count()
    }

    /// Get errors without consuming validator
    pub fn errors(&self) -> &ValidationError {
        &self.errors
    }

    /// Finalize and return result
    pub fn finalize(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
