// Field Validators - Reusable validation components
use std::fmt::Display;

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Range validator for numeric types
#[derive(Debug, Clone)]
pub struct RangeValidator<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T> Default for RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    /// Create a new range validator with no constraints
    pub fn empty() -> Self {
        Self { min: None, max: None }
    }

    /// Create a new range validator with min and max values
    pub fn new(min: T, max: T) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    /// Set minimum value
    pub fn min(mut self, min: T) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum value
    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }
}

impl<T> FieldValidator<T> for RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    fn validate(&self, value: &T) -> Result<(), String> {
        if let Some(ref min) = self.min {
            if value < min {
                return Err(format!("must be greater than or equal to {min}"));
            }
        }

        if let Some(ref max) = self.max {
            if value > max {
                return Err(format!("must be less than or equal to {max}"));
            }
        }

        Ok(())
    }
}

/// String validator with various constraints
///
/// Lengths are counted in characters, not bytes, so multi-byte notes are not
/// rejected early.
#[derive(Debug, Clone)]
pub struct StringValidator {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<regex::Regex>,
    not_empty: bool,
    trim: bool,
}

impl Default for StringValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl StringValidator {
    /// Create a new string validator
    pub fn new() -> Self {
        Self { min_length: None, max_length: None, pattern: None, not_empty: false, trim: true }
    }

    /// Require non-blank string
    pub fn not_empty(mut self) -> Self {
        self.not_empty = true;
        self
    }

    /// Set minimum length
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set maximum length
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set pattern to match
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(regex::Regex::new(pattern)?);
        Ok(self)
    }

    /// Set whether to trim before validation
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

impl FieldValidator<str> for StringValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let val = if self.trim { value.trim() } else { value };

        if self.not_empty && val.is_empty() {
            return Err("can't be blank".to_string());
        }

        let length = val.chars().count();

        if let Some(min) = self.min_length {
            if length < min {
                return Err(format!("is too short (minimum is {min} characters)"));
            }
        }

        if let Some(max) = self.max_length {
            if length > max {
                return Err(format!("is too long (maximum is {max} characters)"));
            }
        }

        if let Some(ref pattern) = self.pattern {
            if !pattern.is_match(val) {
                return Err("is invalid".to_string());
            }
        }

        Ok(())
    }
}

impl FieldValidator<String> for StringValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}
