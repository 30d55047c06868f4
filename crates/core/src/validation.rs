//! Bridge from collected field errors to the domain error

use tempo_common::validation::{ValidationError, Validator};
use tempo_domain::{FieldViolation, Result, TempoError};

/// Convert collected field errors into `TempoError::Validation`
pub fn into_domain_error(err: ValidationError) -> TempoError {
    TempoError::Validation(
        err.errors.into_iter().map(|e| FieldViolation::new(e.field, e.message)).collect(),
    )
}

/// Finish a validation pass, mapping failures into the domain error
///
/// # Errors
///
/// Returns `TempoError::Validation` with every recorded violation.
pub fn finish(validator: Validator) -> Result<()> {
    validator.finalize().map_err(into_domain_error)
}
