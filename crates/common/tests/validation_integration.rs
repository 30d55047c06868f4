//! Integration tests for the `validation` module.
//!
//! Exercises the validator the way form handlers use it: several fields are
//! checked in one pass and every failure is reported together.

#![cfg(feature = "foundation")]

use tempo_common::validation::{
    FieldValidator, RangeValidator, StringValidator, ValidationError, Validator,
};

const HEX_COLOR: &str = r"\A#[0-9a-fA-F]{6}\z";

struct TimerForm<'a> {
    task_name: &'a str,
    notes: &'a str,
    target_duration: i64,
    color: &'a str,
}

fn validate_form(form: &TimerForm<'_>) -> Result<(), ValidationError> {
    let mut validator = Validator::new();
    validator.validate_field("task_name", form.task_name, &StringValidator::new().not_empty().max_length(255));
    validator.validate_field("notes", form.notes, &StringValidator::new().max_length(2000).trim(false));
    validator.validate_field("target_duration", &form.target_duration, &RangeValidator::empty().min(1_i64));
    let color_rule = StringValidator::new().pattern(HEX_COLOR).unwrap();
    validator.validate_field("color", form.color, &color_rule);
    validator.finalize()
}

#[test]
fn test_valid_form_passes() {
    let form = TimerForm { task_name: "Pomodoro", notes: "", target_duration: 1500, color: "#6B7280" };
    assert!(validate_form(&form).is_ok());
}

#[test]
fn test_all_failures_reported_in_field_order() {
    let notes = "n".repeat(2001);
    let form = TimerForm { task_name: "  ", notes: &notes, target_duration: 0, color: "grey" };

    let err = validate_form(&form).unwrap_err();

    let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["task_name", "notes", "target_duration", "color"]);
    assert_eq!(err.field_errors("task_name")[0].message, "can't be blank");
    assert_eq!(err.field_errors("notes")[0].message, "is too long (maximum is 2000 characters)");
    assert_eq!(err.field_errors("target_duration")[0].message, "must be greater than or equal to 1");
    assert_eq!(err.field_errors("color")[0].message, "is invalid");
}

#[test]
fn test_validator_trait_object() {
    let rules: Vec<Box<dyn FieldValidator<str>>> = vec![
        Box::new(StringValidator::new().not_empty()),
        Box::new(StringValidator::new().max_length(5)),
    ];

    let mut validator = Validator::new();
    for rule in &rules {
        validator.validate_field("name", "too long name", rule.as_ref());
    }
    assert_eq!(validator.error_count(), 1);
}

#[test]
fn test_validation_error_serializes() {
    let err = ValidationError::field("task_name", "can't be blank");
    let json = serde_json::to_value(&err).unwrap();

    assert_eq!(json["errors"][0]["field"], "task_name");
    assert_eq!(json["errors"][0]["message"], "can't be blank");
}
