//! Tag string handling
//!
//! Tags enter the system as one comma-delimited string. Timers keep the
//! display form (case preserved); tag links use the normalised form.

use tempo_common::validation::{StringValidator, Validator};
use tempo_domain::constants::TAG_COLOR_PATTERN;
use tempo_domain::{Result, Tag, TempoError};

use crate::validation::finish;

/// Split a comma-delimited string into display tags
///
/// Whitespace is trimmed, blanks dropped and repeats removed, keeping the
/// first occurrence's position.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
        if !tags.iter().any(|seen| seen == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Lowercased, deduplicated names used for tag links
pub fn normalize_tag_names<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in tags.iter().map(|tag| tag.as_ref().trim().to_lowercase()) {
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Inverse of [`parse_tags`] for storage and length checks
pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}

/// Check a tag record before it is stored
///
/// # Errors
///
/// Returns `TempoError::Validation` for a blank name or a colour that is not
/// `#RRGGBB`.
pub fn validate_tag(tag: &Tag) -> Result<()> {
    let color_rule = StringValidator::new()
        .trim(false)
        .pattern(TAG_COLOR_PATTERN)
        .map_err(|e| TempoError::Internal(format!("tag colour rule: {e}")))?;

    let mut validator = Validator::new();
    validator.validate_field("name", tag.name.as_str(), &StringValidator::new().not_empty());
    validator.validate_field("color", tag.color.as_str(), &color_rule);
    finish(validator)
}
