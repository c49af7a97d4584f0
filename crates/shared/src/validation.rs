//! Client-side field rules applied before a draft or patch is submitted.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    domain::{StudentDraft, StudentField, StudentPatch},
    error::{FieldViolation, ValidationError, ViolationCode},
};

static NIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]{9}[vVxX]|[0-9]{12})$").expect("static nic pattern"));

static CONTACT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("static contact pattern"));

pub fn is_valid_nic(value: &str) -> bool {
    NIC_PATTERN.is_match(value)
}

pub fn is_valid_contact(value: &str) -> bool {
    CONTACT_PATTERN.is_match(value)
}

/// Checks a single field value. Required fields reject empty and whitespace-only input.
pub fn check_field(field: StudentField, value: &str) -> Option<FieldViolation> {
    if value.trim().is_empty() {
        return Some(FieldViolation::new(
            field,
            ViolationCode::Required,
            format!("{} is required", field.label()),
        ));
    }

    match field {
        StudentField::Nic if !is_valid_nic(value) => Some(FieldViolation::new(
            field,
            ViolationCode::Pattern,
            "Please enter a valid NIC number",
        )),
        StudentField::Contact if !is_valid_contact(value) => Some(FieldViolation::new(
            field,
            ViolationCode::Pattern,
            "Please enter a valid 10-digit phone number",
        )),
        _ => None,
    }
}

pub fn validate_draft(draft: &StudentDraft) -> Result<(), ValidationError> {
    collect(
        StudentField::ALL
            .into_iter()
            .filter_map(|field| check_field(field, draft.get(field))),
    )
}

/// Runs the same rules as [`validate_draft`], restricted to the fields the patch carries.
pub fn validate_patch(patch: &StudentPatch) -> Result<(), ValidationError> {
    collect(
        patch
            .fields()
            .filter_map(|(field, value)| check_field(field, value)),
    )
}

fn collect(violations: impl Iterator<Item = FieldViolation>) -> Result<(), ValidationError> {
    let violations: Vec<_> = violations.collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
