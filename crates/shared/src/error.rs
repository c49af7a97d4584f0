use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::StudentField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    Required,
    Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: StudentField,
    pub code: ViolationCode,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: StudentField, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid student fields: {}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn fields(&self) -> impl Iterator<Item = StudentField> + '_ {
        self.violations.iter().map(|v| v.field)
    }

    /// One line per violation, suitable for a user-facing sub-message.
    pub fn summary(&self) -> String {
        summarize(&self.violations)
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
