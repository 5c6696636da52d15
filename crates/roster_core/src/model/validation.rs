//! Field-level validation rules and error types.
//!
//! # Invariants
//! - A `ValidationError` always carries at least one violation.
//! - Violations keep the order in which rules were evaluated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static ZIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("valid zip regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// One violated constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

/// Candidate record failed one or more field constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Violations in evaluation order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns whether any violation targets `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "validation failed: {joined}")
    }
}

impl Error for ValidationError {}

/// Accumulates violations across rule checks.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    items: Vec<FieldViolation>,
}

impl Violations {
    pub(crate) fn push(&mut self, field: &'static str, message: &'static str) {
        self.items.push(FieldViolation { field, message });
    }

    /// Records `message` when `value` is empty or whitespace-only.
    pub(crate) fn require(&mut self, field: &'static str, value: &str, message: &'static str) {
        if value.trim().is_empty() {
            self.push(field, message);
        }
    }

    /// Records `message` when the char count of `value` is outside `min..=max`.
    pub(crate) fn length(
        &mut self,
        field: &'static str,
        value: &str,
        min: usize,
        max: usize,
        message: &'static str,
    ) {
        let len = value.chars().count();
        if len < min || len > max {
            self.push(field, message);
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.items,
            })
        }
    }
}

/// Reads a required text field, turning `null` into `""`.
///
/// Paired with `#[serde(default)]` so absent and null fields both reach the
/// `required` rule instead of failing deserialization.
pub(crate) fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn is_valid_zip(value: &str) -> bool {
    ZIP_RE.is_match(value)
}

pub(crate) fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}
