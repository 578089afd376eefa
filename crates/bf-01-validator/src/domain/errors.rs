//! Validation error types.

use serde::Serialize;
use shared_types::{Classify, ErrorKind};
use std::fmt;
use thiserror::Error;

/// A single field that failed its syntax rule.
///
/// `reason` is a stable, human-readable string suitable for display next to
/// the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {reason}")]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl Classify for FieldViolation {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// Every violation found on a form.
///
/// INVARIANT: never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn push(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }

    /// Record the outcome of one rule.
    pub fn check(&mut self, result: Result<(), FieldViolation>) {
        if let Err(violation) = result {
            self.push(violation);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether `field` has at least one violation.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// `Ok(())` if nothing was recorded, otherwise the report itself.
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<FieldViolation> for ValidationReport {
    fn from(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reasons: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        f.write_str(&reasons.join("; "))
    }
}

impl std::error::Error for ValidationReport {}

impl Classify for ValidationReport {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
