//! # Error Taxonomy
//!
//! Every subsystem defines its own `thiserror` enum and classifies each
//! variant into one [`ErrorKind`]. The API gateway is the only place that
//! turns a kind into a transport status code and user-facing message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse error classes shared by all subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed input. Recoverable client-side, never an incident.
    Validation,
    /// Uniqueness or state-machine violation.
    Conflict,
    /// Referenced entity absent.
    NotFound,
    /// Credential or session failure. Deliberately low-information.
    Auth,
    /// Storage timeout or busy backend. Safe to retry with backoff.
    Transient,
    /// Storage unusable. The process should not keep serving.
    Fatal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Conflict => "conflict",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Auth => "auth",
            ErrorKind::Transient => "transient",
            ErrorKind::Fatal => "fatal",
        }
    }

    /// Only transient and fatal failures are eligible for client retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Transient | ErrorKind::Fatal)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every subsystem error.
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}

/// Which uniqueness key an identity registration collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueField {
    Identifier,
    Phone,
    Email,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::Identifier => "identifier",
            UniqueField::Phone => "phone",
            UniqueField::Email => "email",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
