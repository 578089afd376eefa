//! Session authority errors.

use bf_02_identity_store::IdentityError;
use shared_types::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Unknown email, wrong password or mismatched identifier. One variant
    /// for all three on purpose.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    Expired,

    /// Malformed, tampered or revoked token.
    #[error("Invalid session token")]
    InvalidToken,

    /// Signing secret rejected at construction.
    #[error("Session secret must be at least {min} bytes and not all zero (got {len} bytes)")]
    WeakSecret { len: usize, min: usize },

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),

    /// Identity lookup failed for an infrastructure reason.
    #[error(transparent)]
    Backend(#[from] IdentityError),
}

impl Classify for SessionError {
    fn kind(&self) -> ErrorKind {
        match self {
            SessionError::InvalidCredentials
            | SessionError::Expired
            | SessionError::InvalidToken => ErrorKind::Auth,
            SessionError::WeakSecret { .. }
            | SessionError::Hashing(_)
            | SessionError::Encoding(_) => ErrorKind::Fatal,
            SessionError::Backend(e) => e.kind(),
        }
    }
}
