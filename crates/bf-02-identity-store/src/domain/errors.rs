//! Identity store errors.

use shared_store::KVStoreError;
use shared_types::{Classify, ErrorKind, IdentityId, UniqueField};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Another identity already holds this identifier, phone or email.
    #[error("An identity with this {0} already exists")]
    DuplicateField(UniqueField),

    /// Identifier and email do not belong to the same identity. Deliberately
    /// does not say which one was wrong.
    #[error("Invalid identifier and email combination")]
    InvalidCombination,

    #[error("Identity {0} not found")]
    NotFound(IdentityId),

    #[error(transparent)]
    Store(#[from] KVStoreError),
}

impl Classify for IdentityError {
    fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::DuplicateField(_) => ErrorKind::Conflict,
            IdentityError::InvalidCombination => ErrorKind::Auth,
            IdentityError::NotFound(_) => ErrorKind::NotFound,
            IdentityError::Store(e) => e.kind(),
        }
    }
}
