//! Request ledger errors.

use shared_store::KVStoreError;
use shared_types::{Classify, ErrorKind, RequestId, RequestStatus};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Reason must not be empty")]
    EmptyReason,

    #[error("Reason must be at most {max} characters")]
    ReasonTooLong { max: usize },

    /// The identity already has a request awaiting a decision.
    #[error("A bonafide request is already pending for this student")]
    AlreadyPending,

    #[error("Bonafide request {0} not found")]
    NotFound(RequestId),

    #[error("Cannot move a {from} request to {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    /// Approval without a document reference.
    #[error("A document reference is required to approve a request")]
    MissingDocumentRef,

    #[error(transparent)]
    Store(#[from] KVStoreError),
}

impl Classify for LedgerError {
    fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::EmptyReason
            | LedgerError::ReasonTooLong { .. }
            | LedgerError::MissingDocumentRef => ErrorKind::Validation,
            LedgerError::AlreadyPending | LedgerError::InvalidTransition { .. } => {
                ErrorKind::Conflict
            }
            LedgerError::NotFound(_) => ErrorKind::NotFound,
            LedgerError::Store(e) => e.kind(),
        }
    }
}
