use bf_01_validator::FieldViolation;
use shared_store::KVStoreError;
use shared_types::{Classify, ErrorKind, LookupId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Invalid lookup name: {0}")]
    Invalid(FieldViolation),

    #[error("Lookup entry '{0}' already exists")]
    Duplicate(String),

    #[error("Lookup entry {0} not found")]
    NotFound(LookupId),

    #[error(transparent)]
    Store(#[from] KVStoreError),
}

impl Classify for CatalogError {
    fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Invalid(_) => ErrorKind::Validation,
            CatalogError::Duplicate(_) => ErrorKind::Conflict,
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::Store(e) => e.kind(),
        }
    }
}
