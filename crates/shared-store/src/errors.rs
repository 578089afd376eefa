//! Key-value store errors.

use shared_types::{Classify, ErrorKind};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Stored bytes could not be decoded.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },

    /// A precondition of a conditional write did not hold. Nothing was written.
    #[error("KV store condition failed on key '{}'", String::from_utf8_lossy(.key))]
    ConditionFailed { key: Vec<u8> },

    /// Backend is busy (lock contention, write stall). Retry later.
    #[error("KV store busy: {message}")]
    Busy { message: String },

    /// Operation did not finish within the configured deadline.
    #[error("KV store operation timed out after {millis}ms")]
    Timeout { millis: u64 },
}

impl KVStoreError {
    pub fn io(message: impl Into<String>) -> Self {
        KVStoreError::IOError {
            message: message.into(),
        }
    }

    pub fn corruption(message: impl Into<String>) -> Self {
        KVStoreError::CorruptionError {
            message: message.into(),
        }
    }

    /// Key of the failed precondition, if this is a condition failure.
    pub fn failed_key(&self) -> Option<&[u8]> {
        match self {
            KVStoreError::ConditionFailed { key } => Some(key),
            _ => None,
        }
    }
}

impl Classify for KVStoreError {
    fn kind(&self) -> ErrorKind {
        match self {
            KVStoreError::ConditionFailed { .. } => ErrorKind::Conflict,
            KVStoreError::Busy { .. } | KVStoreError::Timeout { .. } => ErrorKind::Transient,
            KVStoreError::IOError { .. } | KVStoreError::CorruptionError { .. } => ErrorKind::Fatal,
        }
    }
}
