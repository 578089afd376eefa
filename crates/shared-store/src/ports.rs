//! # Outbound Port
//!
//! The storage interface the subsystems require the host to provide.

use crate::errors::KVStoreError;

/// Result of a prefix scan: `(key, value)` pairs in ascending key order.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for key-value database operations.
///
/// Production: `RocksDbStore` (feature `rocksdb`) or `FileBackedKVStore`
/// Testing: `InMemoryKVStore`
///
/// Methods take `&self`; adapters synchronise internally so one handle can
/// be shared by every request handler.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Check every precondition and apply every operation as one atomic unit.
    ///
    /// ## Atomicity Guarantee
    ///
    /// Either all preconditions hold and ALL operations are applied, or the
    /// first failing precondition is reported as
    /// [`KVStoreError::ConditionFailed`] and NONE are applied. No other
    /// writer can interleave between the check and the write.
    fn conditional_batch_write(
        &self,
        preconditions: Vec<Precondition>,
        operations: Vec<BatchOperation>,
    ) -> Result<(), KVStoreError>;

    /// Iterate over keys with a prefix, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError>;

    /// Unconditional atomic batch.
    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.conditional_batch_write(Vec::new(), operations)
    }

    /// Put a single key-value pair.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::put(key, value)])
    }

    /// Delete a key.
    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::delete(key)])
    }

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Condition checked inside a conditional batch write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    /// The key must not exist.
    Absent { key: Vec<u8> },
    /// The key must exist and hold exactly this value (compare-and-swap).
    Equals { key: Vec<u8>, value: Vec<u8> },
}

impl Precondition {
    pub fn absent(key: impl Into<Vec<u8>>) -> Self {
        Precondition::Absent { key: key.into() }
    }

    pub fn equals(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Precondition::Equals {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &[u8] {
        match self {
            Precondition::Absent { key } | Precondition::Equals { key, .. } => key,
        }
    }

    /// Evaluate against the current value of [`Self::key`].
    pub fn holds(&self, current: Option<&[u8]>) -> bool {
        match self {
            Precondition::Absent { .. } => current.is_none(),
            Precondition::Equals { value, .. } => current == Some(value.as_slice()),
        }
    }
}
