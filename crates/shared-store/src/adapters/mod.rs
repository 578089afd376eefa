//! Storage Adapters
//!
//! Implementations of the `KeyValueStore` trait.

mod file;
mod memory;
#[cfg(feature = "rocksdb")]
mod rocksdb_adapter;

pub use file::FileBackedKVStore;
pub use memory::InMemoryKVStore;
#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore};

use crate::errors::KVStoreError;
use crate::ports::{BatchOperation, Precondition, ScanResult};
use std::collections::BTreeMap;

pub(crate) type OrderedMap = BTreeMap<Vec<u8>, Vec<u8>>;

/// Check all preconditions against `map`, then apply all operations.
///
/// The caller must hold exclusive access to `map` for the whole call.
pub(crate) fn apply_conditional(
    map: &mut OrderedMap,
    preconditions: &[Precondition],
    operations: Vec<BatchOperation>,
) -> Result<(), KVStoreError> {
    check_preconditions(map, preconditions)?;
    for op in operations {
        match op {
            BatchOperation::Put { key, value } => {
                map.insert(key, value);
            }
            BatchOperation::Delete { key } => {
                map.remove(&key);
            }
        }
    }
    Ok(())
}

pub(crate) fn check_preconditions(
    map: &OrderedMap,
    preconditions: &[Precondition],
) -> Result<(), KVStoreError> {
    for condition in preconditions {
        let current = map.get(condition.key()).map(Vec::as_slice);
        if !condition.holds(current) {
            return Err(KVStoreError::ConditionFailed {
                key: condition.key().to_vec(),
            });
        }
    }
    Ok(())
}

pub(crate) fn scan_prefix(map: &OrderedMap, prefix: &[u8]) -> ScanResult {
    map.range(prefix.to_vec()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
