//! # RocksDB Storage Adapter
//!
//! Production RocksDB implementation of the `KeyValueStore` trait.
//!
//! ## Features
//!
//! - Pessimistic transactions (`TransactionDB`) for conditional batches:
//!   every precondition key is read with `get_for_update`, which takes a row
//!   lock held until commit, so two writers racing on the same key serialise
//! - Snappy compression and bloom filters
//! - Write-ahead logging, fsync on commit by default
//!
//! Lock waits that exceed `lock_timeout_ms` surface as `KVStoreError::Busy`.

use crate::errors::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore, Precondition, ScanResult};
use rocksdb::{
    Direction, ErrorKind, IteratorMode, Options, TransactionDB, TransactionDBOptions,
    TransactionOptions, WriteOptions,
};
use std::path::Path;

/// RocksDB configuration for production use
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: String,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Row lock wait before a transaction gives up (default: 1s)
    pub lock_timeout_ms: i64,
    /// Enable fsync after each commit (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/rocksdb".to_string(),
            block_cache_size: 64 * 1024 * 1024,
            write_buffer_size: 16 * 1024 * 1024,
            lock_timeout_ms: 1_000,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            lock_timeout_ms: 500,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed key-value store implementing the KeyValueStore trait
pub struct RocksDbStore {
    db: TransactionDB,
    config: RocksDbConfig,
}

impl RocksDbStore {
    /// Open or create a RocksDB database
    pub fn open(config: RocksDbConfig) -> Result<Self, KVStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let mut txn_db_opts = TransactionDBOptions::default();
        txn_db_opts.set_txn_lock_timeout(config.lock_timeout_ms);

        let db = TransactionDB::open(&opts, &txn_db_opts, &config.path)
            .map_err(|e| KVStoreError::io(format!("Failed to open RocksDB: {}", e)))?;

        tracing::info!(path = %config.path, "RocksDB store opened");

        Ok(Self { db, config })
    }

    /// Open with default tuning at `path`.
    pub fn open_default(path: impl AsRef<Path>) -> Result<Self, KVStoreError> {
        let config = RocksDbConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::open(config)
    }

    fn write_options(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

fn map_rocks_error(context: &str, e: rocksdb::Error) -> KVStoreError {
    match e.kind() {
        ErrorKind::Busy | ErrorKind::TimedOut | ErrorKind::TryAgain => KVStoreError::Busy {
            message: format!("{}: {}", context, e),
        },
        _ => KVStoreError::io(format!("{}: {}", context, e)),
    }
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.db
            .get(key)
            .map_err(|e| map_rocks_error("RocksDB get failed", e))
    }

    fn conditional_batch_write(
        &self,
        preconditions: Vec<Precondition>,
        operations: Vec<BatchOperation>,
    ) -> Result<(), KVStoreError> {
        let txn = self
            .db
            .transaction_opt(&self.write_options(), &TransactionOptions::default());

        for condition in &preconditions {
            let current = txn
                .get_for_update(condition.key(), true)
                .map_err(|e| map_rocks_error("RocksDB lock failed", e))?;
            if !condition.holds(current.as_deref()) {
                txn.rollback()
                    .map_err(|e| map_rocks_error("RocksDB rollback failed", e))?;
                return Err(KVStoreError::ConditionFailed {
                    key: condition.key().to_vec(),
                });
            }
        }

        for op in operations {
            let written = match op {
                BatchOperation::Put { key, value } => txn.put(&key, &value),
                BatchOperation::Delete { key } => txn.delete(&key),
            };
            written.map_err(|e| map_rocks_error("RocksDB write failed", e))?;
        }

        txn.commit()
            .map_err(|e| map_rocks_error("RocksDB commit failed", e))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        let mut results = Vec::new();

        let iter = self
            .db
            .iterator(IteratorMode::From(prefix, Direction::Forward));

        for item in iter {
            let (key, value) = item.map_err(|e| map_rocks_error("RocksDB scan failed", e))?;
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key.to_vec(), value.to_vec()));
        }

        Ok(results)
    }
}
