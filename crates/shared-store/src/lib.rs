//! # Shared Store
//!
//! The persistence layer every Bonafide subsystem writes through.
//!
//! ## Atomicity Model
//!
//! Uniqueness and lifecycle invariants are never enforced with a
//! read-then-write sequence. Instead each subsystem expresses its check as a
//! list of [`Precondition`]s and submits it together with the writes in a
//! single [`KeyValueStore::conditional_batch_write`]. The adapter checks every
//! precondition and applies every operation as one unit, or applies nothing
//! and reports the first key whose precondition failed.
//!
//! ```text
//! register(identity)                     submit(request)
//!   Absent(identity_prn:<prn>)             Absent(request_pending:<identity>)
//!   Absent(identity_phone:<phone>)         Put(request:<id>)
//!   Absent(identity_email:<email>)         Put(request_by_identity:<identity>:<ts>:<id>)
//!   Put(identity:<id>) + 3 index keys      Put(request_pending:<identity>)
//! ```
//!
//! ## Adapters
//!
//! | Adapter | Use |
//! |---------|-----|
//! | [`InMemoryKVStore`] | tests, ephemeral deployments |
//! | [`FileBackedKVStore`] | single-node durability without RocksDB |
//! | `RocksDbStore` (feature `rocksdb`) | production, pessimistic transactions |
//!
//! ## Async Bridge
//!
//! Adapters are synchronous. [`StoreHandle`] runs every call on the blocking
//! pool behind a timeout so request handlers never block the runtime and a
//! slow backend surfaces as a retryable [`KVStoreError::Timeout`].

pub mod adapters;
pub mod bridge;
pub mod codec;
pub mod errors;
#[cfg(feature = "locking")]
pub mod lock;
pub mod ports;

pub use adapters::{FileBackedKVStore, InMemoryKVStore};
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbStore};
pub use bridge::{StoreHandle, DEFAULT_STORE_TIMEOUT};
pub use codec::{decode, encode};
pub use errors::KVStoreError;
#[cfg(feature = "locking")]
pub use lock::{DatabaseLock, LockError};
pub use ports::{BatchOperation, KeyValueStore, Precondition, ScanResult};
