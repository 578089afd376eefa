//! # Service Container
//!
//! ## Initialization Order
//!
//! ```text
//! 1. Lock the data directory      (memory backend skips this)
//! 2. Open the key-value store     (connect-or-exit)
//! 3. Identity store, catalog, ledger over one shared StoreHandle
//! 4. Session authority over the identity store
//! ```
//!
//! Dropping the container releases the lock after the store is closed.

use crate::container::config::{NodeConfig, StorageBackend};
use bf_02_identity_store::IdentityStore;
use bf_03_session_authority::{PasswordHasher, SessionAuthority, SessionConfig, SessionError};
use bf_04_request_ledger::RequestLedger;
use bf_05_lookup_catalog::LookupCatalog;
use bf_06_api_gateway::AppState;
use shared_store::{
    DatabaseLock, FileBackedKVStore, InMemoryKVStore, KVStoreError, KeyValueStore, LockError,
    StoreHandle,
};
use shared_types::{SystemTimeSource, TimeSource};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// File name of the file-backed store inside the data directory.
pub const STORE_FILE: &str = "bonafide.db";
/// Directory name of the RocksDB store inside the data directory.
pub const ROCKSDB_DIR: &str = "rocksdb";

/// Failures that stop the process before it serves anything.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot lock data directory: {0}")]
    Lock(#[from] LockError),

    #[error("cannot open store: {0}")]
    Store(#[from] KVStoreError),

    #[error("cannot initialise session authority: {0}")]
    Session(#[from] SessionError),

    #[error("storage backend '{0}' is not compiled in (enable the feature)")]
    BackendUnavailable(&'static str),
}

/// Every long-lived service of the node.
pub struct ServiceContainer {
    pub identities: IdentityStore,
    pub sessions: SessionAuthority,
    pub ledger: RequestLedger,
    pub catalog: LookupCatalog,
    pub store: StoreHandle,
    /// Node configuration (immutable after initialization).
    pub config: NodeConfig,
    // declared last: dropped after the store
    _lock: Option<DatabaseLock>,
}

impl ServiceContainer {
    /// Open storage and build every service.
    ///
    /// Fails without side effects beyond the data directory itself; the
    /// caller exits non-zero before binding any socket.
    #[instrument(name = "service_init", skip(config), fields(backend = ?config.storage.backend))]
    pub fn new(config: NodeConfig) -> Result<Self, StartupError> {
        info!("Initializing Bonafide service container");

        let lock = match config.storage.backend {
            StorageBackend::Memory => None,
            _ => {
                let lock = DatabaseLock::acquire(&config.storage.data_dir)?;
                info!(path = %lock.path().display(), "Data directory locked");
                Some(lock)
            }
        };

        let kv = open_store(&config)?;
        let store = StoreHandle::with_timeout(kv, config.storage.store_timeout);
        let clock: Arc<dyn TimeSource> = Arc::new(SystemTimeSource);

        let identities = IdentityStore::new(store.clone(), clock.clone());
        let catalog = LookupCatalog::new(store.clone(), clock.clone());
        let ledger = RequestLedger::new(store.clone(), clock.clone());
        let sessions = SessionAuthority::new(
            SessionConfig {
                secret: config.security.session_secret.clone(),
                ttl_secs: config.security.session_ttl_secs,
            },
            Arc::new(identities.clone()),
            PasswordHasher::new()?,
            clock,
        )?;

        info!("Service container initialized");
        Ok(Self {
            identities,
            sessions,
            ledger,
            catalog,
            store,
            config,
            _lock: lock,
        })
    }

    /// Handler state for the API gateway.
    pub fn app_state(&self) -> AppState {
        AppState {
            identities: self.identities.clone(),
            sessions: self.sessions.clone(),
            ledger: self.ledger.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

fn open_store(config: &NodeConfig) -> Result<Arc<dyn KeyValueStore>, StartupError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using volatile in-memory store");
            Ok(Arc::new(InMemoryKVStore::new()))
        }
        StorageBackend::File => {
            let path = config.storage.data_dir.join(STORE_FILE);
            Ok(Arc::new(FileBackedKVStore::open(path)?))
        }
        #[cfg(feature = "rocksdb")]
        StorageBackend::RocksDb => {
            let path = config.storage.data_dir.join(ROCKSDB_DIR);
            Ok(Arc::new(shared_store::RocksDbStore::open_default(path)?))
        }
        #[cfg(not(feature = "rocksdb"))]
        StorageBackend::RocksDb => Err(StartupError::BackendUnavailable("rocksdb")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir, backend: StorageBackend) -> NodeConfig {
        let mut config = NodeConfig::default();
        config.storage.backend = backend;
        config.storage.data_dir = dir.path().to_path_buf();
        config.security.session_secret = vec![9u8; 32];
        config
    }

    #[test]
    fn test_memory_backend_needs_no_lock() {
        let dir = TempDir::new().unwrap();
        let first = ServiceContainer::new(config_in(&dir, StorageBackend::Memory)).unwrap();
        let second = ServiceContainer::new(config_in(&dir, StorageBackend::Memory));
        assert!(second.is_ok());
        drop(first);
    }

    #[test]
    fn test_second_container_on_same_dir_fails() {
        let dir = TempDir::new().unwrap();
        let _first = ServiceContainer::new(config_in(&dir, StorageBackend::File)).unwrap();

        let lock = DatabaseLock::acquire_with_timeout(dir.path(), Duration::from_millis(50));
        assert!(matches!(lock, Err(LockError::AlreadyLocked { .. })));
    }

    #[test]
    fn test_lock_released_on_drop() {
        let dir = TempDir::new().unwrap();
        let first = ServiceContainer::new(config_in(&dir, StorageBackend::File)).unwrap();
        drop(first);
        assert!(ServiceContainer::new(config_in(&dir, StorageBackend::File)).is_ok());
    }

    #[test]
    fn test_weak_secret_fails_startup() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir, StorageBackend::Memory);
        config.security.session_secret = vec![0u8; 32];
        assert!(matches!(
            ServiceContainer::new(config),
            Err(StartupError::Session(SessionError::WeakSecret { .. }))
        ));
    }

    #[cfg(not(feature = "rocksdb"))]
    #[test]
    fn test_rocksdb_requires_feature() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            ServiceContainer::new(config_in(&dir, StorageBackend::RocksDb)),
            Err(StartupError::BackendUnavailable("rocksdb"))
        ));
    }

    #[tokio::test]
    async fn test_file_store_persists_across_restart() {
        let dir = TempDir::new().unwrap();
        let entry = {
            let container = ServiceContainer::new(config_in(&dir, StorageBackend::File)).unwrap();
            container.catalog.create("Physics").await.unwrap()
        };

        let container = ServiceContainer::new(config_in(&dir, StorageBackend::File)).unwrap();
        assert_eq!(container.catalog.get(entry.id).await.unwrap(), entry);
    }
}
