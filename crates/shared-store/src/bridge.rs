//! Async bridge over the synchronous `KeyValueStore` port.

use crate::errors::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore, Precondition, ScanResult};
use std::sync::Arc;
use std::time::Duration;

/// Default deadline for a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared, cloneable handle to the process-wide store.
///
/// Each call runs on the blocking thread pool, so handlers suspend on I/O
/// without holding any lock of their own. A call that misses the deadline
/// returns [`KVStoreError::Timeout`]; the underlying operation may still
/// complete, which is safe because every write is a single atomic batch.
#[derive(Clone)]
pub struct StoreHandle {
    inner: Arc<dyn KeyValueStore>,
    timeout: Duration,
}

impl StoreHandle {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self::with_timeout(inner, DEFAULT_STORE_TIMEOUT)
    }

    pub fn with_timeout(inner: Arc<dyn KeyValueStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// The wrapped synchronous store.
    pub fn inner(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `op` against the store on the blocking pool, bounded by the deadline.
    pub async fn run<T, F>(&self, op: F) -> Result<T, KVStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn KeyValueStore) -> Result<T, KVStoreError> + Send + 'static,
    {
        let store = Arc::clone(&self.inner);
        let task = tokio::task::spawn_blocking(move || op(store.as_ref()));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(KVStoreError::io(format!(
                "store task failed: {}",
                join_error
            ))),
            Err(_) => {
                let millis = self.timeout.as_millis() as u64;
                tracing::warn!(timeout_ms = millis, "Store operation timed out");
                Err(KVStoreError::Timeout { millis })
            }
        }
    }

    pub async fn get(&self, key: Vec<u8>) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.run(move |store| store.get(&key)).await
    }

    pub async fn prefix_scan(&self, prefix: Vec<u8>) -> Result<ScanResult, KVStoreError> {
        self.run(move |store| store.prefix_scan(&prefix)).await
    }

    pub async fn conditional_batch_write(
        &self,
        preconditions: Vec<Precondition>,
        operations: Vec<BatchOperation>,
    ) -> Result<(), KVStoreError> {
        self.run(move |store| store.conditional_batch_write(preconditions, operations))
            .await
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
