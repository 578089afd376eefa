use super::{apply_conditional, scan_prefix, OrderedMap};
use crate::errors::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore, Precondition, ScanResult};
use parking_lot::Mutex;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// File-backed key-value store for deployments without RocksDB.
///
/// The whole map lives in memory and is rewritten to disk (temp file +
/// rename) on every mutation while the mutex is held, so a conditional batch
/// is visible to readers only after it is durable. If the write to disk fails
/// the in-memory map is left untouched.
pub struct FileBackedKVStore {
    data: Mutex<OrderedMap>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading existing contents.
    ///
    /// A missing file is an empty store. A truncated or unreadable file is
    /// reported as an error rather than silently discarded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::metadata(&path) {
            Ok(metadata) => {
                tracing::info!(
                    path = %path.display(),
                    bytes = metadata.len(),
                    "Found existing storage file"
                );
                Self::load_from_file(&path)?
            }
            Err(_) => {
                tracing::info!(path = %path.display(), "No existing storage file, starting empty");
                OrderedMap::new()
            }
        };

        tracing::info!(keys = data.len(), path = %path.display(), "File store opened");

        Ok(Self {
            data: Mutex::new(data),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_file(path: &Path) -> Result<OrderedMap, KVStoreError> {
        let mut file = std::fs::File::open(path).map_err(|e| KVStoreError::io(e.to_string()))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| KVStoreError::io(e.to_string()))?;
        decode_records(&bytes)
    }

    fn save_to_file(&self, data: &OrderedMap) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| KVStoreError::io(e.to_string()))?;
        }

        let bytes = encode_records(data);

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file =
            std::fs::File::create(&temp_path).map_err(|e| KVStoreError::io(e.to_string()))?;
        file.write_all(&bytes)
            .map_err(|e| KVStoreError::io(e.to_string()))?;
        file.sync_all().map_err(|e| KVStoreError::io(e.to_string()))?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| KVStoreError::io(e.to_string()))
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.lock().get(key).cloned())
    }

    fn conditional_batch_write(
        &self,
        preconditions: Vec<Precondition>,
        operations: Vec<BatchOperation>,
    ) -> Result<(), KVStoreError> {
        let mut data = self.data.lock();
        let mut next = data.clone();
        apply_conditional(&mut next, &preconditions, operations)?;
        self.save_to_file(&next)?;
        *data = next;
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Ok(scan_prefix(&self.data.lock(), prefix))
    }
}

// Simple binary format: [key_len:u32][key][value_len:u32][value]...
fn encode_records(data: &OrderedMap) -> Vec<u8> {
    let mut bytes = Vec::new();
    for (key, value) in data {
        bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
        bytes.extend_from_slice(key);
        bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
        bytes.extend_from_slice(value);
    }
    bytes
}

fn decode_records(bytes: &[u8]) -> Result<OrderedMap, KVStoreError> {
    let mut data = OrderedMap::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let key = read_chunk(bytes, &mut cursor)?;
        let value = read_chunk(bytes, &mut cursor)?;
        data.insert(key, value);
    }

    Ok(data)
}

fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
    let len_end = *cursor + 4;
    let len_bytes: [u8; 4] = bytes
        .get(*cursor..len_end)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| KVStoreError::corruption(format!("truncated length at offset {}", cursor)))?;
    let len = u32::from_le_bytes(len_bytes) as usize;

    let chunk = bytes
        .get(len_end..len_end + len)
        .ok_or_else(|| KVStoreError::corruption(format!("truncated record at offset {}", len_end)))?;
    *cursor = len_end + len;
    Ok(chunk.to_vec())
}
