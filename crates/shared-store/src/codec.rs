//! JSON value encoding for stored records.

use crate::errors::KVStoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialize a record for storage.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, KVStoreError> {
    serde_json::to_vec(value).map_err(|e| KVStoreError::corruption(format!("encode: {}", e)))
}

/// Deserialize a stored record. Undecodable bytes are corruption.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, KVStoreError> {
    serde_json::from_slice(bytes).map_err(|e| KVStoreError::corruption(format!("decode: {}", e)))
}
