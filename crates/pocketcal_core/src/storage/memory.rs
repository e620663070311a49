//! In-memory blob backend.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::HashMap;

/// `HashMap`-backed store with an optional per-blob byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    blobs: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects any blob larger than `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            blobs: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Seeds a raw blob, bypassing the quota. Useful for corrupt-data setups.
    pub fn insert_raw(&mut self, key: impl Into<String>, blob: impl Into<String>) {
        self.blobs.insert(key.into(), blob.into());
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, blob: &str) -> StorageResult<()> {
        if let Some(limit) = self.quota_bytes {
            if blob.len() > limit {
                return Err(StorageError::CapacityExceeded {
                    key: key.to_string(),
                    limit,
                    attempted: blob.len(),
                });
            }
        }
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
