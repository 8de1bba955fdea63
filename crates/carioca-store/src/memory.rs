use async_trait::async_trait;
use carioca_core::{HandKey, PlayRecord, PlayStore, StoreError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Collections kept in memory for the lifetime of the store.
#[derive(Debug)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<PlayRecord>>>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// While unavailable every call fails with `StoreError::Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn records(&self, collection: &str) -> Vec<PlayRecord> {
        self.collections
            .lock()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections.lock().get(collection).map_or(0, Vec::len)
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store switched off".to_string()))
        }
    }
}

#[async_trait]
impl PlayStore for MemoryStore {
    async fn append(&self, collection: &str, record: PlayRecord) -> Result<(), StoreError> {
        self.ensure_available()?;
        let mut collections = self.collections.lock();
        let records = collections.entry(collection.to_string()).or_default();
        records.push(record);
        debug!(collection, total = records.len(), "appended record");
        Ok(())
    }

    async fn exists_by_key(&self, collection: &str, key: &HandKey) -> Result<bool, StoreError> {
        self.ensure_available()?;
        Ok(self
            .collections
            .lock()
            .get(collection)
            .is_some_and(|records| records.iter().any(|r| &r.key == key)))
    }
}
