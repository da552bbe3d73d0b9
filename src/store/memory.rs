use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Record, Repository};

/// Process-memory repository. Records live until the process exits.
pub struct MemoryRepository<T: Record> {
    records: RwLock<BTreeMap<T::Key, T>>,
}

impl<T: Record> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Record> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryRepository<T> {
    async fn get(&self, key: &T::Key) -> Option<T> {
        self.records.read().await.get(key).cloned()
    }

    async fn list(&self) -> Vec<T> {
        self.records.read().await.values().cloned().collect()
    }

    async fn upsert(&self, record: T) -> Option<T> {
        self.records.write().await.insert(record.key(), record)
    }
}
