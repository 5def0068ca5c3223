//! In-process shared store.
//!
//! Entries are keyed by request id and hold a map of named fields. Used by the
//! CLI and by tests; a networked backend would implement the same port.

use async_trait::async_trait;
use companion_application::ports::shared_store::{SharedStore, StoreError};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::trace;

type Entry = HashMap<String, String>;

#[derive(Debug, Default)]
pub struct InMemorySharedStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemorySharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace an entry wholesale.
    pub async fn insert_entry(&self, entry: impl Into<String>, fields: Entry) {
        self.entries.write().await.insert(entry.into(), fields);
    }

    pub async fn remove_entry(&self, entry: &str) -> Option<Entry> {
        self.entries.write().await.remove(entry)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SharedStore for InMemorySharedStore {
    async fn get(&self, entry: &str, field: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().await;
        let value = entries.get(entry).and_then(|fields| fields.get(field)).cloned();
        trace!(entry, field, found = value.is_some(), "store get");
        Ok(value)
    }

    async fn put(&self, entry: &str, field: &str, value: String) -> Result<(), StoreError> {
        trace!(entry, field, bytes = value.len(), "store put");
        self.entries
            .write()
            .await
            .entry(entry.to_string())
            .or_default()
            .insert(field.to_string(), value);
        Ok(())
    }
}
