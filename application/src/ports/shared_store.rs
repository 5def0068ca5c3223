//! Shared store port
//!
//! A key-addressed store of entries, each entry a small map of string fields.
//! Entries are keyed by request id; the upstream NLP stage writes the `nlp`
//! field and this service writes the `classification` field. Writes overwrite
//! (last writer wins) and no locking is implied across requests.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the store backend itself. Absence is not an error.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait SharedStore: Send + Sync {
    /// Read one field of an entry. `Ok(None)` if the entry or the field is absent.
    async fn get(&self, entry: &str, field: &str) -> Result<Option<String>, StoreError>;

    /// Write one field of an entry, creating the entry if needed.
    async fn put(&self, entry: &str, field: &str, value: String) -> Result<(), StoreError>;
}
