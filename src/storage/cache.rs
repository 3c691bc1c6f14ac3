//! Snapshot cache of the full record collection.
//!
//! One entry, one fixed key, no versioning and no expiry. The list controller reads
//! it once at start and writes it once per successful fetch. Anything that fails to
//! decode as a JSON array of records counts as a miss.

use crate::domain::error::{BlogfrontError, Result};
use crate::domain::Record;
use crate::storage::backend::KeyValueStore;

/// Record-collection cache over a [`KeyValueStore`].
#[derive(Debug)]
pub struct RecordCache<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> RecordCache<S> {
    /// Creates a cache that reads and writes `key` in `store`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The storage key this cache owns.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the cached collection, or `None` on a miss.
    ///
    /// Store failures and decode failures are both misses: they are logged and
    /// swallowed, never surfaced to the reader.
    #[must_use]
    pub fn read(&self) -> Option<Vec<Record>> {
        let _span = tracing::debug_span!("cache_read", key = %self.key).entered();

        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("cache empty");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cache unavailable, treating as miss");
                return None;
            }
        };

        match serde_json::from_str::<Vec<Record>>(&raw) {
            Ok(records) => {
                tracing::debug!(count = records.len(), "cache hit");
                Some(records)
            }
            Err(e) => {
                tracing::debug!(error = %e, bytes = raw.len(), "ignoring undecodable cache entry");
                None
            }
        }
    }

    /// Replaces the cached collection.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the store rejects the write.
    pub fn write(&self, records: &[Record]) -> Result<()> {
        let _span =
            tracing::debug_span!("cache_write", key = %self.key, count = records.len()).entered();

        let json = serde_json::to_string(records)
            .map_err(|e| BlogfrontError::Storage(format!("failed to serialize records: {e}")))?;
        self.store.set(&self.key, &json)?;

        tracing::debug!(bytes = json.len(), "cache written");
        Ok(())
    }
}
