//! In-memory key-value store.
//!
//! Stands in for `localStorage` outside the browser. It can also be told to
//! reject writes, which is how the tests exercise a full storage quota.

use crate::domain::error::{BlogfrontError, Result};
use crate::storage::backend::KeyValueStore;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// `HashMap`-backed [`KeyValueStore`].
///
/// Single-threaded like the page it emulates: interior mutability is `RefCell`,
/// not a lock.
///
/// # Examples
///
/// ```
/// use blogfront::storage::{KeyValueStore, MemoryStore};
///
/// let store = MemoryStore::default();
/// store.set("greeting", "hello")?;
/// assert_eq!(store.get("greeting")?.as_deref(), Some("hello"));
/// # Ok::<(), blogfront::BlogfrontError>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    reject_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    /// Creates a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Makes every subsequent [`KeyValueStore::set`] fail as if the quota were full.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    /// Number of successful writes since creation.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes.get() {
            return Err(BlogfrontError::Storage(format!(
                "quota exceeded while writing {key}"
            )));
        }

        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
