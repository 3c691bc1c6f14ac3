//! `window.localStorage` as a [`KeyValueStore`].

use crate::domain::error::{BlogfrontError, Result};
use crate::storage::KeyValueStore;
use web_sys::{Storage, Window};

/// Missing when storage is disabled; every call then fails with
/// [`BlogfrontError::Storage`], which the record cache treats as a miss.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn new(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            tracing::warn!("localStorage unavailable");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| BlogfrontError::Storage("localStorage unavailable".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| BlogfrontError::Storage(super::js_error_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| BlogfrontError::Storage(super::js_error_message(&e)))
    }
}
