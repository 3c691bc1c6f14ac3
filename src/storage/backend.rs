//! Key-value store abstraction.
//!
//! This module defines the [`KeyValueStore`] trait, the port through which the list
//! controller reaches the browser's `localStorage`. The trait is deliberately as
//! small as the one call site needs: read a string by key, write a string by key.
//!
//! # Implementations
//!
//! - [`MemoryStore`](crate::storage::MemoryStore): in-process map, used natively and in tests
//! - `web::storage::LocalStorage`: `window.localStorage` (wasm32 only)

use crate::domain::error::Result;

/// String-keyed, string-valued persistent store.
///
/// Methods take `&self`: the browser store is a shared global, and in-memory
/// implementations use interior mutability to match it.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored there.
    ///
    /// # Errors
    ///
    /// Returns an error if the store itself is unavailable (for example, storage
    /// disabled by browser privacy settings).
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected (quota exceeded, store
    /// unavailable).
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
