//! Storage layer for the cached record snapshot.
//!
//! The only thing this crate persists is one JSON array of records under one key.
//! The layer is split the same way as any other backend: a port, an in-memory
//! implementation, and the typed cache on top.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] port
//! - `memory`: [`MemoryStore`] for native hosts and tests
//! - `cache`: [`RecordCache`] with decode-failure-is-a-miss semantics

pub mod backend;
pub mod cache;
pub mod memory;

pub use backend::KeyValueStore;
pub use cache::RecordCache;
pub use memory::MemoryStore;
