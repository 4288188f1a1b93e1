//! Persistence layer.
//!
//! The combat session persists as one JSON document under one key. The
//! `KeyValueStore` trait keeps the backend swappable: files on disk for the
//! desktop screen, memory for tests. `SessionStore` sits on top and owns the
//! session contract: saves are fire-and-forget, loads never fail.

pub mod error;
pub mod file;
pub mod memory;
pub mod session_store;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use session_store::{SessionStore, SESSION_KEY};

/// Minimal synchronous key-value store.
pub trait KeyValueStore {
    /// Fetch the value under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Drop `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
