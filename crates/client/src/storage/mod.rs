//! Durable per-profile key-value storage.
//!
//! The browser analog is `localStorage`: a synchronous string-to-string
//! mapping that survives restarts within the same profile. Reads that fail
//! or return malformed data decay to "absent"; writes that fail surface a
//! [`StorageError`] to the caller rather than being silently dropped.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Fixed storage keys used by the client.
pub mod keys {
    /// Serialized cart snapshot.
    pub const CART: &str = "agrolink_cart";

    /// Cached session user.
    pub const CURRENT_USER: &str = "agrolink_user";

    /// Append-only array of locally placed order records.
    pub const ORDERS: &str = "agrolink_orders";
}

/// Errors that can occur talking to the key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure (file missing permissions, disk full, ...).
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store's own on-disk representation could not be written.
    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A synchronous string-to-string store with durable semantics.
///
/// Implementations must make `set` visible to every subsequent `get` within
/// the same process; durability across restarts is implementation-defined
/// ([`MemoryStore`] is volatile, [`JsonFileStore`] is not).
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store itself is unreadable. A missing
    /// key is `Ok(None)`, never an error.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write cannot be made durable.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the removal cannot be made durable.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
