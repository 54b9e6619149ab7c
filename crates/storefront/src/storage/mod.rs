//! Durable key-value storage for cart, profile and order state.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] is the persistence seam; models hold an
//!   `Arc<dyn KeyValueStore>` and write through on every mutation
//! - Values are whole JSON documents keyed by a named [`Slot`]
//! - [`FileStore`] keeps one file per slot on disk, [`MemoryStore`] keeps
//!   them in-process
//!
//! Stored documents carry no schema version. A slot that cannot be read or
//! parsed is treated as absent so a corrupted file never blocks startup.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when reading or writing a slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be serialized to JSON.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A previous writer panicked while holding the store lock.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StorageError>;

/// Named storage slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// JSON array of cart lines.
    Cart,
    /// JSON object holding the logged-in profile, absent when logged out.
    User,
    /// JSON array of every recorded order, across all users.
    Orders,
}

impl Slot {
    /// Storage key for this slot.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::User => "user",
            Self::Orders => "orders",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Trait for raw slot storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw contents of a slot, `None` if it was never written.
    fn get(&self, slot: Slot) -> StoreResult<Option<String>>;

    /// Replace the contents of a slot.
    fn set(&self, slot: Slot, value: &str) -> StoreResult<()>;

    /// Erase a slot. Erasing an absent slot is not an error.
    fn remove(&self, slot: Slot) -> StoreResult<()>;
}

/// Load and parse a slot.
///
/// Returns `None` when the slot is absent, unreadable, or holds JSON that
/// does not match `T`. Read and parse failures are logged, not returned.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, slot: Slot) -> Option<T> {
    let raw = match store.get(slot) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(slot = %slot, error = %e, "Failed to read slot, treating as empty");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(slot = %slot, error = %e, "Malformed slot contents, treating as empty");
            None
        }
    }
}

/// Load a slot holding a JSON array, decoding each element on its own.
///
/// Elements that do not match `T` are logged and skipped so one bad record
/// never discards the rest. An absent or non-array slot yields no records.
pub fn load_json_records<T: DeserializeOwned>(store: &dyn KeyValueStore, slot: Slot) -> Vec<T> {
    let Some(values) = load_json::<Vec<serde_json::Value>>(store, slot) else {
        return Vec::new();
    };

    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(slot = %slot, index, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect()
}

/// Serialize a value and write it to a slot.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the underlying write fails.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    slot: Slot,
    value: &T,
) -> StoreResult<()> {
    let json = serde_json::to_string(value)?;
    store.set(slot, &json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_keys() {
        assert_eq!(Slot::Cart.key(), "cart");
        assert_eq!(Slot::User.to_string(), "user");
        assert_eq!(Slot::Orders.key(), "orders");
    }

    #[test]
    fn test_load_json_absent_slot() {
        let store = MemoryStore::new();
        assert!(load_json::<Vec<u32>>(&store, Slot::Cart).is_none());
    }

    #[test]
    fn test_load_json_malformed_is_absent() {
        let store = MemoryStore::new();
        store.set(Slot::Cart, "{not json").unwrap();
        assert!(load_json::<Vec<u32>>(&store, Slot::Cart).is_none());

        store.set(Slot::Cart, "{\"wrong\":\"shape\"}").unwrap();
        assert!(load_json::<Vec<u32>>(&store, Slot::Cart).is_none());
    }

    #[test]
    fn test_load_json_records_skips_bad_elements() {
        let store = MemoryStore::new();
        store.set(Slot::Orders, "[1, \"two\", 3]").unwrap();
        assert_eq!(load_json_records::<u32>(&store, Slot::Orders), vec![1, 3]);

        store.set(Slot::Orders, "{\"not\":\"an array\"}").unwrap();
        assert!(load_json_records::<u32>(&store, Slot::Orders).is_empty());

        store.remove(Slot::Orders).unwrap();
        assert!(load_json_records::<u32>(&store, Slot::Orders).is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save_json(&store, Slot::Orders, &vec![1_u32, 2, 3]).unwrap();
        assert_eq!(load_json::<Vec<u32>>(&store, Slot::Orders), Some(vec![1, 2, 3]));
    }
}
