//! In-memory storage implementation

use std::collections::HashMap;
use std::sync::RwLock;

use super::{KeyValueStore, Slot, StorageError, StoreResult};

/// In-memory slot store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<Slot, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, slot: Slot) -> StoreResult<Option<String>> {
        let slots = self.slots.read().map_err(|_| StorageError::Poisoned)?;
        Ok(slots.get(&slot).cloned())
    }

    fn set(&self, slot: Slot, value: &str) -> StoreResult<()> {
        self.slots
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .insert(slot, value.to_owned());
        Ok(())
    }

    fn remove(&self, slot: Slot) -> StoreResult<()> {
        self.slots
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .remove(&slot);
        Ok(())
    }
}
