//! File-based storage implementation
//!
//! Each slot is a standalone JSON file (`cart.json`, `user.json`,
//! `orders.json`) under a data directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, Slot, StoreResult};

/// Slot store backed by one file per slot.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`.
    ///
    /// The directory is not touched until the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.json", slot.key()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, slot: Slot) -> StoreResult<Option<String>> {
        match std::fs::read_to_string(self.path(slot)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, slot: Slot, value: &str) -> StoreResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(slot), value)?;
        tracing::debug!(slot = %slot, bytes = value.len(), "Slot written");
        Ok(())
    }

    fn remove(&self, slot: Slot) -> StoreResult<()> {
        match std::fs::remove_file(self.path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
