//! Versioned persistence of the inventory into a key-value slot.
//!
//! The whole state is written as one JSON blob on every applied mutation,
//! stamped with [`SCHEMA_VERSION`]:
//!
//! ```json
//! { "version": 1, "shops": [ { "id": 1, "name": "A", "products": [], ... } ] }
//! ```
//!
//! Reading is forgiving. A missing slot, a backend error, malformed JSON or a
//! different version stamp all hydrate to an empty inventory. Writes that
//! fail are logged and dropped. There is no retry and no migration.
//!
//! The [`Storage`] trait is the only I/O seam; this crate ships an in-memory
//! implementation and leaves durable backends to the front end.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{InventoryObserver, InventoryState};
use crate::types::Shop;

/// Current persisted schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Root key used when none is configured.
pub const DEFAULT_ROOT_KEY: &str = "root";

/// Prefix applied to the root key to form the storage slot key.
pub const SLOT_PREFIX: &str = "persist:";

/// Errors raised by a [`Storage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors that can occur while saving or loading the inventory.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to serialize inventory: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to deserialize inventory: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("unsupported schema version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// A durable key-value slot holding serialized state.
pub trait Storage {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`, for inspection.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Serialize)]
struct PersistedStateRef<'a> {
    version: u32,
    shops: &'a [Shop],
}

#[derive(Deserialize)]
struct PersistedState {
    version: u32,
    #[serde(default)]
    shops: Vec<Shop>,
}

/// Serialize the state into the versioned blob format.
///
/// # Errors
///
/// Returns `PersistError::Serialize` if JSON encoding fails.
pub fn encode(state: &InventoryState) -> Result<String, PersistError> {
    serde_json::to_string(&PersistedStateRef {
        version: SCHEMA_VERSION,
        shops: &state.shops,
    })
    .map_err(PersistError::Serialize)
}

/// Parse a versioned blob.
///
/// # Errors
///
/// Returns `PersistError::Deserialize` for malformed input and
/// `PersistError::UnsupportedVersion` when the stamp is not
/// [`SCHEMA_VERSION`].
pub fn decode(blob: &str) -> Result<InventoryState, PersistError> {
    let persisted: PersistedState =
        serde_json::from_str(blob).map_err(PersistError::Deserialize)?;
    if persisted.version != SCHEMA_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: persisted.version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(InventoryState::new(persisted.shops))
}

/// Slot key for a root key (e.g. `root` → `persist:root`).
#[must_use]
pub fn slot_key(root_key: &str) -> String {
    format!("{SLOT_PREFIX}{root_key}")
}

/// Writes the inventory to a [`Storage`] slot and reads it back on startup.
#[derive(Debug, Clone)]
pub struct Persistor<S> {
    storage: S,
    key: String,
}

impl<S: Storage> Persistor<S> {
    /// Persist under the default root key.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_root_key(storage, DEFAULT_ROOT_KEY)
    }

    /// Persist under `persist:<root_key>`.
    #[must_use]
    pub fn with_root_key(storage: S, root_key: &str) -> Self {
        Self {
            storage,
            key: slot_key(root_key),
        }
    }

    /// The storage slot key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored state.
    ///
    /// Returns `Ok(None)` when the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the slot cannot be read or parsed.
    pub fn load(&self) -> Result<Option<InventoryState>, PersistError> {
        self.storage
            .read(&self.key)?
            .map(|blob| decode(&blob))
            .transpose()
    }

    /// Write the given state.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if serialization or the write fails.
    pub fn save(&self, state: &InventoryState) -> Result<(), PersistError> {
        let blob = encode(state)?;
        self.storage.write(&self.key, &blob)?;
        Ok(())
    }

    /// Load the stored state, degrading any failure to an empty inventory.
    #[must_use]
    pub fn hydrate(&self) -> InventoryState {
        match self.load() {
            Ok(Some(state)) => {
                tracing::info!(key = %self.key, shops = state.shops.len(), "Inventory restored");
                state
            }
            Ok(None) => {
                tracing::info!(key = %self.key, "No stored inventory, starting empty");
                InventoryState::default()
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Stored inventory unreadable, starting empty");
                InventoryState::default()
            }
        }
    }
}

impl<S: Storage> InventoryObserver for Persistor<S> {
    fn state_changed(&self, state: &InventoryState) {
        if let Err(e) = self.save(state) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist inventory, write dropped");
        }
    }
}
