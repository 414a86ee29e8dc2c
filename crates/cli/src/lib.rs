//! Shop Inventory CLI - library half of `inv-cli`.
//!
//! Split out of the binary so command handlers and the file-backed storage
//! can be exercised from tests.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`storage`] - File-backed storage slots
//! - [`commands`] - Shop and product command handlers
//! - [`render`] - Text output

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod commands;
pub mod config;
pub mod render;
pub mod storage;

use shop_inventory_core::{Persistor, Store};

pub use config::{CliConfig, ConfigError};
pub use storage::FileStorage;

/// Open the persisted inventory and wire the store to write back to it.
#[must_use]
pub fn open_store(config: &CliConfig) -> Store {
    let persistor = Persistor::with_root_key(FileStorage::new(&config.data_dir), &config.storage_key);
    let mut store = Store::with_state(persistor.hydrate());
    store.subscribe(persistor);
    store
}
