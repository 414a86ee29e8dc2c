//! Shop Inventory Core - Shops, products and the store that holds them.
//!
//! This crate is used by:
//! - `cli` - Command-line front end for managing shops and stock
//! - `integration-tests` - Cross-crate scenario tests
//!
//! # Architecture
//!
//! The core crate contains types, the state container, validation and the
//! persistence contract - no file or network I/O. Durable storage backends
//! implement [`persist::Storage`] elsewhere.
//!
//! # Modules
//!
//! - [`types`] - Shop and product records, type-safe IDs, amount formatting
//! - [`store`] - The state container and its mutation intents
//! - [`persist`] - Versioned persistence into a key-value slot
//! - [`validation`] - Form validation run before dispatching mutations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod persist;
pub mod store;
pub mod types;
pub mod validation;

pub use persist::{MemoryStorage, PersistError, Persistor, Storage, StorageError};
pub use store::{InventoryObserver, InventoryState, Missing, Mutation, Outcome, Store};
pub use types::*;
