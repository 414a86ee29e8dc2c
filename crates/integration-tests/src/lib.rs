//! Integration tests for Shop Inventory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shop-inventory-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `inventory_scenarios` - Store behavior end to end, with in-memory persistence
//! - `file_persistence` - Restarting the CLI store against a data directory
