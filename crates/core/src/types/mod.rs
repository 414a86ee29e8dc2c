//! Core types for Shop Inventory.
//!
//! Entity records (shops and the products they own), type-safe IDs, and
//! price formatting. These carry no behavior beyond derived values.

pub mod id;
pub mod price;
pub mod product;
pub mod shop;

pub use id::*;
pub use price::{format_amount, format_currency};
pub use product::{Product, ProductPatch};
pub use shop::{Shop, ShopTotals};
