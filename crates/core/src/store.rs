//! The shop/product state container.
//!
//! [`Store`] owns the ordered list of shops and is the only thing that
//! mutates it. Callers describe a change as a [`Mutation`] and the store
//! applies it synchronously: there is no intermediate observable state, and
//! observers only ever see the state after a mutation has fully landed.
//!
//! # No-op on miss
//!
//! A mutation that names an unknown shop or product does nothing. This is
//! not an error: [`Store::dispatch`] reports it as [`Outcome::NotFound`] so
//! the front end can dispatch without checking existence first, and tests can
//! assert on it directly.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use shop_inventory_core::{Outcome, Shop, ShopId, ProductId, Store};
//!
//! let mut store = Store::new();
//! let id = store.next_shop_id().unwrap();
//! let shop = Shop::new(id, "A", "First shop", "https://example.com/a.png", Utc::now());
//! assert_eq!(store.create_shop(shop), Outcome::Applied);
//!
//! // Unknown shop: nothing happens, and the outcome says so.
//! let outcome = store.set_product_quantity(ShopId::new(999), ProductId::new(1), 5);
//! assert!(outcome.is_not_found());
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{IdsExhausted, Product, ProductId, ProductPatch, Shop, ShopId};

/// The full inventory: every shop, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryState {
    pub shops: Vec<Shop>,
}

impl InventoryState {
    /// Create a state holding the given shops.
    #[must_use]
    pub const fn new(shops: Vec<Shop>) -> Self {
        Self { shops }
    }

    /// First shop with the given ID.
    #[must_use]
    pub fn shop(&self, id: ShopId) -> Option<&Shop> {
        self.shops.iter().find(|s| s.id == id)
    }

    /// Locate a product, reporting which part of the path is missing.
    ///
    /// # Errors
    ///
    /// Returns the [`Missing`] entity when the shop or product is unknown.
    pub fn find_product(&self, shop_id: ShopId, product_id: ProductId) -> Result<&Product, Missing> {
        self.shop(shop_id)
            .ok_or(Missing::Shop(shop_id))?
            .product(product_id)
            .ok_or(Missing::Product {
                shop_id,
                product_id,
            })
    }

    fn shop_mut(&mut self, id: ShopId) -> Option<&mut Shop> {
        self.shops.iter_mut().find(|s| s.id == id)
    }

    /// ID the next shop should get (`max(id) + 1`, or 1 when empty).
    ///
    /// # Errors
    ///
    /// Returns `IdsExhausted` once a shop holds `i32::MAX`.
    pub fn next_shop_id(&self) -> Result<ShopId, IdsExhausted> {
        ShopId::next_after(self.shops.iter().map(|s| s.id))
    }

    /// Apply a mutation in place.
    ///
    /// Total over all inputs: never panics, and leaves the state untouched
    /// when the outcome is [`Outcome::NotFound`].
    pub fn apply(&mut self, mutation: Mutation) -> Outcome {
        match mutation {
            Mutation::CreateShop(shop) => {
                self.shops.push(shop);
                Outcome::Applied
            }
            Mutation::CreateProduct { shop_id, product } => match self.shop_mut(shop_id) {
                Some(shop) => {
                    shop.products.push(product);
                    Outcome::Applied
                }
                None => Outcome::NotFound(Missing::Shop(shop_id)),
            },
            Mutation::SetProductQuantity {
                shop_id,
                product_id,
                quantity,
            } => self.with_product(shop_id, product_id, |product| {
                product.quantity = quantity.max(0).unsigned_abs();
            }),
            Mutation::ReplaceProductFields {
                shop_id,
                product_id,
                patch,
            } => self.with_product(shop_id, product_id, |product| {
                product.apply_patch(patch);
            }),
            Mutation::DeleteProduct {
                shop_id,
                product_id,
            } => {
                let Some(shop) = self.shop_mut(shop_id) else {
                    return Outcome::NotFound(Missing::Shop(shop_id));
                };
                let before = shop.products.len();
                shop.products.retain(|p| p.id != product_id);
                if shop.products.len() == before {
                    Outcome::NotFound(Missing::Product {
                        shop_id,
                        product_id,
                    })
                } else {
                    Outcome::Applied
                }
            }
        }
    }

    fn with_product(
        &mut self,
        shop_id: ShopId,
        product_id: ProductId,
        f: impl FnOnce(&mut Product),
    ) -> Outcome {
        let Some(shop) = self.shop_mut(shop_id) else {
            return Outcome::NotFound(Missing::Shop(shop_id));
        };
        match shop.product_mut(product_id) {
            Some(product) => {
                f(product);
                Outcome::Applied
            }
            None => Outcome::NotFound(Missing::Product {
                shop_id,
                product_id,
            }),
        }
    }
}

/// A request to change the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Append a shop. IDs are not checked for uniqueness.
    CreateShop(Shop),
    /// Append a product to a shop.
    CreateProduct { shop_id: ShopId, product: Product },
    /// Set a product's quantity, clamping negative values to zero.
    SetProductQuantity {
        shop_id: ShopId,
        product_id: ProductId,
        quantity: i64,
    },
    /// Merge fields over a product, keeping its `id` and `created_at`.
    ReplaceProductFields {
        shop_id: ShopId,
        product_id: ProductId,
        patch: ProductPatch,
    },
    /// Remove a product from a shop.
    DeleteProduct {
        shop_id: ShopId,
        product_id: ProductId,
    },
}

impl Mutation {
    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CreateShop(_) => "create_shop",
            Self::CreateProduct { .. } => "create_product",
            Self::SetProductQuantity { .. } => "set_product_quantity",
            Self::ReplaceProductFields { .. } => "replace_product_fields",
            Self::DeleteProduct { .. } => "delete_product",
        }
    }
}

/// Result of dispatching a [`Mutation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The mutation changed the state.
    Applied,
    /// The referenced entity does not exist; the state is unchanged.
    NotFound(Missing),
}

impl Outcome {
    /// Whether the mutation was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Whether the mutation was a no-op on a missing entity.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// The entity a no-op mutation referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Shop(ShopId),
    Product {
        shop_id: ShopId,
        product_id: ProductId,
    },
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shop(id) => write!(f, "shop {id} not found"),
            Self::Product {
                shop_id,
                product_id,
            } => write!(f, "product {product_id} not found in shop {shop_id}"),
        }
    }
}

/// Notified with the full state after every applied mutation.
///
/// Persistence hooks in here (see [`crate::persist::Persistor`]), keeping the
/// storage format out of the mutation logic.
pub trait InventoryObserver {
    /// Called once per applied mutation, after it has landed.
    fn state_changed(&self, state: &InventoryState);
}

/// Owns the inventory state and the observers watching it.
#[derive(Default)]
pub struct Store {
    state: InventoryState,
    observers: Vec<Box<dyn InventoryObserver>>,
}

impl Store {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with existing state (e.g. from
    /// [`crate::persist::Persistor::hydrate`]).
    #[must_use]
    pub fn with_state(state: InventoryState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn subscribe(&mut self, observer: impl InventoryObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &InventoryState {
        &self.state
    }

    /// All shops in creation order.
    #[must_use]
    pub fn shops(&self) -> &[Shop] {
        &self.state.shops
    }

    /// First shop with the given ID.
    #[must_use]
    pub fn shop(&self, id: ShopId) -> Option<&Shop> {
        self.state.shop(id)
    }

    /// ID the next shop should get.
    ///
    /// # Errors
    ///
    /// Returns `IdsExhausted` once a shop holds `i32::MAX`.
    pub fn next_shop_id(&self) -> Result<ShopId, IdsExhausted> {
        self.state.next_shop_id()
    }

    /// ID the next product in `shop_id` should get, or `None` if the shop
    /// does not exist.
    #[must_use]
    pub fn next_product_id(&self, shop_id: ShopId) -> Option<Result<ProductId, IdsExhausted>> {
        self.state.shop(shop_id).map(Shop::next_product_id)
    }

    /// Apply a mutation and notify observers if it changed anything.
    pub fn dispatch(&mut self, mutation: Mutation) -> Outcome {
        let kind = mutation.kind();
        let outcome = self.state.apply(mutation);

        match outcome {
            Outcome::Applied => {
                tracing::debug!(mutation = kind, shops = self.state.shops.len(), "Mutation applied");
                for observer in &self.observers {
                    observer.state_changed(&self.state);
                }
            }
            Outcome::NotFound(missing) => {
                tracing::debug!(mutation = kind, %missing, "Mutation skipped");
            }
        }

        outcome
    }

    /// Append a shop.
    pub fn create_shop(&mut self, shop: Shop) -> Outcome {
        self.dispatch(Mutation::CreateShop(shop))
    }

    /// Append a product to a shop.
    pub fn create_product(&mut self, shop_id: ShopId, product: Product) -> Outcome {
        self.dispatch(Mutation::CreateProduct { shop_id, product })
    }

    /// Set a product's quantity to `max(0, quantity)`.
    pub fn set_product_quantity(
        &mut self,
        shop_id: ShopId,
        product_id: ProductId,
        quantity: i64,
    ) -> Outcome {
        self.dispatch(Mutation::SetProductQuantity {
            shop_id,
            product_id,
            quantity,
        })
    }

    /// Merge `patch` over a product, keeping its `id` and `created_at`.
    pub fn replace_product_fields(
        &mut self,
        shop_id: ShopId,
        product_id: ProductId,
        patch: ProductPatch,
    ) -> Outcome {
        self.dispatch(Mutation::ReplaceProductFields {
            shop_id,
            product_id,
            patch,
        })
    }

    /// Remove a product from a shop.
    pub fn delete_product(&mut self, shop_id: ShopId, product_id: ProductId) -> Outcome {
        self.dispatch(Mutation::DeleteProduct {
            shop_id,
            product_id,
        })
    }

    /// Consume the store, returning its state.
    #[must_use]
    pub fn into_state(self) -> InventoryState {
        self.state
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}
