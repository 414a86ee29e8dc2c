//! Product records and partial product updates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A priced, quantified item owned by exactly one shop.
///
/// Field contents are not validated here; see
/// [`crate::validation::ProductForm`] for the input rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique within the owning shop's product list.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Image URL.
    pub image: String,
    /// Unit price, never negative.
    pub price: Decimal,
    /// Units in stock.
    pub quantity: u64,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Value of the stock on hand (`price × quantity`), capped at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn stock_value(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Whether no units are left.
    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    /// Merge `patch` over this product.
    ///
    /// `id` and `created_at` are identity fields: whatever the patch carries
    /// for them is discarded.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        let ProductPatch {
            id: _,
            name,
            description,
            image,
            price,
            quantity,
            created_at: _,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(image) = image {
            self.image = image;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(quantity) = quantity {
            self.quantity = quantity;
        }
    }
}

/// A partial set of product fields.
///
/// Mirrors the shape of [`Product`] with every field optional. `id` and
/// `created_at` are accepted so callers can pass a whole product back in,
/// but [`Product::apply_patch`] never writes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub id: Option<ProductId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ProductPatch {
    /// Whether the patch carries no editable field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
    }
}

impl From<Product> for ProductPatch {
    fn from(product: Product) -> Self {
        Self {
            id: Some(product.id),
            name: Some(product.name),
            description: Some(product.description),
            image: Some(product.image),
            price: Some(product.price),
            quantity: Some(product.quantity),
            created_at: Some(product.created_at),
        }
    }
}
