//! Shop records and their derived stock totals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{IdsExhausted, ProductId, ShopId};
use super::product::Product;

/// A named container of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    /// Unique within the top-level shop list.
    pub id: ShopId,
    pub name: String,
    pub description: String,
    /// Image URL.
    pub image: String,
    /// Products in insertion order.
    pub products: Vec<Product>,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
}

impl Shop {
    /// Create a shop with no products.
    #[must_use]
    pub fn new(
        id: ShopId,
        name: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            image: image.into(),
            products: Vec::new(),
            created_at,
        }
    }

    /// First product with the given ID.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub(crate) fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// ID the next product in this shop should get.
    ///
    /// # Errors
    ///
    /// Returns `IdsExhausted` once a product holds `i32::MAX`.
    pub fn next_product_id(&self) -> Result<ProductId, IdsExhausted> {
        ProductId::next_after(self.products.iter().map(|p| p.id))
    }

    /// Aggregate unit count and stock value across all products.
    ///
    /// Both sums saturate instead of overflowing.
    #[must_use]
    pub fn totals(&self) -> ShopTotals {
        self.products
            .iter()
            .fold(ShopTotals::default(), |mut totals, product| {
                totals.product_count += 1;
                totals.total_quantity = totals.total_quantity.saturating_add(product.quantity);
                totals.total_value = totals.total_value.saturating_add(product.stock_value());
                totals
            })
    }
}

/// Derived per-shop totals. Computed on demand, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShopTotals {
    /// Number of distinct products.
    pub product_count: usize,
    /// Sum of all product quantities.
    pub total_quantity: u64,
    /// Sum of `price × quantity` over all products, capped at
    /// [`Decimal::MAX`].
    pub total_value: Decimal,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn product(id: i32, price: Decimal, quantity: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: "Test product".to_string(),
            image: "https://example.com/p.png".to_string(),
            price,
            quantity,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn shop() -> Shop {
        Shop::new(
            ShopId::new(1),
            "Corner Shop",
            "Everything you need",
            "https://example.com/shop.png",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_new_shop_is_empty() {
        let shop = shop();
        assert!(shop.products.is_empty());
        assert_eq!(shop.totals(), ShopTotals::default());
        assert_eq!(shop.next_product_id(), Ok(ProductId::new(1)));
    }

    #[test]
    fn test_totals() {
        let mut shop = shop();
        shop.products.push(product(1, Decimal::new(10, 0), 3));
        shop.products.push(product(2, Decimal::new(250, 2), 2));
        shop.products.push(product(3, Decimal::new(99, 0), 0));

        let totals = shop.totals();
        assert_eq!(totals.product_count, 3);
        assert_eq!(totals.total_quantity, 5);
        assert_eq!(totals.total_value, Decimal::new(35, 0));
    }

    #[test]
    fn test_totals_saturate_on_huge_stock() {
        let mut shop = shop();
        shop.products.push(product(1, Decimal::new(10_000_000_000, 0), u64::MAX));
        shop.products.push(product(2, Decimal::MAX, 2));
        shop.products.push(product(3, Decimal::ONE, u64::MAX));

        let totals = shop.totals();
        assert_eq!(totals.total_value, Decimal::MAX);
        assert_eq!(totals.total_quantity, u64::MAX);
    }

    #[test]
    fn test_next_product_id_exhausted() {
        let mut shop = shop();
        shop.products.push(product(i32::MAX, Decimal::ONE, 1));
        assert!(shop.next_product_id().is_err());
    }

    #[test]
    fn test_next_product_id_after_gap() {
        let mut shop = shop();
        shop.products.push(product(5, Decimal::ONE, 1));
        shop.products.push(product(2, Decimal::ONE, 1));
        assert_eq!(shop.next_product_id(), Ok(ProductId::new(6)));
    }

    #[test]
    fn test_product_lookup_returns_first_match() {
        let mut shop = shop();
        shop.products.push(product(1, Decimal::ONE, 1));
        let mut duplicate = product(1, Decimal::ONE, 7);
        duplicate.name = "Duplicate".to_string();
        shop.products.push(duplicate);

        assert_eq!(shop.product(ProductId::new(1)).unwrap().quantity, 1);
        assert!(shop.product(ProductId::new(2)).is_none());
    }
}
