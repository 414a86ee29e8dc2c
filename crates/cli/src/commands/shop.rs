//! Shop commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a shop
//! inv-cli shop create -n "Corner Shop" -d "Groceries and more" -i https://example.com/shop.png
//!
//! # List shops with totals
//! inv-cli shop list
//!
//! # Show one shop and its products
//! inv-cli shop show 1
//! ```

use std::io::Write;

use chrono::Utc;
use shop_inventory_core::validation::ShopForm;
use shop_inventory_core::{ShopId, Store};

use super::{CommandError, report};
use crate::render;

/// Validate and create a shop with the next free ID.
///
/// # Errors
///
/// Returns `CommandError::Validation` if any field is blank and
/// `CommandError::IdsExhausted` if no shop ID is left.
pub fn create(store: &mut Store, form: &ShopForm, out: &mut impl Write) -> Result<ShopId, CommandError> {
    let draft = form.validate()?;
    let id = store.next_shop_id()?;
    let shop = draft.into_shop(id, Utc::now());

    tracing::info!(shop_id = %id, name = %shop.name, "Creating shop");
    let outcome = store.create_shop(shop);
    report(out, outcome, &format!("Created shop #{id}"))?;
    Ok(id)
}

/// List all shops.
///
/// # Errors
///
/// Returns `CommandError::Io` if writing fails.
pub fn list(store: &Store, out: &mut impl Write) -> Result<(), CommandError> {
    render::shop_list(out, store.shops())?;
    Ok(())
}

/// Show a shop with its products.
///
/// # Errors
///
/// Returns `CommandError::ShopNotFound` for an unknown ID.
pub fn show(store: &Store, id: ShopId, out: &mut impl Write) -> Result<(), CommandError> {
    let shop = store.shop(id).ok_or(CommandError::ShopNotFound(id))?;
    render::shop_detail(out, shop)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use shop_inventory_core::{Product, ProductId, Shop};

    use super::*;

    fn form(name: &str) -> ShopForm {
        ShopForm {
            name: name.to_string(),
            description: "A test shop".to_string(),
            image: "https://example.com/shop.png".to_string(),
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut store = Store::new();
        let mut out = Vec::new();

        let first = create(&mut store, &form("A"), &mut out).unwrap();
        let second = create(&mut store, &form("B"), &mut out).unwrap();

        assert_eq!(first, ShopId::new(1));
        assert_eq!(second, ShopId::new(2));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Created shop #1\nCreated shop #2\n"
        );
    }

    #[test]
    fn test_create_rejects_blank_fields() {
        let mut store = Store::new();
        let mut out = Vec::new();
        let result = create(&mut store, &form(" "), &mut out);
        assert!(matches!(result, Err(CommandError::Validation(_))));
        assert!(store.shops().is_empty());
    }

    #[test]
    fn test_create_fails_when_ids_run_out() {
        let mut store = Store::new();
        store.create_shop(Shop::new(
            ShopId::new(i32::MAX),
            "Last",
            "The last shop",
            "https://example.com/last.png",
            Utc::now(),
        ));
        let mut out = Vec::new();

        let result = create(&mut store, &form("A"), &mut out);

        assert!(matches!(result, Err(CommandError::IdsExhausted(_))));
        assert_eq!(store.shops().len(), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn test_list_and_show_huge_stock() {
        let mut store = Store::new();
        let id = create(&mut store, &form("A"), &mut Vec::new()).unwrap();
        store.create_product(
            id,
            Product {
                id: ProductId::new(1),
                name: "Bullion".to_string(),
                description: "Very valuable".to_string(),
                image: "https://example.com/gold.png".to_string(),
                price: Decimal::new(10_000_000_000, 0),
                quantity: 0,
                created_at: Utc::now(),
            },
        );
        store.set_product_quantity(id, ProductId::new(1), i64::MAX);

        let mut listed = Vec::new();
        list(&store, &mut listed).unwrap();
        let mut shown = Vec::new();
        show(&store, id, &mut shown).unwrap();

        assert!(String::from_utf8(listed).unwrap().contains("9223372036854775807 units"));
        assert!(!shown.is_empty());
    }

    #[test]
    fn test_show_unknown_shop() {
        let store = Store::new();
        let mut out = Vec::new();
        let result = show(&store, ShopId::new(3), &mut out);
        assert!(matches!(result, Err(CommandError::ShopNotFound(id)) if id == ShopId::new(3)));
    }

    #[test]
    fn test_list_and_show() {
        let mut store = Store::new();
        let mut out = Vec::new();
        let id = create(&mut store, &form("A"), &mut out).unwrap();

        let mut listed = Vec::new();
        list(&store, &mut listed).unwrap();
        assert_eq!(
            String::from_utf8(listed).unwrap(),
            "#1 A  (0 products, 0 units, $0)\n"
        );

        let mut shown = Vec::new();
        show(&store, id, &mut shown).unwrap();
        assert!(String::from_utf8(shown).unwrap().starts_with("#1 A\n"));
    }
}
