//! Plain-text rendering of shops, products and their totals.

use std::io::{self, Write};

use shop_inventory_core::{Product, Shop, format_currency};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One line per shop with its derived totals.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn shop_list(out: &mut impl Write, shops: &[Shop]) -> io::Result<()> {
    if shops.is_empty() {
        return writeln!(out, "No shops yet. Create one with `inv-cli shop create`.");
    }

    for shop in shops {
        let totals = shop.totals();
        writeln!(
            out,
            "#{} {}  ({} products, {} units, {})",
            shop.id,
            shop.name,
            totals.product_count,
            totals.total_quantity,
            format_currency(totals.total_value),
        )?;
    }
    Ok(())
}

/// Shop header, product list and totals.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn shop_detail(out: &mut impl Write, shop: &Shop) -> io::Result<()> {
    writeln!(out, "#{} {}", shop.id, shop.name)?;
    writeln!(out, "{}", shop.description)?;
    writeln!(out, "Image: {}", shop.image)?;
    writeln!(out, "Created: {}", shop.created_at.format(DATE_FORMAT))?;
    writeln!(out)?;

    if shop.products.is_empty() {
        writeln!(out, "No products yet.")?;
        return Ok(());
    }

    for product in &shop.products {
        product_line(out, product)?;
    }

    let totals = shop.totals();
    writeln!(out)?;
    writeln!(
        out,
        "Total: {} units, {}",
        totals.total_quantity,
        format_currency(totals.total_value)
    )
}

/// A single product row.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn product_line(out: &mut impl Write, product: &Product) -> io::Result<()> {
    write!(
        out,
        "  #{} {}  {} x {} = {}",
        product.id,
        product.name,
        product.quantity,
        format_currency(product.price),
        format_currency(product.stock_value()),
    )?;
    if product.is_out_of_stock() {
        write!(out, "  [out of stock]")?;
    }
    writeln!(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use shop_inventory_core::{ProductId, ShopId};

    use super::*;

    fn shop() -> Shop {
        let created_at = Utc.with_ymd_and_hms(2024, 2, 29, 10, 0, 0).unwrap();
        let mut shop = Shop::new(
            ShopId::new(1),
            "A",
            "First shop",
            "https://example.com/a.png",
            created_at,
        );
        shop.products.push(Product {
            id: ProductId::new(1),
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            image: "https://example.com/w.png".to_string(),
            price: Decimal::new(1000, 0),
            quantity: 3,
            created_at,
        });
        shop.products.push(Product {
            id: ProductId::new(2),
            name: "Bolt".to_string(),
            description: "A bolt".to_string(),
            image: "https://example.com/b.png".to_string(),
            price: Decimal::new(25, 1),
            quantity: 0,
            created_at,
        });
        shop
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_shop_list() {
        let text = render(|out| shop_list(out, &[]));
        assert!(text.starts_with("No shops yet."));
    }

    #[test]
    fn test_shop_list_totals() {
        let text = render(|out| shop_list(out, &[shop()]));
        assert_eq!(text, "#1 A  (2 products, 3 units, $3.000)\n");
    }

    #[test]
    fn test_shop_detail() {
        let text = render(|out| shop_detail(out, &shop()));
        assert!(text.contains("Created: 2024-02-29"));
        assert!(text.contains("  #1 Widget  3 x $1.000 = $3.000\n"));
        assert!(text.contains("  #2 Bolt  0 x $2,5 = $0  [out of stock]\n"));
        assert!(text.ends_with("Total: 3 units, $3.000\n"));
    }

    #[test]
    fn test_shop_detail_without_products() {
        let mut shop = shop();
        shop.products.clear();
        let text = render(|out| shop_detail(out, &shop));
        assert!(text.ends_with("No products yet.\n"));
    }
}
