//! Product commands.
//!
//! # Usage
//!
//! ```bash
//! # Add a product to shop 1
//! inv-cli product add -s 1 -n Widget -d "A sturdy widget" -i https://example.com/w.png -p 10.5 -q 3
//!
//! # Adjust stock
//! inv-cli product set-quantity -s 1 -p 1 12
//! inv-cli product increment -s 1 -p 1
//! inv-cli product decrement -s 1 -p 1
//!
//! # Edit fields
//! inv-cli product update -s 1 -p 1 --price 12.25
//!
//! # Delete (asks for confirmation unless --yes)
//! inv-cli product remove -s 1 -p 1
//! ```

use std::io::{self, BufRead, Write};

use chrono::Utc;
use shop_inventory_core::validation::{ProductForm, ProductUpdateForm};
use shop_inventory_core::{Outcome, ProductId, ProductPatch, ShopId, Store};

use super::{CommandError, confirm, report};

/// Validate and add a product with the shop's next free product ID.
///
/// Price and quantity are sanitized first, so `$1,234.50` reads as
/// `1234.50`. An unknown shop is reported as a no-op, not an error.
///
/// # Errors
///
/// Returns `CommandError::Validation` if any field is rejected and
/// `CommandError::IdsExhausted` if the shop has no product ID left.
pub fn add(
    store: &mut Store,
    shop_id: ShopId,
    form: &ProductForm,
    out: &mut impl Write,
) -> Result<Outcome, CommandError> {
    let draft = form.sanitized().validate()?;
    let id = store
        .next_product_id(shop_id)
        .transpose()?
        .unwrap_or(ProductId::FIRST);
    let product = draft.into_product(id, Utc::now());

    tracing::info!(shop_id = %shop_id, product_id = %id, name = %product.name, "Adding product");
    let outcome = store.create_product(shop_id, product);
    report(out, outcome, &format!("Added product #{id} to shop #{shop_id}"))?;
    Ok(outcome)
}

/// Set a product's quantity. Negative values end up as 0.
///
/// # Errors
///
/// Returns `CommandError::Io` if writing fails.
pub fn set_quantity(
    store: &mut Store,
    shop_id: ShopId,
    product_id: ProductId,
    quantity: i64,
    out: &mut impl Write,
) -> Result<Outcome, CommandError> {
    let outcome = store.set_product_quantity(shop_id, product_id, quantity);
    report_quantity(store, shop_id, product_id, outcome, out)?;
    Ok(outcome)
}

/// Add one unit. Stays put at `u64::MAX`.
///
/// # Errors
///
/// Returns `CommandError::Io` if writing fails.
pub fn increment(
    store: &mut Store,
    shop_id: ShopId,
    product_id: ProductId,
    out: &mut impl Write,
) -> Result<Outcome, CommandError> {
    let current = match store.state().find_product(shop_id, product_id) {
        Ok(product) => product.quantity,
        Err(missing) => {
            report(out, Outcome::NotFound(missing), "")?;
            return Ok(Outcome::NotFound(missing));
        }
    };
    replace_quantity(store, shop_id, product_id, current.saturating_add(1), out)
}

/// Remove one unit.
///
/// Returns `None` without dispatching when the product is already out of
/// stock.
///
/// # Errors
///
/// Returns `CommandError::Io` if writing fails.
pub fn decrement(
    store: &mut Store,
    shop_id: ShopId,
    product_id: ProductId,
    out: &mut impl Write,
) -> Result<Option<Outcome>, CommandError> {
    let current = match store.state().find_product(shop_id, product_id) {
        Ok(product) => product.quantity,
        Err(missing) => {
            report(out, Outcome::NotFound(missing), "")?;
            return Ok(Some(Outcome::NotFound(missing)));
        }
    };
    let Some(next) = current.checked_sub(1) else {
        writeln!(out, "Product #{product_id} is already out of stock")?;
        return Ok(None);
    };
    replace_quantity(store, shop_id, product_id, next, out).map(Some)
}

// `Mutation::SetProductQuantity` carries an `i64`; a patch keeps the whole `u64` range.
fn replace_quantity(
    store: &mut Store,
    shop_id: ShopId,
    product_id: ProductId,
    quantity: u64,
    out: &mut impl Write,
) -> Result<Outcome, CommandError> {
    let patch = ProductPatch {
        quantity: Some(quantity),
        ..ProductPatch::default()
    };
    let outcome = store.replace_product_fields(shop_id, product_id, patch);
    report_quantity(store, shop_id, product_id, outcome, out)?;
    Ok(outcome)
}

fn report_quantity(
    store: &Store,
    shop_id: ShopId,
    product_id: ProductId,
    outcome: Outcome,
    out: &mut impl Write,
) -> io::Result<()> {
    let done = store
        .state()
        .find_product(shop_id, product_id)
        .map(|p| format!("Quantity of #{product_id} is now {}", p.quantity))
        .unwrap_or_default();
    report(out, outcome, &done)
}

/// Validate and apply edits to a product. Price and quantity are
/// sanitized as in [`add`].
///
/// # Errors
///
/// Returns `CommandError::Validation` if a supplied field is rejected and
/// `CommandError::NothingToUpdate` if no field was supplied.
pub fn update(
    store: &mut Store,
    shop_id: ShopId,
    product_id: ProductId,
    form: &ProductUpdateForm,
    out: &mut impl Write,
) -> Result<Outcome, CommandError> {
    let patch = form.sanitized().validate()?;
    if patch.is_empty() {
        return Err(CommandError::NothingToUpdate);
    }

    tracing::info!(shop_id = %shop_id, product_id = %product_id, "Updating product");
    let outcome = store.replace_product_fields(shop_id, product_id, patch);
    report(out, outcome, &format!("Updated product #{product_id}"))?;
    Ok(outcome)
}

/// Delete a product, asking first unless `assume_yes`.
///
/// Returns `None` when the user declined.
///
/// # Errors
///
/// Returns `CommandError::Io` if reading the answer or writing fails.
pub fn remove(
    store: &mut Store,
    shop_id: ShopId,
    product_id: ProductId,
    assume_yes: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<Outcome>, CommandError> {
    if !assume_yes
        && let Ok(product) = store.state().find_product(shop_id, product_id)
    {
        let prompt = format!("Delete \"{}\"?", product.name);
        if !confirm(input, out, &prompt)? {
            writeln!(out, "Cancelled")?;
            return Ok(None);
        }
    }

    tracing::info!(shop_id = %shop_id, product_id = %product_id, "Removing product");
    let outcome = store.delete_product(shop_id, product_id);
    report(out, outcome, &format!("Removed product #{product_id}"))?;
    Ok(Some(outcome))
}
