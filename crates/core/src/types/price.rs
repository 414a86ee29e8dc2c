//! Price amounts and their display formatting.
//!
//! Prices are stored as [`Decimal`] so that totals like `price × quantity`
//! are exact. Display follows the `es-AR` convention the inventory UI has
//! always used: `.` groups thousands, `,` separates decimals, and at most two
//! fraction digits are shown.

use rust_decimal::{Decimal, RoundingStrategy};

/// Maximum number of fraction digits shown by [`format_amount`].
pub const MAX_FRACTION_DIGITS: u32 = 2;

/// Currency symbol prefixed by [`format_currency`].
pub const CURRENCY_SYMBOL: &str = "$";

/// Format an amount for display (e.g., `1234.5` → `"1.234,5"`).
///
/// Rounds half away from zero to two fraction digits and drops trailing
/// zeros, so whole amounts render without a decimal part.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac_part) = frac_part {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

/// Format an amount with the currency symbol (e.g., `"$1.234,5"`).
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    format!("{CURRENCY_SYMBOL}{}", format_amount(amount))
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
