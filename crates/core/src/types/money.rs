//! Money helpers using exact decimal arithmetic.
//!
//! Prices arrive from the catalog API as JSON numbers and are held as
//! [`Decimal`] so that subtotals and order totals compare exactly.

use rust_decimal::{Decimal, RoundingStrategy};

/// Flat shipping charge applied to any non-empty cart.
pub const SHIPPING_SURCHARGE: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// Format an amount for display (e.g., `$19.99`).
///
/// Amounts are rounded half away from zero to two decimal places.
///
/// ```
/// use rust_decimal::Decimal;
/// use technova_core::format_money;
///
/// assert_eq!(format_money(Decimal::new(1995, 2)), "$19.95");
/// assert_eq!(format_money(Decimal::from(5)), "$5.00");
/// ```
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}
