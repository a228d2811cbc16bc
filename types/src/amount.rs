//! Token amounts, basis points and normalized voting points.
//!
//! Amounts are raw token units held as `u128`. Every operation here is
//! checked: a result that does not fit returns `None` instead of wrapping.

use primitive_types::U256;

/// Raw token units, as locked and refunded.
pub type Amount = u128;

/// Supply-relative voting weight, scaled by [`POINTS_SCALE`].
pub type Points = u128;

/// One whole in basis points.
pub const BIPS_DENOMINATOR: u128 = 10_000;

/// Fixed-point scale for normalized points. An asset's entire supply is
/// worth exactly `POINTS_SCALE` points.
pub const POINTS_SCALE: u128 = 1_000_000_000_000_000_000;

/// `amount * bips / 10_000`, rounded down.
pub fn bips_of(amount: Amount, bips: u32) -> Option<Amount> {
    mul_div(amount, u128::from(bips), BIPS_DENOMINATOR)
}

/// Convert a raw amount of an asset into points relative to its supply.
///
/// Returns `None` when the supply is zero or the result overflows.
pub fn to_points(amount: Amount, total_supply: Amount) -> Option<Points> {
    mul_div(amount, POINTS_SCALE, total_supply)
}

/// `floor(a * b / c)` with a 256-bit intermediate product.
///
/// Returns `None` if `c` is zero or the quotient does not fit in `u128`.
pub fn mul_div(a: u128, b: u128, c: u128) -> Option<u128> {
    if c == 0 {
        return None;
    }
    let quotient = U256::from(a) * U256::from(b) / U256::from(c);
    u128::try_from(quotient).ok()
}
