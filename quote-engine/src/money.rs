//! Money helpers for CLP amounts
//!
//! Amounts are stored as i64 Chilean pesos; CLP has no minor subdivision.
//! Multiplier and rate arithmetic goes through `Decimal` and is rounded
//! back to whole pesos at every stage boundary, so downstream stages only
//! ever see integer amounts.

use rust_decimal::prelude::*;

/// Rounding target for monetary values (whole pesos, half away from zero)
const DECIMAL_PLACES: u32 = 0;

/// Convert an integer amount to Decimal for calculation
#[inline]
pub fn to_decimal(value: i64) -> Decimal {
    Decimal::from(value)
}

/// Round a decimal amount back to whole pesos
#[inline]
pub fn round_amount(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}
