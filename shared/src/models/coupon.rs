//! Coupon Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What a coupon does when applied
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponKind {
    /// Discount as a fraction of the subtotal
    Percentage { rate: Decimal },
    /// Fixed CLP discount
    Fixed { amount: i64 },
    /// Waives the shipping charge; never enters the discount ledger
    Shipping,
}

/// A recognized coupon code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    /// Canonical upper-case code
    pub code: String,
    #[serde(flatten)]
    pub kind: CouponKind,
    /// Display description for the discount ledger
    pub description: String,
}
