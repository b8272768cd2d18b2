//! Discount Ledger
//!
//! One record per applied discount component. The ledger is append-only
//! within a calculation run so every peso of discount stays auditable.

use serde::{Deserialize, Serialize};

/// Discount component kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    Volume,
    Seasonal,
    FirstTime,
    Coupon,
}

/// One applied discount component
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountRecord {
    pub kind: DiscountKind,
    /// Discount amount in CLP; never negative
    pub amount: i64,
    /// Display description for receipts and the quote breakdown
    pub description: String,
    /// Coupon code, for coupon records only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
