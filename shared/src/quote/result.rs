//! Calculation Result
//!
//! The immutable result object handed to callers: itemized totals, the
//! locale-formatted display strings, the discount ledger, financing
//! quotes, and the order summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::discount::DiscountRecord;
use super::financing::FinancingOption;
use super::recommendation::Recommendation;
use super::snapshot::ResolvedItem;

/// Locale-formatted display strings for the six totals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FormattedTotals {
    pub subtotal: String,
    pub shipping: String,
    pub installation: String,
    pub discounts: String,
    pub taxes: String,
    pub total: String,
}

/// Per-category aggregation for the quote summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CategorySummary {
    /// Total units across the category's line items
    pub count: i64,
    /// Sum of the category's item totals in CLP
    pub total: i64,
    /// Item display names
    pub items: Vec<String>,
}

/// Order-level summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QuoteSummary {
    /// Number of line items (not units)
    pub item_count: usize,
    pub categories: BTreeMap<String, CategorySummary>,
    /// Discounts plus the shipping charge waived by free shipping
    pub savings: i64,
    /// subtotal / line-item count, rounded to whole CLP
    pub average_item_price: i64,
    pub recommendations: Vec<Recommendation>,
}

/// Full calculation result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    pub items: Vec<ResolvedItem>,
    pub subtotal: i64,
    pub shipping: i64,
    pub installation: i64,
    pub discounts: i64,
    pub taxes: i64,
    pub total: i64,
    pub formatted: FormattedTotals,
    pub discount_details: Vec<DiscountRecord>,
    pub financing_options: Vec<FinancingOption>,
    pub summary: QuoteSummary,
    pub calculated_at: DateTime<Utc>,
}

/// Outcome of a coupon application attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CouponOutcome {
    pub success: bool,
    /// Localized display message
    pub message: String,
    /// Ledger amount, for percentage and fixed coupons only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,
}

impl CouponOutcome {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), discount: None }
    }

    pub fn applied(message: impl Into<String>, discount: Option<i64>) -> Self {
        Self { success: true, message: message.into(), discount }
    }
}

/// Engine bookkeeping exposed for monitoring
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PerformanceStats {
    /// Entries in the price memoization cache
    pub cache_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_calculation: Option<DateTime<Utc>>,
    /// Line items in the most recent calculation
    pub items_processed: usize,
}
