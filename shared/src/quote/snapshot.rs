//! Quote state - working totals for one calculation run
//!
//! A `QuoteState` is created fresh by every calculation and never shared
//! across runs. Coupon application mutates the current state in place and
//! forces the taxes/total tail to be recomputed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{CustomizationValue, ShippingTier};

use super::discount::DiscountRecord;

/// A line item with its effective price resolved for this run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedItem {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Catalog unit price before adjustment
    pub original_price: i64,
    /// Unit price after customization upcharges and market fluctuation
    pub current_price: i64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub customizations: BTreeMap<String, CustomizationValue>,
    /// current_price × quantity
    pub item_total: i64,
    /// Advisory flag; outlet and clearance items are excluded
    pub discount_eligible: bool,
    /// Whether this category is charged for installation service
    pub installation_required: bool,
}

/// Working totals for one calculation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QuoteState {
    pub items: Vec<ResolvedItem>,
    pub subtotal: i64,
    pub shipping: i64,
    pub installation: i64,
    pub discounts: i64,
    pub taxes: i64,
    pub total: i64,
    /// Append-only discount ledger; `discounts` is always its sum
    pub applied_discounts: Vec<DiscountRecord>,

    // Options resolved for this run
    pub shipping_type: ShippingTier,
    pub region: String,
    pub include_installation: bool,
    pub include_taxes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::discount::DiscountKind;

    #[test]
    fn test_ledger_sum_matches_discounts() {
        let state = QuoteState {
            discounts: 80_000,
            applied_discounts: vec![
                DiscountRecord {
                    kind: DiscountKind::Volume,
                    amount: 50_000,
                    description: "Descuento por volumen de compra".to_string(),
                    code: None,
                },
                DiscountRecord {
                    kind: DiscountKind::Coupon,
                    amount: 30_000,
                    description: "Descuento $30.000".to_string(),
                    code: Some("SAVE30K".to_string()),
                },
            ],
            ..QuoteState::default()
        };

        let ledger_sum: i64 = state.applied_discounts.iter().map(|d| d.amount).sum();
        assert_eq!(state.discounts, ledger_sum);
    }
}
