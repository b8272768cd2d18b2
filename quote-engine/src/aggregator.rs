//! Quote Aggregator
//!
//! Runs the ordered totals pipeline: subtotal → shipping → installation,
//! then taxes → total once discounts are known. The order is load-bearing:
//! shipping compares the subtotal against the free threshold, taxes apply
//! after discounts, and the tail (`finalize`) is re-run whenever the
//! discount total changes.

use rust_decimal::Decimal;
use shared::models::{PricingConfig, ShippingTier};
use shared::quote::{QuoteState, ResolvedItem};

use crate::money::{round_amount, to_decimal};

/// Sum of all item totals
pub fn subtotal(items: &[ResolvedItem]) -> i64 {
    items.iter().map(|item| item.item_total).sum()
}

/// Shipping charge for the run.
///
/// Zero when shipping is disabled or the subtotal reaches the free
/// threshold; otherwise the tier base rate times the regional multiplier.
pub fn shipping(
    subtotal: i64,
    tier: ShippingTier,
    region: &str,
    config: &PricingConfig,
) -> i64 {
    if !config.include_shipping {
        return 0;
    }
    if subtotal >= config.shipping.free_threshold {
        return 0;
    }

    let base = config.shipping.base_rate(tier);
    let multiplier = config.shipping.region_multiplier(region);
    round_amount(to_decimal(base) * multiplier)
}

/// Installation charge for the run.
///
/// Sums per-item cost over the installation-required items, then clamps
/// the SUM (not each item) into [minimum, maximum]. The minimum applies
/// even when no item requires installation: enabling the service charges
/// at least the minimum visit fee.
pub fn installation(items: &[ResolvedItem], include: bool, config: &PricingConfig) -> i64 {
    if !include {
        return 0;
    }

    let mut cost = Decimal::ZERO;
    for item in items.iter().filter(|item| item.installation_required) {
        let multiplier = config.installation.category_multiplier(&item.category);
        cost += to_decimal(config.installation.per_item) * multiplier * Decimal::from(item.quantity);
    }

    let clamped = cost
        .max(to_decimal(config.installation.minimum))
        .min(to_decimal(config.installation.maximum));
    round_amount(clamped)
}

/// Tax charge for the run, computed after discounts are known
pub fn taxes(state: &QuoteState, config: &PricingConfig) -> i64 {
    if !state.include_taxes {
        return 0;
    }

    let taxable = state.subtotal + state.shipping + state.installation - state.discounts;
    round_amount(to_decimal(taxable) * config.tax_rate)
}

/// Recompute the taxes/total tail. Must be re-run whenever `discounts`
/// or `shipping` changes (initial run and again after coupon application).
pub fn finalize(state: &mut QuoteState, config: &PricingConfig) {
    state.taxes = taxes(state, config);
    let total = state.subtotal + state.shipping + state.installation + state.taxes
        - state.discounts;
    state.total = total.max(0);
}
