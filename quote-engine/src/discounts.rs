//! Discount Engine
//!
//! Computes the additive standard discount components (volume, seasonal,
//! first purchase) and applies ad-hoc coupon codes. Components stack: each
//! is computed independently against the subtotal and summed. Every
//! applied component is appended to the quote's discount ledger, and the
//! `discounts` total is always the ledger sum.

use rust_decimal::Decimal;
use shared::models::{CouponKind, DiscountConfig, PricingConfig};
use shared::quote::{CouponOutcome, DiscountKind, DiscountRecord, QuoteState};

use crate::format::PriceFormatter;
use crate::money::{round_amount, to_decimal};

/// Apply the standard discount components to a freshly aggregated state.
///
/// First-purchase status is an external fact attested by the caller, not
/// derived here.
pub fn apply_standard_discounts(
    state: &mut QuoteState,
    config: &PricingConfig,
    first_time_customer: bool,
) {
    let subtotal = to_decimal(state.subtotal);

    let volume = volume_discount(state.subtotal, &config.discounts);
    if volume > 0 {
        state.applied_discounts.push(DiscountRecord {
            kind: DiscountKind::Volume,
            amount: volume,
            description: "Descuento por volumen de compra".to_string(),
            code: None,
        });
    }

    let seasonal = round_amount(subtotal * config.discounts.seasonal);
    if seasonal > 0 {
        state.applied_discounts.push(DiscountRecord {
            kind: DiscountKind::Seasonal,
            amount: seasonal,
            description: "Descuento estacional".to_string(),
            code: None,
        });
    }

    if first_time_customer {
        let first_time = round_amount(subtotal * config.discounts.first_time);
        if first_time > 0 {
            state.applied_discounts.push(DiscountRecord {
                kind: DiscountKind::FirstTime,
                amount: first_time,
                description: "Descuento primera compra".to_string(),
                code: None,
            });
        }
    }

    state.discounts = ledger_sum(state);
}

/// Volume discount: the single highest tier whose threshold the subtotal
/// reaches (tiers do not accumulate)
fn volume_discount(subtotal: i64, config: &DiscountConfig) -> i64 {
    let mut rate = Decimal::ZERO;
    for tier in &config.volume {
        if subtotal >= tier.threshold {
            rate = rate.max(tier.rate);
        }
    }
    round_amount(to_decimal(subtotal) * rate)
}

/// Apply a coupon code to the current state.
///
/// Unknown codes are rejected without mutating anything. Shipping coupons
/// zero the shipping charge directly and never enter the ledger; the
/// other kinds append a ledger entry. Either way the caller must re-run
/// the aggregation tail afterwards.
pub fn apply_coupon(
    code: &str,
    state: &mut QuoteState,
    config: &PricingConfig,
    formatter: &dyn PriceFormatter,
) -> CouponOutcome {
    let Some(coupon) = config.find_coupon(code) else {
        tracing::warn!(code = %code, "Rejected unknown coupon code");
        return CouponOutcome::rejected("Cupón no válido");
    };

    let discount = match &coupon.kind {
        CouponKind::Percentage { rate } => round_amount(to_decimal(state.subtotal) * *rate),
        CouponKind::Fixed { amount } => *amount,
        CouponKind::Shipping => {
            state.shipping = 0;
            return CouponOutcome::applied("Envío gratis aplicado", None);
        }
    };

    state.applied_discounts.push(DiscountRecord {
        kind: DiscountKind::Coupon,
        amount: discount,
        description: coupon.description.clone(),
        code: Some(coupon.code.clone()),
    });
    state.discounts = ledger_sum(state);

    CouponOutcome::applied(
        format!("Cupón aplicado: {} de descuento", formatter.format(discount)),
        Some(discount),
    )
}

fn ledger_sum(state: &QuoteState) -> i64 {
    state.applied_discounts.iter().map(|record| record.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ChileanPesoFormatter;

    fn config() -> PricingConfig {
        PricingConfig::default()
    }

    fn state_with_subtotal(subtotal: i64) -> QuoteState {
        QuoteState { subtotal, ..QuoteState::default() }
    }

    // ==================== Volume Tier Tests ====================

    #[test]
    fn test_no_tier_below_first_threshold() {
        let mut state = state_with_subtotal(999_999);
        apply_standard_discounts(&mut state, &config(), false);

        assert_eq!(state.discounts, 0);
        assert!(state.applied_discounts.is_empty());
    }

    #[test]
    fn test_highest_qualifying_tier_wins() {
        // 2.5M qualifies for the 5% and 10% tiers; only 10% applies
        let mut state = state_with_subtotal(2_500_000);
        apply_standard_discounts(&mut state, &config(), false);

        assert_eq!(state.discounts, 250_000);
        assert_eq!(state.applied_discounts.len(), 1);
        assert_eq!(state.applied_discounts[0].kind, DiscountKind::Volume);
    }

    #[test]
    fn test_tier_boundary_is_inclusive() {
        let mut state = state_with_subtotal(1_000_000);
        apply_standard_discounts(&mut state, &config(), false);

        // Exactly at the threshold: 5% of 1M
        assert_eq!(state.discounts, 50_000);
    }

    // ==================== Stacking Tests ====================

    #[test]
    fn test_components_stack_additively() {
        let mut config = config();
        config.discounts.seasonal = Decimal::new(2, 2); // 2%

        let mut state = state_with_subtotal(1_000_000);
        apply_standard_discounts(&mut state, &config, true);

        // volume 5% + seasonal 2% + first purchase 3% = 100000
        assert_eq!(state.discounts, 100_000);
        assert_eq!(state.applied_discounts.len(), 3);

        let ledger_total: i64 = state.applied_discounts.iter().map(|d| d.amount).sum();
        assert_eq!(state.discounts, ledger_total);
    }

    #[test]
    fn test_seasonal_rate_zero_disables_component() {
        let mut state = state_with_subtotal(1_000_000);
        apply_standard_discounts(&mut state, &config(), false);

        assert!(state
            .applied_discounts
            .iter()
            .all(|d| d.kind != DiscountKind::Seasonal));
    }

    #[test]
    fn test_first_purchase_requires_caller_attestation() {
        let mut state = state_with_subtotal(200_000);
        apply_standard_discounts(&mut state, &config(), false);
        assert_eq!(state.discounts, 0);

        let mut state = state_with_subtotal(200_000);
        apply_standard_discounts(&mut state, &config(), true);
        // 3% of 200000
        assert_eq!(state.discounts, 6_000);
        assert_eq!(state.applied_discounts[0].kind, DiscountKind::FirstTime);
    }

    // ==================== Coupon Tests ====================

    #[test]
    fn test_unknown_coupon_rejected_without_mutation() {
        let mut state = state_with_subtotal(100_000);
        state.shipping = 29_990;

        let before = state.clone();
        let outcome = apply_coupon("EXPIRED99", &mut state, &config(), &ChileanPesoFormatter);

        assert!(!outcome.success);
        assert_eq!(state, before);
    }

    #[test]
    fn test_fixed_coupon_appends_ledger_entry() {
        let mut state = state_with_subtotal(129_990);

        let outcome = apply_coupon("SAVE50K", &mut state, &config(), &ChileanPesoFormatter);

        assert!(outcome.success);
        assert_eq!(outcome.discount, Some(50_000));
        assert_eq!(state.discounts, 50_000);
        assert_eq!(state.applied_discounts.len(), 1);
        assert_eq!(state.applied_discounts[0].code.as_deref(), Some("SAVE50K"));
    }

    #[test]
    fn test_percentage_coupon_uses_subtotal() {
        let mut state = state_with_subtotal(250_000);
        state.shipping = 29_990;

        let outcome = apply_coupon("welcome10", &mut state, &config(), &ChileanPesoFormatter);

        // 10% of the subtotal, not of subtotal + shipping
        assert!(outcome.success);
        assert_eq!(outcome.discount, Some(25_000));
    }

    #[test]
    fn test_shipping_coupon_zeroes_shipping_without_ledger_entry() {
        let mut state = state_with_subtotal(100_000);
        state.shipping = 29_990;

        let outcome = apply_coupon("FREESHIP", &mut state, &config(), &ChileanPesoFormatter);

        assert!(outcome.success);
        assert_eq!(outcome.discount, None);
        assert_eq!(state.shipping, 0);
        assert_eq!(state.discounts, 0);
        assert!(state.applied_discounts.is_empty());
    }

    #[test]
    fn test_coupons_accumulate_on_repeat_application() {
        let mut state = state_with_subtotal(500_000);

        apply_coupon("SAVE50K", &mut state, &config(), &ChileanPesoFormatter);
        apply_coupon("SAVE50K", &mut state, &config(), &ChileanPesoFormatter);

        assert_eq!(state.discounts, 100_000);
        assert_eq!(state.applied_discounts.len(), 2);
    }
}
