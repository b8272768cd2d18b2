//! Recommendation Engine
//!
//! Derives advisory nudges from a finalized quote: how close the order is
//! to free shipping, to the next volume discount tier, and whether an
//! interest-free installment plan is available. Pure function of the
//! computed state; each rule triggers independently.

use shared::models::PricingConfig;
use shared::quote::{FinancingOption, QuoteState, Recommendation, RecommendationKind};

use crate::format::PriceFormatter;
use crate::money::{round_amount, to_decimal};

/// Nudge when the subtotal is within this range of free shipping
const FREE_SHIPPING_PROXIMITY: i64 = 200_000;

/// Nudge when the subtotal is within this range of the next volume tier
const VOLUME_TIER_PROXIMITY: i64 = 500_000;

/// Generate the recommendations for a finalized quote
pub fn recommend(
    state: &QuoteState,
    config: &PricingConfig,
    financing: &[FinancingOption],
    formatter: &dyn PriceFormatter,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if state.shipping > 0 {
        let remaining = config.shipping.free_threshold - state.subtotal;
        if remaining > 0 && remaining <= FREE_SHIPPING_PROXIMITY {
            recommendations.push(Recommendation {
                kind: RecommendationKind::FreeShipping,
                message: format!(
                    "Agrega {} más para envío gratis",
                    formatter.format(remaining)
                ),
                potential_savings: state.shipping,
            });
        }
    }

    // Smallest tier the subtotal has not yet reached; tiers are declared
    // in ascending threshold order
    if let Some(tier) = config
        .discounts
        .volume
        .iter()
        .find(|tier| tier.threshold > state.subtotal)
    {
        let remaining = tier.threshold - state.subtotal;
        if remaining <= VOLUME_TIER_PROXIMITY {
            let potential = round_amount(to_decimal(state.subtotal) * tier.rate);
            recommendations.push(Recommendation {
                kind: RecommendationKind::VolumeDiscount,
                message: format!(
                    "Agrega {} más y ahorra {}",
                    formatter.format(remaining),
                    formatter.format(potential)
                ),
                potential_savings: potential,
            });
        }
    }

    if state.total >= config.financing.min_amount {
        if let Some(first) = financing.first() {
            if first.interest_rate.is_zero() {
                recommendations.push(Recommendation {
                    kind: RecommendationKind::Financing,
                    message: format!(
                        "Financia en {} cuotas sin interés de {}",
                        first.months,
                        formatter.format(first.monthly_payment)
                    ),
                    potential_savings: 0,
                });
            }
        }
    }

    recommendations
}
