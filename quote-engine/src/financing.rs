//! Financing Calculator
//!
//! Produces amortized installment quotes for a final total, one per entry
//! in the configured rate table, in declared order.

use rust_decimal::Decimal;
use shared::models::FinancingConfig;
use shared::quote::FinancingOption;

use crate::money::{round_amount, to_decimal};

/// Quote every configured installment plan for a total.
///
/// Empty when the total does not reach the financing minimum. Zero-rate
/// plans divide the total evenly; the rest use standard amortization:
/// `total × r × (1+r)^n / ((1+r)^n − 1)` with `r` the monthly rate.
/// `savings` is negative for interest-bearing plans and is not clamped.
pub fn quote_installments(total: i64, config: &FinancingConfig) -> Vec<FinancingOption> {
    if total < config.min_amount {
        return vec![];
    }

    let amount = to_decimal(total);
    config
        .rates
        .iter()
        .map(|plan| {
            let months = Decimal::from(plan.months);
            let monthly = if plan.annual_rate.is_zero() {
                amount / months
            } else {
                let rate = plan.annual_rate / Decimal::from(12);
                let factor = compound(Decimal::ONE + rate, plan.months);
                amount * rate * factor / (factor - Decimal::ONE)
            };

            // total_amount is derived from the unrounded installment so the
            // rounding error does not multiply by the month count
            let total_amount = round_amount(monthly * months);
            FinancingOption {
                months: plan.months,
                monthly_payment: round_amount(monthly),
                total_amount,
                interest_rate: plan.annual_rate,
                savings: total - total_amount,
            }
        })
        .collect()
}

/// `base` raised to `periods` by repeated multiplication; installment
/// counts are small
fn compound(base: Decimal, periods: u32) -> Decimal {
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor *= base;
    }
    factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::FinancingRate;

    fn config() -> FinancingConfig {
        FinancingConfig::default()
    }

    #[test]
    fn test_below_minimum_yields_no_options() {
        assert!(quote_installments(99_999, &config()).is_empty());
        assert!(!quote_installments(100_000, &config()).is_empty());
    }

    #[test]
    fn test_declared_order_is_preserved() {
        let options = quote_installments(600_000, &config());

        let months: Vec<u32> = options.iter().map(|o| o.months).collect();
        assert_eq!(months, vec![6, 12, 18, 24]);
    }

    #[test]
    fn test_zero_interest_divides_evenly() {
        let options = quote_installments(600_000, &config());
        let interest_free = &options[0];

        assert_eq!(interest_free.monthly_payment, 100_000);
        assert_eq!(interest_free.total_amount, 600_000);
        assert_eq!(interest_free.savings, 0);
    }

    #[test]
    fn test_zero_interest_with_remainder_rounds_installment() {
        let options = quote_installments(550_000, &config());
        let interest_free = &options[0];

        // 550000 / 6 = 91666.67 → rounds to 91667, but the plan total is
        // derived from the unrounded installment
        assert_eq!(interest_free.monthly_payment, 91_667);
        assert_eq!(interest_free.total_amount, 550_000);
        assert_eq!(interest_free.savings, 0);
    }

    #[test]
    fn test_interest_bearing_plans_cost_more() {
        let options = quote_installments(1_000_000, &config());

        for option in options.iter().filter(|o| !o.interest_rate.is_zero()) {
            assert!(option.total_amount > 1_000_000, "plan {} months", option.months);
            assert!(option.savings < 0);
            // Sanity bound: a 12% annual rate cannot add more than 24%
            // over 24 months
            assert!(option.total_amount < 1_240_000);
        }
    }

    #[test]
    fn test_longer_terms_have_lower_installments() {
        let options = quote_installments(2_000_000, &config());

        for pair in options.windows(2) {
            assert!(pair[1].monthly_payment < pair[0].monthly_payment);
        }
    }

    #[test]
    fn test_custom_table_single_plan() {
        let config = FinancingConfig {
            rates: vec![FinancingRate { months: 3, annual_rate: Decimal::ZERO }],
            min_amount: 0,
        };

        let options = quote_installments(90_000, &config);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].monthly_payment, 30_000);
    }
}
