//! Quote Engine
//!
//! Facade wiring the resolver, aggregator, discount engine, financing
//! calculator, and recommendation engine into the two-phase quote API.
//! `calculate` builds a fresh state for every call; `apply_coupon` is an
//! explicit transition on the most recently computed state and re-runs
//! the taxes/total tail. The price cache is the only state that outlives
//! a calculation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use shared::models::{LineItem, PricingConfig, REGION_DEFAULT};
use shared::quote::{
    CalculationResult, CategorySummary, CouponOutcome, PerformanceStats, QuoteOptions,
    QuoteState, QuoteSummary, Recommendation,
};

use crate::error::EngineError;
use crate::format::{format_totals, ChileanPesoFormatter, PriceFormatter};
use crate::money::{round_amount, to_decimal};
use crate::resolver::PriceResolver;
use crate::{aggregator, discounts, financing, recommend};

/// Cost computation engine for the furniture configurator.
///
/// One instance per deployment unit: either behind exclusive access in a
/// server context, or constructed per request. The memoized price cache
/// is concurrency-safe either way.
pub struct QuoteEngine {
    config: PricingConfig,
    resolver: PriceResolver,
    formatter: Box<dyn PriceFormatter>,
    state: Option<QuoteState>,
    last_calculation: Option<DateTime<Utc>>,
}

impl QuoteEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self::with_formatter(config, Box::new(ChileanPesoFormatter))
    }

    /// Build an engine with a substitute currency formatter
    pub fn with_formatter(config: PricingConfig, formatter: Box<dyn PriceFormatter>) -> Self {
        Self {
            config,
            resolver: PriceResolver::new(),
            formatter,
            state: None,
            last_calculation: None,
        }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Compute a full quote for the given items and options.
    ///
    /// Each call owns a fresh `QuoteState`; nothing is shared with prior
    /// calls except the price cache. An empty item list yields a
    /// well-formed all-zero result and leaves any previous quote intact.
    pub fn calculate(&mut self, items: &[LineItem], options: &QuoteOptions) -> CalculationResult {
        if items.is_empty() {
            tracing::debug!("Quote requested with no items");
            return self.empty_result();
        }

        let mut state = QuoteState {
            items: self.resolver.resolve_items(items, &self.config),
            shipping_type: options.shipping_type.unwrap_or_default(),
            region: options
                .region
                .clone()
                .unwrap_or_else(|| REGION_DEFAULT.to_string()),
            include_installation: options
                .include_installation
                .unwrap_or(self.config.include_installation),
            include_taxes: options.include_taxes.unwrap_or(self.config.include_taxes),
            ..QuoteState::default()
        };

        // Ordered pipeline: subtotal → shipping → installation →
        // discounts → taxes → total
        state.subtotal = aggregator::subtotal(&state.items);
        state.shipping = aggregator::shipping(
            state.subtotal,
            state.shipping_type,
            &state.region,
            &self.config,
        );
        state.installation =
            aggregator::installation(&state.items, state.include_installation, &self.config);
        discounts::apply_standard_discounts(&mut state, &self.config, options.first_time_customer);
        aggregator::finalize(&mut state, &self.config);

        let calculated_at = Utc::now();
        let result = self.snapshot(&state, calculated_at);

        tracing::info!(
            item_count = state.items.len(),
            subtotal = state.subtotal,
            discounts = state.discounts,
            total = state.total,
            "Quote calculated"
        );

        self.state = Some(state);
        self.last_calculation = Some(calculated_at);
        result
    }

    /// Apply a coupon code to the most recently computed quote.
    ///
    /// On success the aggregation tail is re-run so taxes and total
    /// reflect the new discount (or waived shipping). Unknown codes are
    /// reported in the outcome and leave the quote untouched.
    pub fn apply_coupon(&mut self, code: &str) -> Result<CouponOutcome, EngineError> {
        let state = self.state.as_mut().ok_or(EngineError::NoQuote)?;

        let outcome = discounts::apply_coupon(code, state, &self.config, self.formatter.as_ref());
        if outcome.success {
            aggregator::finalize(state, &self.config);
            tracing::info!(code = %code, total = state.total, "Coupon applied");
        }
        Ok(outcome)
    }

    /// Re-snapshot the most recent quote, including coupon mutations
    pub fn current(&self) -> Result<CalculationResult, EngineError> {
        let state = self.state.as_ref().ok_or(EngineError::NoQuote)?;
        let calculated_at = self.last_calculation.ok_or(EngineError::NoQuote)?;
        Ok(self.snapshot(state, calculated_at))
    }

    /// Drop every memoized price
    pub fn clear_cache(&self) {
        self.resolver.clear();
    }

    pub fn performance_stats(&self) -> PerformanceStats {
        PerformanceStats {
            cache_size: self.resolver.cache_size(),
            last_calculation: self.last_calculation,
            items_processed: self.state.as_ref().map_or(0, |state| state.items.len()),
        }
    }

    /// Assemble the immutable result object from a computed state
    fn snapshot(&self, state: &QuoteState, calculated_at: DateTime<Utc>) -> CalculationResult {
        let financing_options = financing::quote_installments(state.total, &self.config.financing);
        let recommendations = recommend::recommend(
            state,
            &self.config,
            &financing_options,
            self.formatter.as_ref(),
        );

        CalculationResult {
            items: state.items.clone(),
            subtotal: state.subtotal,
            shipping: state.shipping,
            installation: state.installation,
            discounts: state.discounts,
            taxes: state.taxes,
            total: state.total,
            formatted: format_totals(state, self.formatter.as_ref()),
            discount_details: state.applied_discounts.clone(),
            financing_options,
            summary: self.build_summary(state, recommendations),
            calculated_at,
        }
    }

    fn build_summary(
        &self,
        state: &QuoteState,
        recommendations: Vec<Recommendation>,
    ) -> QuoteSummary {
        let mut categories: BTreeMap<String, CategorySummary> = BTreeMap::new();
        for item in &state.items {
            let entry = categories.entry(item.category.clone()).or_default();
            entry.count += item.quantity;
            entry.total += item.item_total;
            entry.items.push(item.name.clone());
        }

        // Waived shipping counts as savings alongside the discounts
        let mut savings = state.discounts;
        if state.shipping == 0 && state.subtotal >= self.config.shipping.free_threshold {
            savings += self.config.shipping.standard;
        }

        let average_item_price = if state.items.is_empty() {
            0
        } else {
            round_amount(to_decimal(state.subtotal) / Decimal::from(state.items.len() as u64))
        };

        QuoteSummary {
            item_count: state.items.len(),
            categories,
            savings,
            average_item_price,
            recommendations,
        }
    }

    fn empty_result(&self) -> CalculationResult {
        let zeros = QuoteState::default();
        CalculationResult {
            items: vec![],
            subtotal: 0,
            shipping: 0,
            installation: 0,
            discounts: 0,
            taxes: 0,
            total: 0,
            formatted: format_totals(&zeros, self.formatter.as_ref()),
            discount_details: vec![],
            financing_options: vec![],
            summary: QuoteSummary::default(),
            calculated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Empty Input ====================

    #[test]
    fn test_empty_items_yield_zero_result() {
        let mut engine = QuoteEngine::new(PricingConfig::default());
        let result = engine.calculate(&[], &QuoteOptions::default());

        assert_eq!(result.subtotal, 0);
        assert_eq!(result.total, 0);
        assert_eq!(result.formatted.total, "$0");
        assert!(result.items.is_empty());
        assert!(result.financing_options.is_empty());
        assert_eq!(result.summary.item_count, 0);
    }

    #[test]
    fn test_empty_calculate_preserves_previous_quote() {
        let mut engine = QuoteEngine::new(PricingConfig::default());
        let items = vec![LineItem::new("mesa-1", "Mesa Comedor", "mesas", 100_000)];

        let first = engine.calculate(&items, &QuoteOptions::default().with_installation(false));
        engine.calculate(&[], &QuoteOptions::default());

        let current = engine.current().unwrap();
        assert_eq!(current.total, first.total);
    }

    // ==================== Coupon Phase ====================

    #[test]
    fn test_apply_coupon_before_calculate_is_an_error() {
        let mut engine = QuoteEngine::new(PricingConfig::default());
        assert_eq!(engine.apply_coupon("SAVE50K"), Err(EngineError::NoQuote));
    }

    #[test]
    fn test_shipping_coupon_refreshes_total() {
        let mut engine = QuoteEngine::new(PricingConfig::default());
        let items = vec![LineItem::new("mesa-1", "Mesa Comedor", "mesas", 100_000)];

        let before = engine.calculate(&items, &QuoteOptions::default().with_installation(false));
        assert_eq!(before.total, 129_990);

        let outcome = engine.apply_coupon("FREESHIP").unwrap();
        assert!(outcome.success);

        let after = engine.current().unwrap();
        assert_eq!(after.shipping, 0);
        // Total reflects the waived shipping charge
        assert_eq!(after.total, 100_000);
    }

    // ==================== Summary ====================

    #[test]
    fn test_summary_groups_by_category() {
        let mut engine = QuoteEngine::new(PricingConfig::default());
        let items = vec![
            LineItem::new("mesa-1", "Mesa Comedor", "mesas", 100_000).with_quantity(2),
            LineItem::new("silla-11", "Silla Nórdica", "mesas", 45_000),
            LineItem::new("sofa-31", "Sofá Esquinero", "sofas", 500_000),
        ];

        let result = engine.calculate(&items, &QuoteOptions::default());
        let mesas = &result.summary.categories["mesas"];

        assert_eq!(result.summary.item_count, 3);
        assert_eq!(mesas.count, 3); // 2 mesas + 1 silla (units, not lines)
        assert_eq!(mesas.items, vec!["Mesa Comedor", "Silla Nórdica"]);
        assert!(result.summary.categories.contains_key("sofas"));
    }

    #[test]
    fn test_summary_savings_include_waived_shipping() {
        let mut engine = QuoteEngine::new(PricingConfig::default());
        let items = vec![LineItem::new("sofa-31", "Sofá Esquinero", "sofas", 500_000)];

        let result = engine.calculate(&items, &QuoteOptions::default());

        // No discounts triggered; savings are the waived standard shipping
        assert_eq!(result.discounts, 0);
        assert_eq!(result.summary.savings, 29_990);
    }

    // ==================== Cache Bookkeeping ====================

    #[test]
    fn test_performance_stats_track_cache_and_last_run() {
        let mut engine = QuoteEngine::new(PricingConfig::default());

        let stats = engine.performance_stats();
        assert_eq!(stats.cache_size, 0);
        assert!(stats.last_calculation.is_none());

        let items = vec![
            LineItem::new("mesa-1", "Mesa Comedor", "mesas", 100_000),
            LineItem::new("silla-11", "Silla Nórdica", "mesas", 45_000),
        ];
        engine.calculate(&items, &QuoteOptions::default());

        let stats = engine.performance_stats();
        assert_eq!(stats.cache_size, 2);
        assert_eq!(stats.items_processed, 2);
        assert!(stats.last_calculation.is_some());

        engine.clear_cache();
        assert_eq!(engine.performance_stats().cache_size, 0);
    }
}
