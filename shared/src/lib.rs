//! Shared types for the furniture quote engine
//!
//! Domain models (line items, pricing configuration, coupons) and the
//! quote snapshot types computed by the engine.

pub mod models;
pub mod quote;

// Re-exports
pub use models::{
    Coupon, CouponKind, CustomizationConfig, CustomizationValue, DiscountConfig, FinancingConfig,
    FinancingRate, InstallationConfig, LineItem, PricingConfig, ShippingConfig, ShippingTier,
    SizeUpcharge, VolumeTier,
};
pub use quote::{
    CalculationResult, CategorySummary, CouponOutcome, DiscountKind, DiscountRecord,
    FinancingOption, FormattedTotals, PerformanceStats, QuoteOptions, QuoteState, QuoteSummary,
    Recommendation, RecommendationKind, ResolvedItem,
};
