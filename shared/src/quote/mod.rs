//! Quote Snapshot Types
//!
//! Everything a calculation run produces: the resolved items, the working
//! state the engine mutates across the two phases (calculate, then coupon
//! application), the discount ledger, financing quotes, recommendations,
//! and the immutable result handed to callers.

pub mod discount;
pub mod financing;
pub mod options;
pub mod recommendation;
pub mod result;
pub mod snapshot;

// Re-exports
pub use discount::{DiscountKind, DiscountRecord};
pub use financing::FinancingOption;
pub use options::QuoteOptions;
pub use recommendation::{Recommendation, RecommendationKind};
pub use result::{
    CalculationResult, CategorySummary, CouponOutcome, FormattedTotals, PerformanceStats,
    QuoteSummary,
};
pub use snapshot::{QuoteState, ResolvedItem};
