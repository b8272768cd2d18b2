//! Upsell Recommendations

use serde::{Deserialize, Serialize};

/// Recommendation kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationKind {
    FreeShipping,
    VolumeDiscount,
    Financing,
}

/// An advisory nudge derived from the computed quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    /// Localized display message
    pub message: String,
    /// What the customer stands to save by following the nudge
    pub potential_savings: i64,
}
