//! Per-Calculation Options

use serde::{Deserialize, Serialize};

use crate::models::ShippingTier;

/// Contextual options for one calculation; unset fields fall back to the
/// pricing configuration defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuoteOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_type: Option<ShippingTier>,
    /// Delivery region code (RM, V, VIII, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_installation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_taxes: Option<bool>,
    /// First-purchase status is an external fact; the caller attests it
    /// (typically from the customer record)
    pub first_time_customer: bool,
}

impl QuoteOptions {
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_shipping_type(mut self, tier: ShippingTier) -> Self {
        self.shipping_type = Some(tier);
        self
    }

    pub fn with_installation(mut self, include: bool) -> Self {
        self.include_installation = Some(include);
        self
    }

    pub fn with_taxes(mut self, include: bool) -> Self {
        self.include_taxes = Some(include);
        self
    }

    pub fn first_time(mut self) -> Self {
        self.first_time_customer = true;
        self
    }
}
