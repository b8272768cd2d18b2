//! Pricing Configuration Model
//!
//! Caller-supplied rate tables for one calculation run. `Default` carries
//! the production Chilean retail rates; callers override per deployment.
//! All monetary amounts are CLP (no minor subdivision), all rates and
//! multipliers are decimals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::coupon::{Coupon, CouponKind};

/// Region key used when the requested region has no multiplier entry
pub const REGION_OTHER: &str = "other";

/// Default region applied when a calculation names none
pub const REGION_DEFAULT: &str = "RM";

/// Shipping service tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShippingTier {
    #[default]
    Standard,
    Express,
    Premium,
}

/// Shipping rate table: base rate per tier, regional multipliers, and the
/// free-shipping subtotal threshold
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShippingConfig {
    pub standard: i64,
    pub express: i64,
    pub premium: i64,
    /// Shipping is waived once the subtotal reaches this amount
    pub free_threshold: i64,
    /// Regional multipliers applied to the tier base rate
    pub regions: BTreeMap<String, Decimal>,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        let mut regions = BTreeMap::new();
        regions.insert("RM".to_string(), Decimal::ONE);
        regions.insert("V".to_string(), Decimal::new(12, 1));
        regions.insert("VIII".to_string(), Decimal::new(13, 1));
        regions.insert(REGION_OTHER.to_string(), Decimal::new(15, 1));

        Self {
            standard: 29_990,
            express: 49_990,
            premium: 79_990,
            free_threshold: 500_000,
            regions,
        }
    }
}

impl ShippingConfig {
    /// Base rate for a shipping tier
    pub fn base_rate(&self, tier: ShippingTier) -> i64 {
        match tier {
            ShippingTier::Standard => self.standard,
            ShippingTier::Express => self.express,
            ShippingTier::Premium => self.premium,
        }
    }

    /// Regional multiplier; unknown regions fall back to the `other` entry
    pub fn region_multiplier(&self, region: &str) -> Decimal {
        self.regions
            .get(region)
            .or_else(|| self.regions.get(REGION_OTHER))
            .copied()
            .unwrap_or(Decimal::ONE)
    }
}

/// Installation service rates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InstallationConfig {
    /// Base cost per installed furniture unit
    pub per_item: i64,
    /// Minimum charge whenever the service is enabled
    pub minimum: i64,
    /// Maximum charge per order
    pub maximum: i64,
    /// Per-category effort multipliers
    pub categories: BTreeMap<String, Decimal>,
}

impl Default for InstallationConfig {
    fn default() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert("sofas".to_string(), Decimal::ONE);
        categories.insert("mesas".to_string(), Decimal::new(5, 1));
        categories.insert("dormitorio".to_string(), Decimal::new(12, 1));
        categories.insert("decoracion".to_string(), Decimal::new(3, 1));
        categories.insert("iluminacion".to_string(), Decimal::new(4, 1));

        Self {
            per_item: 25_000,
            minimum: 50_000,
            maximum: 200_000,
            categories,
        }
    }
}

impl InstallationConfig {
    /// Effort multiplier for a category; unknown categories use 1.0
    pub fn category_multiplier(&self, category: &str) -> Decimal {
        self.categories
            .get(category)
            .copied()
            .unwrap_or(Decimal::ONE)
    }
}

/// Size upcharge step: applies when the size modifier exceeds `above`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizeUpcharge {
    pub above: f64,
    pub upcharge: i64,
}

/// Upcharge tables for item customizations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CustomizationConfig {
    /// Upcharge per material option
    pub materials: BTreeMap<String, i64>,
    /// Colors that carry the premium color upcharge
    pub premium_colors: Vec<String>,
    pub premium_color_upcharge: i64,
    /// Size steps, checked in declared order; first match wins
    pub size_steps: Vec<SizeUpcharge>,
}

impl Default for CustomizationConfig {
    fn default() -> Self {
        let mut materials = BTreeMap::new();
        materials.insert("leather".to_string(), 150_000);
        materials.insert("premium-fabric".to_string(), 50_000);
        materials.insert("wood-upgrade".to_string(), 75_000);
        materials.insert("metal-finish".to_string(), 25_000);

        Self {
            materials,
            premium_colors: vec![
                "#FF6B6B".to_string(),
                "#4ECDC4".to_string(),
                "#45B7D1".to_string(),
            ],
            premium_color_upcharge: 15_000,
            size_steps: vec![
                SizeUpcharge { above: 1.2, upcharge: 50_000 },
                SizeUpcharge { above: 1.1, upcharge: 25_000 },
            ],
        }
    }
}

impl CustomizationConfig {
    /// Upcharge for a material option; unknown materials are free
    pub fn material_upcharge(&self, material: &str) -> i64 {
        self.materials.get(material).copied().unwrap_or(0)
    }

    /// Upcharge for a color option; only premium colors are charged
    pub fn color_upcharge(&self, color: &str) -> i64 {
        if self.premium_colors.iter().any(|c| c == color) {
            self.premium_color_upcharge
        } else {
            0
        }
    }

    /// Upcharge for a size modifier; first step whose threshold is exceeded
    pub fn size_upcharge(&self, modifier: f64) -> i64 {
        self.size_steps
            .iter()
            .find(|step| modifier > step.above)
            .map(|step| step.upcharge)
            .unwrap_or(0)
    }
}

/// Volume discount tier: `rate` applies once the subtotal reaches `threshold`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VolumeTier {
    pub threshold: i64,
    pub rate: Decimal,
}

/// Standard discount rates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiscountConfig {
    /// Volume tiers in ascending threshold order; the single highest
    /// qualifying rate applies (tiers do not accumulate)
    pub volume: Vec<VolumeTier>,
    /// Seasonal campaign rate; 0 disables the component
    pub seasonal: Decimal,
    /// Rate for a caller-attested first purchase
    pub first_time: Decimal,
}

impl Default for DiscountConfig {
    fn default() -> Self {
        Self {
            volume: vec![
                VolumeTier { threshold: 1_000_000, rate: Decimal::new(5, 2) },
                VolumeTier { threshold: 2_000_000, rate: Decimal::new(10, 2) },
                VolumeTier { threshold: 5_000_000, rate: Decimal::new(15, 2) },
            ],
            seasonal: Decimal::ZERO,
            first_time: Decimal::new(3, 2),
        }
    }
}

/// Installment plan entry: month count and annual interest rate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancingRate {
    pub months: u32,
    /// Annual rate; 0 means interest-free
    pub annual_rate: Decimal,
}

/// Financing rate table, in display order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FinancingConfig {
    pub rates: Vec<FinancingRate>,
    /// Totals below this amount do not qualify for installments
    pub min_amount: i64,
}

impl Default for FinancingConfig {
    fn default() -> Self {
        Self {
            rates: vec![
                FinancingRate { months: 6, annual_rate: Decimal::ZERO },
                FinancingRate { months: 12, annual_rate: Decimal::new(5, 2) },
                FinancingRate { months: 18, annual_rate: Decimal::new(8, 2) },
                FinancingRate { months: 24, annual_rate: Decimal::new(12, 2) },
            ],
            min_amount: 100_000,
        }
    }
}

/// Full pricing configuration for one engine instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingConfig {
    pub currency: String,
    pub locale: String,
    pub include_shipping: bool,
    /// Chilean prices already include IVA; taxes are opt-in
    pub include_taxes: bool,
    pub include_installation: bool,
    /// IVA rate applied when taxes are requested
    pub tax_rate: Decimal,
    pub shipping: ShippingConfig,
    pub installation: InstallationConfig,
    pub customizations: CustomizationConfig,
    pub discounts: DiscountConfig,
    pub financing: FinancingConfig,
    pub coupons: Vec<Coupon>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: "CLP".to_string(),
            locale: "es-CL".to_string(),
            include_shipping: true,
            include_taxes: false,
            include_installation: true,
            tax_rate: Decimal::new(19, 2),
            shipping: ShippingConfig::default(),
            installation: InstallationConfig::default(),
            customizations: CustomizationConfig::default(),
            discounts: DiscountConfig::default(),
            financing: FinancingConfig::default(),
            coupons: vec![
                Coupon {
                    code: "WELCOME10".to_string(),
                    kind: CouponKind::Percentage { rate: Decimal::new(10, 2) },
                    description: "Bienvenida 10%".to_string(),
                },
                Coupon {
                    code: "SAVE50K".to_string(),
                    kind: CouponKind::Fixed { amount: 50_000 },
                    description: "Descuento $50.000".to_string(),
                },
                Coupon {
                    code: "FREESHIP".to_string(),
                    kind: CouponKind::Shipping,
                    description: "Envío gratis".to_string(),
                },
            ],
        }
    }
}

impl PricingConfig {
    /// Look up a coupon by code, case-insensitively
    pub fn find_coupon(&self, code: &str) -> Option<&Coupon> {
        let code = code.to_uppercase();
        self.coupons.iter().find(|coupon| coupon.code == code)
    }
}
