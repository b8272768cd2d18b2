//! Price Resolver
//!
//! Resolves the effective unit price of a line item: catalog price plus
//! customization upcharges, adjusted by a deterministic market fluctuation
//! derived from the item id. Results are memoized per
//! (id, customizations) so repeated calculations on the same engine
//! instance never recompute a price.

use std::collections::BTreeMap;

use dashmap::DashMap;
use rust_decimal::Decimal;
use shared::models::{CustomizationConfig, CustomizationValue, LineItem, PricingConfig};
use shared::quote::ResolvedItem;

use crate::money::{round_amount, to_decimal};

/// Customization keys recognized by the upcharge tables
const CUSTOMIZATION_MATERIAL: &str = "material";
const CUSTOMIZATION_COLOR: &str = "color";
const CUSTOMIZATION_SIZE: &str = "size";

/// Categories excluded from discount eligibility
const DISCOUNT_EXCLUDED_CATEGORIES: [&str; 2] = ["outlet", "clearance"];

/// Categories charged for installation service
const INSTALLATION_CATEGORIES: [&str; 3] = ["sofas", "dormitorio", "iluminacion"];

/// Resolves and memoizes effective unit prices.
///
/// The cache is the only state that outlives a calculation. It is a
/// concurrent map so one resolver can be read from several requests; the
/// alternative deployment mode is a per-request engine instance.
#[derive(Debug, Default)]
pub struct PriceResolver {
    cache: DashMap<String, i64>,
}

impl PriceResolver {
    pub fn new() -> Self {
        Self { cache: DashMap::new() }
    }

    /// Resolve the effective unit price for an item.
    ///
    /// Deterministic for a given (id, customizations) pair: the market
    /// fluctuation is a pure function of the item id, so repeated calls
    /// return identical prices with or without the cache.
    pub fn resolve(&self, item: &LineItem, config: &PricingConfig) -> i64 {
        let key = cache_key(&item.id, &item.customizations);
        if let Some(price) = self.cache.get(&key) {
            tracing::debug!(item_id = %item.id, "Price cache hit");
            return *price;
        }

        let base = item.price + customization_upcharge(&item.customizations, &config.customizations);
        let fluctuation = price_fluctuation(&item.id);
        let price = round_amount(to_decimal(base) * (Decimal::ONE + fluctuation));

        self.cache.insert(key, price);
        price
    }

    /// Resolve every line item into the per-run representation
    pub fn resolve_items(&self, items: &[LineItem], config: &PricingConfig) -> Vec<ResolvedItem> {
        items
            .iter()
            .map(|item| {
                let current_price = self.resolve(item, config);
                ResolvedItem {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    category: item.category.clone(),
                    original_price: item.price,
                    current_price,
                    quantity: item.quantity,
                    customizations: item.customizations.clone(),
                    item_total: current_price * item.quantity,
                    discount_eligible: is_discount_eligible(&item.category),
                    installation_required: requires_installation(&item.category),
                }
            })
            .collect()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// Cache key: item id plus the serialized customization map. The map is a
/// BTreeMap, so serialization order is stable.
fn cache_key(id: &str, customizations: &BTreeMap<String, CustomizationValue>) -> String {
    let serialized = serde_json::to_string(customizations).unwrap_or_default();
    format!("{id}|{serialized}")
}

/// Sum the upcharges for the recognized customization types.
/// Unknown types and unknown option values contribute zero.
pub fn customization_upcharge(
    customizations: &BTreeMap<String, CustomizationValue>,
    config: &CustomizationConfig,
) -> i64 {
    let mut additional = 0i64;
    for (kind, value) in customizations {
        match (kind.as_str(), value) {
            (CUSTOMIZATION_MATERIAL, CustomizationValue::Choice(material)) => {
                additional += config.material_upcharge(material);
            }
            (CUSTOMIZATION_COLOR, CustomizationValue::Choice(color)) => {
                additional += config.color_upcharge(color);
            }
            (CUSTOMIZATION_SIZE, CustomizationValue::Scale(modifier)) => {
                additional += config.size_upcharge(*modifier);
            }
            _ => {}
        }
    }
    additional
}

/// Deterministic market fluctuation in a ±1% band.
///
/// Derived from a 32-bit shift hash of the item id so pricing is
/// reproducible without an external market feed.
pub fn price_fluctuation(item_id: &str) -> Decimal {
    let hash = id_hash(item_id);
    Decimal::new(i64::from(hash % 21) - 10, 3)
}

/// 31-multiplier shift hash over the id's UTF-16 code units, wrapped to a
/// signed 32-bit value, absolute
fn id_hash(id: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in id.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

fn is_discount_eligible(category: &str) -> bool {
    !DISCOUNT_EXCLUDED_CATEGORIES.contains(&category)
}

fn requires_installation(category: &str) -> bool {
    INSTALLATION_CATEGORIES.contains(&category)
}
