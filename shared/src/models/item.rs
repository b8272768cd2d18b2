//! Line Item Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One customization choice on a line item.
///
/// Material and color pick a named option; size carries a numeric scale
/// modifier (1.0 = catalog size).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CustomizationValue {
    Scale(f64),
    Choice(String),
}

/// One selected furniture entry with quantity and chosen customizations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    /// Catalog category (sofas, mesas, dormitorio, decoracion, iluminacion, ...)
    pub category: String,
    /// Catalog unit price in CLP; missing prices read as zero
    #[serde(default)]
    pub price: i64,
    /// Quantity; out-of-range values are propagated into the arithmetic
    /// unchanged rather than rejected
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    /// Customization choices keyed by type (material, color, size)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub customizations: BTreeMap<String, CustomizationValue>,
}

fn default_quantity() -> i64 {
    1
}

impl LineItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            quantity: 1,
            customizations: BTreeMap::new(),
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_customization(
        mut self,
        kind: impl Into<String>,
        value: CustomizationValue,
    ) -> Self {
        self.customizations.insert(kind.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_defaults_to_one() {
        let json = r#"{
            "id": "mesa-1",
            "name": "Mesa Comedor",
            "category": "mesas",
            "price": 100000
        }"#;

        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, 1);
        assert!(item.customizations.is_empty());
    }

    #[test]
    fn test_customization_value_untagged() {
        let item = LineItem::new("sofa-31", "Sofá Esquinero", "sofas", 500000)
            .with_customization("material", CustomizationValue::Choice("leather".to_string()))
            .with_customization("size", CustomizationValue::Scale(1.15));

        let json = serde_json::to_string(&item).unwrap();
        let deserialized: LineItem = serde_json::from_str(&json).unwrap();

        assert_eq!(item, deserialized);
        assert_eq!(
            deserialized.customizations.get("size"),
            Some(&CustomizationValue::Scale(1.15))
        );
    }
}
