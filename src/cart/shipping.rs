//! Shipping options and the free-shipping rule.

use crate::catalog::{from_cents, to_cents};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// A selectable delivery tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingOption {
    pub id: String,
    pub name: String,
    pub cost: f64,
    /// The default tier; the only one the free-shipping threshold applies to.
    #[serde(default)]
    pub standard: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_days: Option<(u32, u32)>,
}

impl ShippingOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: f64) -> Self {
        Self { id: id.into(), name: name.into(), cost, standard: false, delivery_days: None }
    }

    pub fn standard(mut self) -> Self {
        self.standard = true;
        self
    }

    pub fn with_delivery_days(mut self, min: u32, max: u32) -> Self {
        self.delivery_days = Some((min, max));
        self
    }

    /// Get delivery estimate string.
    pub fn delivery_estimate(&self) -> Option<String> {
        match self.delivery_days {
            Some((min, max)) if min == max => Some(format!("{} days", min)),
            Some((min, max)) => Some(format!("{}-{} days", min, max)),
            None => None,
        }
    }
}

/// Shipping options offered at checkout plus the free-shipping threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingTable {
    pub options: Vec<ShippingOption>,
    /// Subtotal at or above which the standard tier ships free
    pub free_threshold: f64,
}

impl Default for ShippingTable {
    fn default() -> Self {
        Self {
            options: vec![
                ShippingOption::new("standard", "Standard", 4.99).standard().with_delivery_days(3, 5),
                ShippingOption::new("express", "Express", 12.99).with_delivery_days(1, 2),
                ShippingOption::new("pickup", "Store pickup", 0.0),
            ],
            free_threshold: 100.0,
        }
    }
}

impl ShippingTable {
    pub fn new(options: Vec<ShippingOption>, free_threshold: f64) -> Self {
        Self { options, free_threshold }
    }

    /// The default tier: the first option marked standard, else the first option.
    pub fn default_option(&self) -> Option<&ShippingOption> {
        self.options.iter().find(|o| o.standard).or_else(|| self.options.first())
    }

    /// Finds an option by id (case-insensitive).
    pub fn find(&self, id: &str) -> Result<&ShippingOption, CatalogError> {
        self.options
            .iter()
            .find(|o| o.id.eq_ignore_ascii_case(id.trim()))
            .ok_or_else(|| CatalogError::invalid_criteria(format!("unknown shipping option '{}'", id)))
    }

    /// Shipping cost for an option at a given subtotal.
    pub fn cost_for(&self, option: &ShippingOption, subtotal: f64) -> f64 {
        from_cents(self.cost_cents_for(option, to_cents(subtotal)))
    }

    /// Shipping cost in cents; the threshold is compared in whole cents.
    pub fn cost_cents_for(&self, option: &ShippingOption, subtotal_cents: i64) -> i64 {
        if option.standard && subtotal_cents >= to_cents(self.free_threshold) {
            0
        } else {
            to_cents(option.cost).max(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = ShippingTable::default();
        assert_eq!(table.options.len(), 3);
        assert_eq!(table.default_option().unwrap().id, "standard");
        assert_eq!(table.free_threshold, 100.0);
    }

    #[test]
    fn test_find() {
        let table = ShippingTable::default();
        assert_eq!(table.find("EXPRESS").unwrap().cost, 12.99);
        let err = table.find("drone").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCriteria(_)));
    }

    #[test]
    fn test_free_shipping_threshold_applies_to_standard_only() {
        let table = ShippingTable::default();
        let standard = table.find("standard").unwrap();
        let express = table.find("express").unwrap();

        assert_eq!(table.cost_for(standard, 99.99), 4.99);
        assert_eq!(table.cost_for(standard, 100.0), 0.0);
        assert_eq!(table.cost_for(express, 500.0), 12.99);
        assert_eq!(table.cost_for(standard, 0.08 + 86.07 + 13.85), 0.0);
        assert_eq!(table.cost_cents_for(standard, 9_999), 499);
        assert_eq!(table.cost_cents_for(standard, 10_000), 0);
    }

    #[test]
    fn test_default_option_falls_back_to_first() {
        let table = ShippingTable::new(vec![ShippingOption::new("flat", "Flat rate", 6.0)], 50.0);
        assert_eq!(table.default_option().unwrap().id, "flat");

        let empty = ShippingTable::new(Vec::new(), 50.0);
        assert!(empty.default_option().is_none());
    }

    #[test]
    fn test_delivery_estimate() {
        let option = ShippingOption::new("x", "X", 1.0).with_delivery_days(3, 5);
        assert_eq!(option.delivery_estimate(), Some("3-5 days".to_string()));
        let option = ShippingOption::new("x", "X", 1.0).with_delivery_days(2, 2);
        assert_eq!(option.delivery_estimate(), Some("2 days".to_string()));
        assert!(ShippingOption::new("x", "X", 1.0).delivery_estimate().is_none());
    }

    #[test]
    fn test_option_from_toml() {
        let src = r#"
            id = "express"
            name = "Express"
            cost = 9.5
            delivery_days = [1, 2]
        "#;
        let option: ShippingOption = toml::from_str(src).unwrap();
        assert!(!option.standard);
        assert_eq!(option.delivery_days, Some((1, 2)));
    }
}
