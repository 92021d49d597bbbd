//! Boolean gates: in-stock only and featured only.

use super::Filter;
use crate::catalog::Item;

/// Keeps only items that are in stock.
pub struct InStockFilter;

impl InStockFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InStockFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for InStockFilter {
    fn matches(&self, item: &Item) -> bool {
        item.in_stock
    }

    fn description(&self) -> String {
        "In stock only".to_string()
    }
}

/// Keeps only items flagged for promotion.
pub struct FeaturedFilter;

impl FeaturedFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FeaturedFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for FeaturedFilter {
    fn matches(&self, item: &Item) -> bool {
        item.featured
    }

    fn description(&self) -> String {
        "Featured only".to_string()
    }
}
