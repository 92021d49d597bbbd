//! Facet counts for filter sidebars.

use crate::catalog::Item;
use serde::Serialize;
use std::collections::BTreeMap;

/// Category and brand counts plus the price span of a result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Facets {
    pub categories: BTreeMap<String, usize>,
    pub brands: BTreeMap<String, usize>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: usize,
}

impl Facets {
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut facets = Facets::default();

        for item in items {
            *facets.categories.entry(item.category.clone()).or_default() += 1;
            if let Some(brand) = &item.brand {
                *facets.brands.entry(brand.clone()).or_default() += 1;
            }
            facets.min_price = Some(facets.min_price.map_or(item.price, |p| p.min(item.price)));
            facets.max_price = Some(facets.max_price.map_or(item.price, |p| p.max(item.price)));
            if item.in_stock {
                facets.in_stock += 1;
            }
        }

        facets
    }
}
