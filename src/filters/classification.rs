//! Exact-match classification filters: category, subcategory and brand.

use super::Filter;
use crate::catalog::Item;
use std::collections::BTreeSet;

/// Keeps items whose category equals the selected one.
pub struct CategoryFilter {
    category: String,
}

impl CategoryFilter {
    pub fn new(category: impl Into<String>) -> Self {
        Self { category: category.into() }
    }
}

impl Filter for CategoryFilter {
    fn matches(&self, item: &Item) -> bool {
        item.category == self.category
    }

    fn description(&self) -> String {
        format!("Category: {}", self.category)
    }
}

/// Keeps items whose subcategory equals the selected one.
pub struct SubcategoryFilter {
    subcategory: String,
}

impl SubcategoryFilter {
    pub fn new(subcategory: impl Into<String>) -> Self {
        Self { subcategory: subcategory.into() }
    }
}

impl Filter for SubcategoryFilter {
    fn matches(&self, item: &Item) -> bool {
        item.subcategory.as_deref() == Some(self.subcategory.as_str())
    }

    fn description(&self) -> String {
        format!("Subcategory: {}", self.subcategory)
    }
}

/// Keeps items whose brand is in the accepted set.
pub struct BrandFilter {
    brands: BTreeSet<String>,
}

impl BrandFilter {
    pub fn new(brands: impl IntoIterator<Item = String>) -> Self {
        Self { brands: brands.into_iter().collect() }
    }
}

impl Filter for BrandFilter {
    fn matches(&self, item: &Item) -> bool {
        item.brand.as_ref().is_some_and(|brand| self.brands.contains(brand))
    }

    fn description(&self) -> String {
        let brands: Vec<&str> = self.brands.iter().map(String::as_str).collect();
        format!("Brand: {}", brands.join(", "))
    }
}
