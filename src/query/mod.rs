//! The catalog query engine: criteria, filtering, sorting and paging.
//!
//! Everything here is pure and synchronous. Running the same query twice over
//! the same items yields the same output, so callers can re-run it on every
//! keystroke or filter change.

pub mod facets;
pub mod page;
pub mod sort;

use crate::catalog::ingest::validate_item;
use crate::catalog::Item;
use crate::error::CatalogError;
use crate::filters::FilterChain;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub use facets::Facets;
pub use page::{paginate, Page, Pagination};
pub use sort::SortKey;

/// Inclusive price bounds; a missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// User-selected filter and sort state for one catalog query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Criteria {
    /// Free text matched against title, description and tags
    pub search_text: String,
    /// Exact category; empty or "all" means no filter
    pub category: Option<String>,
    /// Exact subcategory; empty or "all" means no filter
    pub subcategory: Option<String>,
    pub price_range: PriceRange,
    /// Accepted brands; empty means no filter
    pub brands: BTreeSet<String>,
    pub in_stock_only: bool,
    pub featured_only: bool,
    /// Inclusive lower bound on the star rating
    pub min_rating: f32,
    /// `None` keeps the input order
    pub sort: Option<SortKey>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.insert(brand.into());
        self
    }

    pub fn in_stock_only(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    pub fn featured_only(mut self) -> Self {
        self.featured_only = true;
        self
    }

    pub fn with_min_rating(mut self, min: f32) -> Self {
        self.min_rating = min;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the sort from a raw key. Unknown keys leave the order untouched
    /// and are reported back for UI feedback.
    pub fn with_sort_key(mut self, raw: &str) -> (Self, Option<CatalogError>) {
        match raw.parse::<SortKey>() {
            Ok(key) => {
                self.sort = Some(key);
                (self, None)
            }
            Err(err) => {
                self.sort = None;
                (self, Some(err))
            }
        }
    }

    /// The category to filter on, if any.
    pub fn active_category(&self) -> Option<&str> {
        active_selection(self.category.as_deref())
    }

    /// The subcategory to filter on, if any.
    pub fn active_subcategory(&self) -> Option<&str> {
        active_selection(self.subcategory.as_deref())
    }

    /// Repairs out-of-range input, returning the usable criteria and one
    /// `InvalidCriteria` per repair.
    pub fn sanitize(&self) -> (Criteria, Vec<CatalogError>) {
        let mut fixed = self.clone();
        let mut issues = Vec::new();

        for (label, bound) in [("min", &mut fixed.price_range.min), ("max", &mut fixed.price_range.max)]
        {
            if let Some(value) = *bound {
                if !value.is_finite() || value < 0.0 {
                    issues.push(CatalogError::invalid_criteria(format!(
                        "price {} {} is not a non-negative number, ignoring it",
                        label, value
                    )));
                    *bound = None;
                }
            }
        }

        if let (Some(min), Some(max)) = (fixed.price_range.min, fixed.price_range.max) {
            if min > max {
                issues.push(CatalogError::invalid_criteria(format!(
                    "price range min {:.2} exceeds max {:.2}, ignoring the range",
                    min, max
                )));
                fixed.price_range = PriceRange::default();
            }
        }

        if !fixed.min_rating.is_finite() {
            issues.push(CatalogError::invalid_criteria("minimum rating is not a number"));
            fixed.min_rating = 0.0;
        } else if !(0.0..=5.0).contains(&fixed.min_rating) {
            let clamped = fixed.min_rating.clamp(0.0, 5.0);
            issues.push(CatalogError::invalid_criteria(format!(
                "minimum rating {} outside 0-5, using {}",
                fixed.min_rating, clamped
            )));
            fixed.min_rating = clamped;
        }

        let before = fixed.brands.len();
        fixed.brands.retain(|brand| !brand.trim().is_empty());
        if fixed.brands.len() < before {
            issues.push(CatalogError::invalid_criteria("blank brand ignored"));
        }

        (fixed, issues)
    }
}

fn active_selection(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// Result of a query together with any criteria repairs that were applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryOutcome {
    pub items: Vec<Item>,
    #[serde(skip)]
    pub issues: Vec<CatalogError>,
}

impl QueryOutcome {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if the criteria needed repairs.
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Filters and sorts `items` by `criteria`, reporting criteria repairs.
///
/// Items that break the data invariants are skipped and logged.
pub fn run_query(items: &[Item], criteria: &Criteria) -> QueryOutcome {
    let (criteria, issues) = criteria.sanitize();
    for issue in &issues {
        warn!("{}", issue);
    }

    let chain = FilterChain::from_criteria(&criteria);
    if !chain.is_empty() {
        debug!("Active filters: {}", chain.descriptions().join(", "));
    }

    let mut matched: Vec<Item> = items
        .iter()
        .filter(|item| match validate_item(item) {
            Ok(()) => true,
            Err(err) => {
                warn!("{}", err);
                false
            }
        })
        .filter(|item| chain.matches(item))
        .cloned()
        .collect();

    if let Some(sort) = criteria.sort {
        sort.sort(&mut matched);
    }

    debug!("{} of {} items match", matched.len(), items.len());

    QueryOutcome { items: matched, issues }
}

/// Filters and sorts `items` by `criteria`.
pub fn filter_and_sort(items: &[Item], criteria: &Criteria) -> Vec<Item> {
    run_query(items, criteria).items
}
