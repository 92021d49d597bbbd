//! Item filtering system with composable filters.

pub mod classification;
pub mod flags;
pub mod price;
pub mod rating;
pub mod text;

use crate::catalog::Item;
use crate::query::Criteria;

pub use classification::{BrandFilter, CategoryFilter, SubcategoryFilter};
pub use flags::{FeaturedFilter, InStockFilter};
pub use price::PriceFilter;
pub use rating::RatingFilter;
pub use text::TextFilter;

/// Trait for filtering items.
pub trait Filter: Send + Sync {
    /// Returns true if the item passes the filter.
    fn matches(&self, item: &Item) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Builds the chain for every active predicate in `criteria`.
    pub fn from_criteria(criteria: &Criteria) -> Self {
        FilterChainBuilder::new()
            .text(&criteria.search_text)
            .category(criteria.active_category())
            .subcategory(criteria.active_subcategory())
            .price_range(criteria.price_range.min, criteria.price_range.max)
            .brands(criteria.brands.iter().cloned().collect())
            .in_stock_only(criteria.in_stock_only)
            .featured_only(criteria.featured_only)
            .min_rating(criteria.min_rating)
            .build()
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if an item passes all filters.
    pub fn matches(&self, item: &Item) -> bool {
        self.filters.iter().all(|f| f.matches(item))
    }

    /// Filters a collection of items, preserving order.
    pub fn apply<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that only adds the filters whose input is active.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds a free-text search filter.
    pub fn text(mut self, query: &str) -> Self {
        if !query.trim().is_empty() {
            self.chain.add(TextFilter::new(query));
        }
        self
    }

    /// Adds an exact category filter.
    pub fn category(mut self, category: Option<&str>) -> Self {
        if let Some(category) = category {
            self.chain.add(CategoryFilter::new(category));
        }
        self
    }

    /// Adds an exact subcategory filter.
    pub fn subcategory(mut self, subcategory: Option<&str>) -> Self {
        if let Some(subcategory) = subcategory {
            self.chain.add(SubcategoryFilter::new(subcategory));
        }
        self
    }

    /// Adds a price range filter.
    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        if min.is_some() || max.is_some() {
            self.chain.add(PriceFilter::new(min, max));
        }
        self
    }

    /// Adds a brand membership filter.
    pub fn brands(mut self, brands: Vec<String>) -> Self {
        if !brands.is_empty() {
            self.chain.add(BrandFilter::new(brands));
        }
        self
    }

    /// Adds an in-stock gate.
    pub fn in_stock_only(mut self, enabled: bool) -> Self {
        if enabled {
            self.chain.add(InStockFilter::new());
        }
        self
    }

    /// Adds a featured gate.
    pub fn featured_only(mut self, enabled: bool) -> Self {
        if enabled {
            self.chain.add(FeaturedFilter::new());
        }
        self
    }

    /// Adds a minimum rating filter. A zero bound accepts everything.
    pub fn min_rating(mut self, min: f32) -> Self {
        if min > 0.0 {
            self.chain.add(RatingFilter::new(min));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
