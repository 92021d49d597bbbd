//! Sort keys and stable ordering of result sets.

use crate::catalog::Item;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

/// Orderings offered by the catalog pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Featured items first, otherwise input order.
    Featured,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Highest rated first.
    Rating,
    /// Most recently added first.
    Newest,
    /// Most reviewed first.
    Popular,
}

impl SortKey {
    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Rating => "Highest Rated",
            SortKey::Newest => "Newest",
            SortKey::Popular => "Most Popular",
        }
    }

    /// Returns all sort keys.
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Featured,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::Rating,
            SortKey::Newest,
            SortKey::Popular,
        ]
    }

    /// Sorts in place. The sort is stable: ties keep their input order.
    pub fn sort(&self, items: &mut [Item]) {
        match self {
            SortKey::Featured => items.sort_by_key(|item| Reverse(item.featured)),
            SortKey::PriceLow => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortKey::PriceHigh => items.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortKey::Rating => items.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortKey::Newest => items.sort_by(|a, b| recency_key(&b.id).cmp(&recency_key(&a.id))),
            SortKey::Popular => items.sort_by_key(|item| Reverse(item.review_count)),
        }
    }
}

/// Recency proxy derived from the id: numeric ids rank above non-numeric
/// ones and compare by value; non-numeric ids compare lexically.
fn recency_key(id: &str) -> (Option<u64>, &str) {
    (id.parse::<u64>().ok(), id)
}

/// Compares two ids the way [`SortKey::Newest`] orders them, oldest first.
pub fn compare_recency(a: &str, b: &str) -> Ordering {
    recency_key(a).cmp(&recency_key(b))
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
            SortKey::Popular => "popular",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "featured" => Ok(SortKey::Featured),
            "price-low" | "price-asc" => Ok(SortKey::PriceLow),
            "price-high" | "price-desc" => Ok(SortKey::PriceHigh),
            "rating" => Ok(SortKey::Rating),
            "newest" => Ok(SortKey::Newest),
            "popular" | "reviews" => Ok(SortKey::Popular),
            _ => Err(CatalogError::invalid_criteria(format!(
                "unknown sort key '{}'. Valid keys: featured, price-low, price-high, rating, newest, popular",
                s
            ))),
        }
    }
}
