//! Minimum rating filter.

use super::Filter;
use crate::catalog::Item;

/// Filters items by an inclusive minimum star rating.
pub struct RatingFilter {
    min_stars: f32,
}

impl RatingFilter {
    /// Creates a new rating filter with minimum stars.
    pub fn new(min_stars: f32) -> Self {
        Self { min_stars: min_stars.clamp(0.0, 5.0) }
    }
}

impl Filter for RatingFilter {
    fn matches(&self, item: &Item) -> bool {
        item.rating >= self.min_stars
    }

    fn description(&self) -> String {
        format!("Rating: >= {:.1} stars", self.min_stars)
    }
}
