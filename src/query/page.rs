//! Pagination over an ordered result set.

use serde::{Deserialize, Serialize};

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: usize = 100;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    pub per_page: usize,
    /// Total number of items across all pages.
    pub total: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// Creates pagination info, clamping the page into range.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        let total_pages = if total == 0 { 1 } else { total.div_ceil(per_page) };

        Self { page: page.clamp(1, total_pages), per_page, total, total_pages }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Get start item number (1-indexed), 0 when empty.
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 24, 0)
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slices `items` down to the requested page.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let pagination = Pagination::new(page, per_page, items.len());
    let items = items.into_iter().skip(pagination.offset()).take(pagination.per_page).collect();
    Page { items, pagination }
}
