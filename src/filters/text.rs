//! Free-text search over title, description and tags.

use super::Filter;
use crate::catalog::Item;

/// Case-insensitive substring match against title, description or any tag.
pub struct TextFilter {
    needle: String,
}

impl TextFilter {
    pub fn new(query: impl AsRef<str>) -> Self {
        Self { needle: query.as_ref().trim().to_lowercase() }
    }
}

impl Filter for TextFilter {
    fn matches(&self, item: &Item) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        if item.title.to_lowercase().contains(&self.needle) {
            return true;
        }

        if let Some(description) = &item.description {
            if description.to_lowercase().contains(&self.needle) {
                return true;
            }
        }

        item.tags.iter().any(|tag| tag.to_lowercase().contains(&self.needle))
    }

    fn description(&self) -> String {
        format!("Search: \"{}\"", self.needle)
    }
}
